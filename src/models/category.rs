//! Spending categories
//!
//! The category set is closed: every transaction, goal and challenge refers
//! to one of these labels, and free text is resolved at the input boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinanceError;

/// A student spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Tuition/Fees")]
    TuitionFees,
    Textbooks,
    #[serde(rename = "Campus Food")]
    CampusFood,
    #[serde(rename = "Social Life")]
    SocialLife,
    Groceries,
    #[serde(rename = "Dorm/Rent")]
    DormRent,
    Transportation,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::TuitionFees,
        Category::Textbooks,
        Category::CampusFood,
        Category::SocialLife,
        Category::Groceries,
        Category::DormRent,
        Category::Transportation,
        Category::Other,
    ];

    /// The human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Category::TuitionFees => "Tuition/Fees",
            Category::Textbooks => "Textbooks",
            Category::CampusFood => "Campus Food",
            Category::SocialLife => "Social Life",
            Category::Groceries => "Groceries",
            Category::DormRent => "Dorm/Rent",
            Category::Transportation => "Transportation",
            Category::Other => "Other",
        }
    }

    /// Day-to-day categories a weekly challenge can be set on
    pub const fn is_challenge_eligible(&self) -> bool {
        matches!(
            self,
            Category::CampusFood
                | Category::SocialLife
                | Category::Groceries
                | Category::Transportation
        )
    }

    /// Iterate over the challenge-eligible categories
    pub fn challenge_categories() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| c.is_challenge_eligible())
    }
}

/// Lowercase and drop everything that isn't a letter or digit
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Category {
    type Err = FinanceError;

    /// Matches labels ignoring case, spaces and punctuation, so
    /// "campus-food", "Campus Food" and "CAMPUSFOOD" all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(FinanceError::UnknownCategory(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|c| normalize(c.label()) == wanted)
            .ok_or_else(|| FinanceError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("Campus Food".parse::<Category>().unwrap(), Category::CampusFood);
        assert_eq!("campus-food".parse::<Category>().unwrap(), Category::CampusFood);
        assert_eq!("TUITION/FEES".parse::<Category>().unwrap(), Category::TuitionFees);
        assert_eq!("tuitionfees".parse::<Category>().unwrap(), Category::TuitionFees);
        assert_eq!("dorm_rent".parse::<Category>().unwrap(), Category::DormRent);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Holidays".parse::<Category>().unwrap_err();
        assert!(matches!(err, FinanceError::UnknownCategory(_)));
        assert!("".parse::<Category>().is_err());
        assert!("--".parse::<Category>().is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_challenge_categories() {
        let eligible: Vec<_> = Category::challenge_categories().collect();
        assert_eq!(
            eligible,
            vec![
                Category::CampusFood,
                Category::SocialLife,
                Category::Groceries,
                Category::Transportation
            ]
        );
        assert!(!Category::TuitionFees.is_challenge_eligible());
    }

    #[test]
    fn test_serialization_uses_labels() {
        let json = serde_json::to_string(&Category::CampusFood).unwrap();
        assert_eq!(json, "\"Campus Food\"");
        let back: Category = serde_json::from_str("\"Dorm/Rent\"").unwrap();
        assert_eq!(back, Category::DormRent);
    }
}
