//! One line of the audit log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The part of the session an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    Goal,
    Challenge,
    /// Per-category weekly spending
    WeeklySpending,
    /// The whole transaction history
    Ledger,
}

impl EntityType {
    fn label(self) -> &'static str {
        match self {
            EntityType::Transaction => "Transaction",
            EntityType::Goal => "Goal",
            EntityType::Challenge => "Challenge",
            EntityType::WeeklySpending => "WeeklySpending",
            EntityType::Ledger => "Ledger",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded session change
///
/// `before` holds the value a change replaced or removed, `after` the value
/// it introduced. Serialized as one JSON object per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    /// Transaction or challenge id, or the category label for goals
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn stamped(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// A new entity entered the session
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::stamped(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    /// An entity was replaced; `diff_summary` says what moved
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::stamped(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    /// An entity left the session: a closed challenge or a cleared figure
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        reason: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            diff_summary: reason,
            ..Self::stamped(Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    /// `[time] OPERATION Entity id (name)`, with the summary on a second line
    pub fn describe(&self) -> String {
        let mut line = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            line.push_str(&format!(" ({})", name));
        }
        if let Some(summary) = &self.diff_summary {
            line.push_str(&format!("\n  {}", summary));
        }

        line
    }
}
