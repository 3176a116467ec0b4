//! Classifier and chat commands

use std::io::Write;

use crate::assistant::{classify, Responder};
use crate::config::Settings;
use crate::error::FinanceResult;

use super::parse_amount;

/// Classify an expense amount and describe the result
pub fn handle_classify<W: Write>(settings: &Settings, amount: &str, out: &mut W) -> FinanceResult<()> {
    let amount = parse_amount(amount)?;

    if !amount.is_positive() {
        writeln!(out, "Please enter a valid amount.")?;
        return Ok(());
    }

    let classification = classify(amount, settings.significant_expense_threshold);
    writeln!(
        out,
        "{}: {}",
        amount.format_with_symbol(&settings.currency_symbol),
        classification.describe()
    )?;

    Ok(())
}

/// Answer a chat message
pub fn handle_chat<W: Write>(
    responder: &dyn Responder,
    message: &[String],
    out: &mut W,
) -> FinanceResult<()> {
    let message = message.join(" ");
    writeln!(out, "Assistant: {}", responder.reply(&message))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::KeywordResponder;

    fn run_classify(amount: &str) -> String {
        let mut out = Vec::new();
        handle_classify(&Settings::default(), amount, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_classify_output() {
        assert!(run_classify("20000").contains("significant expense"));
        assert!(run_classify("19999.99").contains("regular expense"));
        assert_eq!(run_classify("0"), "Please enter a valid amount.\n");
    }

    #[test]
    fn test_chat_joins_words() {
        let mut out = Vec::new();
        let words = vec!["saving".to_string(), "tips".to_string()];
        handle_chat(&KeywordResponder::default(), &words, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Assistant: Try setting a weekly spending challenge"));
    }
}
