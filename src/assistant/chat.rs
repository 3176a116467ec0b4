//! Keyword-matched chat replies
//!
//! Replies come from an ordered rule table: the message is lowercased, the
//! first rule with a trigger contained in it wins, and a fixed fallback
//! answers everything else.

/// Anything that can answer a chat message
pub trait Responder {
    fn reply(&self, message: &str) -> String;
}

/// Reply given when no rule matches
pub const FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that. You can ask me about \
saving money, your budget, or what a significant expense is.";

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRule {
    /// Lowercase substrings, any of which selects this rule
    pub triggers: Vec<String>,
    pub reply: String,
}

impl ReplyRule {
    pub fn new(triggers: &[&str], reply: impl Into<String>) -> Self {
        Self {
            triggers: triggers.iter().map(|t| t.to_lowercase()).collect(),
            reply: reply.into(),
        }
    }

    /// Whether any trigger appears in an already-lowercased message
    fn matches(&self, message: &str) -> bool {
        self.triggers.iter().any(|t| message.contains(t.as_str()))
    }
}

/// First-match substring responder
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    rules: Vec<ReplyRule>,
    fallback: String,
}

impl KeywordResponder {
    pub fn new(rules: Vec<ReplyRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }
}

impl Default for KeywordResponder {
    /// The student finance rule table
    fn default() -> Self {
        let rules = vec![
            ReplyRule::new(
                &["budget", "how much"],
                "You can check your budget goals with 'goal list'. Remember to set a budget \
                 for your most common expenses!",
            ),
            ReplyRule::new(
                &["save money", "saving tips"],
                "Try setting a weekly spending challenge with 'challenge accept'. A little bit \
                 of savings each week adds up!",
            ),
            ReplyRule::new(
                &["significant expense"],
                "A significant expense is an unusual or high-value transaction that might be a \
                 one-time cost, like a laptop or a textbook. The classifier flags these to help \
                 you notice them.",
            ),
            ReplyRule::new(
                &["hello", "hi", "hey"],
                "Hi there! I'm your financial assistant. How can I help you manage your \
                 student finances today?",
            ),
            ReplyRule::new(
                &["thank you", "thanks"],
                "You're welcome! Happy to help you on your financial journey.",
            ),
            ReplyRule::new(
                &["who are you"],
                "I'm the financial assistant for your Student Finance Navigator. My goal is \
                 to help you make smarter money decisions!",
            ),
        ];

        Self::new(rules, FALLBACK_REPLY)
    }
}

impl Responder for KeywordResponder {
    fn reply(&self, message: &str) -> String {
        let message = message.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&message))
            .map(|rule| rule.reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}
