//! Expense classifier and canned chat assistant
//!
//! Neither piece touches session state; both are plain functions of their
//! input and can be swapped out independently of the budgeting core.

pub mod chat;
pub mod classifier;

pub use chat::{KeywordResponder, ReplyRule, Responder, FALLBACK_REPLY};
pub use classifier::{classify, Classification};
