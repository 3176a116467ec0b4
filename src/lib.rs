//! Student Finance Navigator - terminal budgeting companion for students
//!
//! Records expenses against a fixed set of student spending categories,
//! tracks progress against per-category budget goals and runs one weekly
//! spending challenge at a time. A small assistant classifies expenses and
//! answers budgeting questions with canned advice.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Custom error types
//! - `models`: Core data types (money, categories, transactions, goals, challenges)
//! - `session`: In-memory state for one run
//! - `services`: Business logic over a session
//! - `assistant`: Expense classifier and keyword chat responder
//! - `audit`: Audit logging
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive session loop
//!
//! # Example
//!
//! ```rust
//! use student_finance::models::{Category, Money};
//! use student_finance::services::{GoalService, LedgerService};
//! use student_finance::session::Session;
//!
//! let session = Session::default();
//! GoalService::new(&session)
//!     .set_goal(Category::CampusFood, Money::from_major_minor(5000, 0))
//!     .unwrap();
//! LedgerService::new(&session)
//!     .record_transaction(Category::CampusFood, Money::from_major_minor(4500, 0))
//!     .unwrap();
//!
//! let progress = GoalService::new(&session).progress(Category::CampusFood).unwrap();
//! assert_eq!(progress.status.to_string(), "Near limit (90%)");
//! ```

pub mod assistant;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use error::{FinanceError, FinanceResult};
