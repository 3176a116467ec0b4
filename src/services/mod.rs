//! Service layer
//!
//! Business rules on top of the session stores: validation, derived
//! progress values, challenge transitions and audit logging.

pub mod challenge;
pub mod goal;
pub mod import;
pub mod ledger;

pub use challenge::ChallengeService;
pub use goal::GoalService;
pub use import::{ImportResult, ImportService, RejectedRow};
pub use ledger::{LedgerService, SpendingSummary};
