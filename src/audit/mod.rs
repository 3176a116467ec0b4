//! Audit logging
//!
//! Records every mutating session operation in an append-only log.
//!
//! - `AuditEntry`: one operation with timestamp, entity information and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use student_finance::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.to_string(),
//!     Some(txn.category.to_string()),
//!     &txn,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
