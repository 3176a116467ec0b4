//! CSV import service
//!
//! Feeds `category,amount` rows through the ledger one at a time, in file
//! order. Bad rows are reported and skipped; good rows are recorded.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, Transaction};
use crate::services::LedgerService;
use crate::session::Session;

/// A row that could not be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source file
    pub line: u64,
    pub reason: String,
}

/// Result of an import run
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: Vec<Transaction>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportResult {
    pub fn imported_total(&self) -> Money {
        self.imported.iter().map(|t| t.amount).sum()
    }
}

/// Header positions of the two required columns
#[derive(Debug, Clone, Copy)]
struct ColumnMapping {
    category_column: usize,
    amount_column: usize,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> FinanceResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| FinanceError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            category_column: find("category")?,
            amount_column: find("amount")?,
        })
    }

    fn parse_row(&self, record: &StringRecord) -> FinanceResult<(Category, Money)> {
        let category = record
            .get(self.category_column)
            .ok_or_else(|| FinanceError::Import("Missing category value".into()))?
            .parse::<Category>()?;

        let raw_amount = record
            .get(self.amount_column)
            .ok_or_else(|| FinanceError::Import("Missing amount value".into()))?;
        let amount = Money::parse(raw_amount)
            .map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))?;

        Ok((category, amount))
    }
}

/// Service for importing transactions from CSV
pub struct ImportService<'a> {
    session: &'a Session,
}

impl<'a> ImportService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Import transactions from a CSV file
    pub fn import_file(&self, path: &Path) -> FinanceResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            FinanceError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file)
    }

    /// Import transactions from any CSV source with a header row
    pub fn import_reader<R: Read>(&self, reader: R) -> FinanceResult<ImportResult> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mapping = ColumnMapping::from_headers(reader.headers()?)?;
        let ledger = LedgerService::new(self.session);
        let mut result = ImportResult::default();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let recorded = mapping
                .parse_row(&record)
                .and_then(|(category, amount)| ledger.record_transaction(category, amount));

            match recorded {
                Ok(transaction) => result.imported.push(transaction),
                Err(FinanceError::State(msg)) => return Err(FinanceError::State(msg)),
                Err(e) => result.rejected.push(RejectedRow {
                    line,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_in_file_order() {
        let session = Session::default();
        let csv = "category,amount\nGroceries,1200\nCampus Food,450.50\ngroceries,300\n";

        let result = ImportService::new(&session).import_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.imported.len(), 3);
        assert!(result.rejected.is_empty());
        assert_eq!(result.imported[1].category, Category::CampusFood);
        assert_eq!(result.imported_total(), Money::from_minor(195_050));

        let ledger = LedgerService::new(&session);
        assert_eq!(ledger.total_for(Category::Groceries).unwrap(), Money::from_minor(150_000));
    }

    #[test]
    fn test_bad_rows_are_reported_and_skipped() {
        let session = Session::default();
        let csv = "Amount,Category\n100,Textbooks\n-5,Textbooks\n20,Holidays\nabc,Other\n\n7,Other\n";

        let result = ImportService::new(&session).import_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.imported.len(), 2);
        let lines: Vec<u64> = result.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(result.rejected[0].reason.contains("must be positive"));
        assert!(result.rejected[1].reason.contains("Unknown category"));
    }

    #[test]
    fn test_rows_are_counted_once() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let session = Session::default()
            .with_audit(crate::audit::AuditLogger::new(temp_dir.path().into()));
        let csv = "category,amount\nGroceries,50000000000000000\nGroceries,50000000000000000\nOther,5\n";

        let result = ImportService::new(&session).import_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.imported.len(), 2);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].line, 3);
        assert!(result.rejected[0].reason.contains("too large"));

        let history = LedgerService::new(&session).all_transactions().unwrap();
        assert_eq!(history.len(), result.imported.len());
        assert_eq!(session.take_audit_warnings().len(), 2);
    }

    #[test]
    fn test_missing_column() {
        let session = Session::default();
        let err = ImportService::new(&session)
            .import_reader("category,price\nOther,1\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, FinanceError::Import(_)));
        assert!(LedgerService::new(&session).all_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_import_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "category,amount").unwrap();
        writeln!(file, "\"Dorm/Rent\",\"50,000\"").unwrap();

        let session = Session::default();
        let result = ImportService::new(&session).import_file(file.path()).unwrap();
        assert_eq!(result.imported.len(), 1);
        assert_eq!(result.imported[0].amount, Money::from_major_minor(50_000, 0));
    }
}
