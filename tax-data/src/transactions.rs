//! CSV loader for transaction lists.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed before parsing.
//!
//! | Column        | Required | Type    | Notes                                   |
//! |---------------|----------|---------|-----------------------------------------|
//! | `type`        | yes      | string  | `revenue` or `expense`, any case        |
//! | `amount`      | yes      | decimal | Non-negative; `1,234.56`, `450,00` ok   |
//! | `date`        | yes      | date    | `YYYY-MM-DD`                            |
//! | `id`          | no       | string  | Leave cell empty for `None`             |
//! | `description` | no       | string  |                                         |
//! | `project_id`  | no       | string  | Usually set on revenue                  |
//! | `category_id` | no       | string  | Usually set on expenses                 |
//!
//! ### Minimal example
//!
//! ```csv
//! type,amount,date
//! revenue,500000.00,2024-07-01
//! expense,100000.00,2024-07-15
//! ```
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Transaction, TransactionType, calculations::common::normalize_amount};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    description: Option<String>,
    amount: String,
    date: String,
    project_id: Option<String>,
    category_id: Option<String>,
}

/// Errors that can occur while loading or converting transaction CSV data.
///
/// `row` is the 1-based data row (the header is row 0).
#[derive(Debug, thiserror::Error)]
pub enum TransactionLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Structural problem: bad quoting, missing required column, wrong
    /// number of fields.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised transaction type '{value}' on row {row}")]
    InvalidType { value: String, row: usize },

    #[error("invalid amount '{value}' on row {row}")]
    InvalidAmount { value: String, row: usize },

    #[error("negative amount {amount} on row {row}")]
    NegativeAmount { amount: Decimal, row: usize },

    #[error("invalid date '{value}' on row {row} (expected YYYY-MM-DD)")]
    InvalidDate { value: String, row: usize },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_amount(
    value: &str,
    row: usize,
) -> Result<Decimal, TransactionLoadError> {
    let amount = Decimal::from_str(&normalize_amount(value)).map_err(|_| {
        TransactionLoadError::InvalidAmount {
            value: value.to_string(),
            row,
        }
    })?;
    if amount < Decimal::ZERO {
        return Err(TransactionLoadError::NegativeAmount { amount, row });
    }
    Ok(amount)
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Transaction, TransactionLoadError> {
    let kind =
        TransactionType::parse(&row.kind).ok_or_else(|| TransactionLoadError::InvalidType {
            value: row.kind.clone(),
            row: row_number,
        })?;
    let amount = parse_amount(&row.amount, row_number)?;
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|_| {
        TransactionLoadError::InvalidDate {
            value: row.date.clone(),
            row: row_number,
        }
    })?;

    Ok(Transaction {
        id: non_empty(row.id),
        kind,
        description: row.description.unwrap_or_default(),
        amount,
        date,
        project_id: non_empty(row.project_id),
        category_id: non_empty(row.category_id),
    })
}

/// Parse CSV text and return the transactions in file order.
///
/// # Errors
///
/// Fails on the first structurally invalid row or the first row whose
/// type, amount or date cannot be converted.
pub fn load_from_str(input: &str) -> Result<Vec<Transaction>, TransactionLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let transactions = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = transactions.len(), "parsed transactions");
    Ok(transactions)
}

/// Reads `path` from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Transaction>, TransactionLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TransactionLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
