//! TOML loader for tax-year tables.
//!
//! Lets a newer year's published rates be supplied without a rebuild. The
//! file mirrors [`TaxYearConfig`] plus a `[[brackets]]` array:
//!
//! ```toml
//! tax_year = 2025
//! primary_rebate = "17235"
//! tax_threshold = "95750"
//! vat_threshold = "1000000"
//!
//! [[brackets]]
//! min_income = "0"
//! max_income = "237100"
//! rate = "0.18"
//! base_tax = "0"
//!
//! [[brackets]]
//! min_income = "237100"
//! rate = "0.26"
//! base_tax = "42678"
//! ```
//!
//! Amounts may be written as strings or plain numbers. Omit `max_income` on
//! the top bracket.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{TaxBracket, TaxTable, TaxTableError, TaxYearConfig};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TaxTableLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid tax table: {0}")]
    Invalid(#[from] TaxTableError),
}

#[derive(Debug, Deserialize)]
struct TableFile {
    tax_year: i32,
    primary_rebate: Decimal,
    tax_threshold: Decimal,
    vat_threshold: Decimal,
    #[serde(default)]
    brackets: Vec<BracketEntry>,
}

#[derive(Debug, Deserialize)]
struct BracketEntry {
    min_income: Decimal,
    max_income: Option<Decimal>,
    rate: Decimal,
    base_tax: Decimal,
}

impl From<BracketEntry> for TaxBracket {
    fn from(entry: BracketEntry) -> Self {
        TaxBracket {
            min_income: entry.min_income,
            max_income: entry.max_income,
            tax_rate: entry.rate,
            base_tax: entry.base_tax,
        }
    }
}

/// Parses and validates a table from TOML text.
pub fn load_table_from_str(input: &str) -> Result<TaxTable, TaxTableLoadError> {
    let file: TableFile = toml::from_str(input)?;

    let config = TaxYearConfig {
        tax_year: file.tax_year,
        primary_rebate: file.primary_rebate,
        tax_threshold: file.tax_threshold,
        vat_threshold: file.vat_threshold,
    };
    let brackets = file.brackets.into_iter().map(TaxBracket::from).collect();

    let table = TaxTable::new(config, brackets)?;
    info!(
        tax_year = table.tax_year(),
        brackets = table.brackets().len(),
        "loaded tax table"
    );
    Ok(table)
}

/// Reads `path` from disk and delegates to [`load_table_from_str`].
pub fn load_table_from_file(path: &Path) -> Result<TaxTable, TaxTableLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TaxTableLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_table_from_str(&contents)
}
