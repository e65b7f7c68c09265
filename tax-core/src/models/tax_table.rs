//! A validated tax schedule for one tax year.
//!
//! [`TaxTable`] can only be built through [`TaxTable::new`] (or the built-in
//! [`TaxTable::sa_2025`]), so holders of a table can rely on its brackets being
//! contiguous, ascending and capped by exactly one unbounded band.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::{TaxBracket, TaxYearConfig};

/// Reasons a bracket schedule or its constants are rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("no tax brackets provided")]
    NoBrackets,

    #[error("first bracket must start at 0, got {0}")]
    FirstBracketNotZero(Decimal),

    #[error("bracket {index} does not start where the previous bracket ends")]
    NotContiguous { index: usize },

    #[error("bracket {index} has an upper bound at or below its lower bound")]
    EmptyBracket { index: usize },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    #[error("last bracket must be unbounded")]
    LastBracketBounded,

    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("VAT threshold must be positive, got {0}")]
    InvalidVatThreshold(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxTable {
    config: TaxYearConfig,
    brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Validates `brackets` and `config` and bundles them.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTableError`] found, checking the constants
    /// first and then the brackets in ascending order.
    pub fn new(
        config: TaxYearConfig,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, TaxTableError> {
        validate_config(&config)?;
        validate_brackets(&brackets)?;

        let table = Self { config, brackets };
        if !table.base_tax_is_continuous() {
            warn!(
                tax_year = table.config.tax_year,
                "base tax does not line up with the previous bracket's ceiling"
            );
        }
        Ok(table)
    }

    /// South African individual rates for the 2025 tax year
    /// (1 March 2024 to 28 February 2025).
    pub fn sa_2025() -> Self {
        let band = |min: Decimal, max: Option<Decimal>, rate: Decimal, base: Decimal| TaxBracket {
            min_income: min,
            max_income: max,
            tax_rate: rate,
            base_tax: base,
        };

        Self {
            config: TaxYearConfig {
                tax_year: 2025,
                primary_rebate: dec!(17235),
                tax_threshold: dec!(95750),
                vat_threshold: dec!(1000000),
            },
            brackets: vec![
                band(dec!(0), Some(dec!(237100)), dec!(0.18), dec!(0)),
                band(dec!(237100), Some(dec!(370500)), dec!(0.26), dec!(42678)),
                band(dec!(370500), Some(dec!(512800)), dec!(0.31), dec!(77362)),
                band(dec!(512800), Some(dec!(673000)), dec!(0.36), dec!(121475)),
                band(dec!(673000), Some(dec!(857900)), dec!(0.39), dec!(179147)),
                band(dec!(857900), Some(dec!(1817000)), dec!(0.41), dec!(251258)),
                band(dec!(1817000), None, dec!(0.45), dec!(644489)),
            ],
        }
    }

    /// Year-level constants: primary rebate, tax threshold and VAT threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::TaxTable;
    ///
    /// let table = TaxTable::sa_2025();
    ///
    /// assert_eq!(table.config().primary_rebate, dec!(17235));
    /// assert_eq!(table.config().vat_threshold, dec!(1000000));
    /// ```
    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    /// The bands in ascending order.
    ///
    /// # Returns
    ///
    /// A non-empty slice whose bands are contiguous, starting at zero and
    /// ending in a single unbounded band. [`TaxTable::new`] guarantees this.
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_core::TaxTable;
    ///
    /// let table = TaxTable::sa_2025();
    /// let brackets = table.brackets();
    ///
    /// assert_eq!(brackets.len(), 7);
    /// assert!(brackets[0].min_income.is_zero());
    /// assert!(brackets[6].is_unbounded());
    /// ```
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    /// Finds the band for `taxable_income`, returning its index and the band.
    ///
    /// Scans in ascending order and takes the first band whose upper bound is
    /// at or above the income, so an income exactly on a boundary belongs to
    /// the lower band. Incomes at or below zero land in the first band.
    pub fn bracket_for(
        &self,
        taxable_income: Decimal,
    ) -> (usize, &TaxBracket) {
        let last = self.brackets.len() - 1;
        self.brackets
            .iter()
            .enumerate()
            .find(|(_, b)| b.covers(taxable_income))
            .unwrap_or((last, &self.brackets[last]))
    }

    /// True when every band's `base_tax` equals the tax owed at the previous
    /// band's upper bound.
    pub fn base_tax_is_continuous(&self) -> bool {
        self.brackets.windows(2).all(|pair| {
            let (lower, upper) = (&pair[0], &pair[1]);
            match lower.max_income {
                Some(max) => lower.tax_for(max).round() == upper.base_tax.round(),
                None => false,
            }
        })
    }
}

fn validate_config(config: &TaxYearConfig) -> Result<(), TaxTableError> {
    for (field, value) in [
        ("primary rebate", config.primary_rebate),
        ("tax threshold", config.tax_threshold),
    ] {
        if value < Decimal::ZERO {
            return Err(TaxTableError::NegativeAmount { field, value });
        }
    }
    if config.vat_threshold <= Decimal::ZERO {
        return Err(TaxTableError::InvalidVatThreshold(config.vat_threshold));
    }
    Ok(())
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), TaxTableError> {
    let first = brackets.first().ok_or(TaxTableError::NoBrackets)?;
    if first.min_income != Decimal::ZERO {
        return Err(TaxTableError::FirstBracketNotZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(TaxTableError::InvalidRate {
                index,
                rate: bracket.tax_rate,
            });
        }
        if bracket.base_tax < Decimal::ZERO {
            return Err(TaxTableError::NegativeAmount {
                field: "base tax",
                value: bracket.base_tax,
            });
        }

        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(TaxTableError::EmptyBracket { index });
            }
            Some(_) if index == last_index => return Err(TaxTableError::LastBracketBounded),
            None if index != last_index => {
                return Err(TaxTableError::UnboundedBeforeLast { index });
            }
            _ => {}
        }

        if index > 0 && brackets[index - 1].max_income != Some(bracket.min_income) {
            return Err(TaxTableError::NotContiguous { index });
        }
    }

    Ok(())
}
