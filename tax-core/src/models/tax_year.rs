use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Transaction;

/// South African tax year, 1 March to the end of February.
///
/// The value is the year in which the tax year ends, so `TaxYear(2025)` runs
/// from 1 March 2024 to 28 February 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxYear(pub i32);

impl TaxYear {
    pub fn from_date(date: NaiveDate) -> Self {
        if date.month() >= 3 {
            TaxYear(date.year() + 1)
        } else {
            TaxYear(date.year())
        }
    }

    /// 1 March of the previous calendar year. `None` outside chrono's range.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0 - 1, 3, 1)
    }

    /// Last day of February, leap years included.
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 3, 1).and_then(|d| d.pred_opt())
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        Self::from_date(date) == *self
    }

    /// "2024/25" style label.
    pub fn display(&self) -> String {
        format!("{}/{:02}", self.0 - 1, self.0.rem_euclid(100))
    }
}

/// Keeps the transactions dated inside `year`, in their original order.
pub fn filter_tax_year(
    transactions: &[Transaction],
    year: TaxYear,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| year.contains(t.date))
        .cloned()
        .collect()
}
