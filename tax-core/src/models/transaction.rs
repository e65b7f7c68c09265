use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Revenue,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// A dated money movement recorded by the freelancer.
///
/// Only `kind` and `amount` feed the tax calculation; the remaining fields
/// are carried for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub project_id: Option<String>,
    pub category_id: Option<String>,
}

impl Transaction {
    /// Shorthand for a revenue entry with no descriptive fields.
    pub fn revenue(
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self::bare(TransactionType::Revenue, amount, date)
    }

    /// Shorthand for an expense entry with no descriptive fields.
    pub fn expense(
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self::bare(TransactionType::Expense, amount, date)
    }

    fn bare(
        kind: TransactionType,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            kind,
            description: String::new(),
            amount,
            date,
            project_id: None,
            category_id: None,
        }
    }

    pub fn is_revenue(&self) -> bool {
        self.kind == TransactionType::Revenue
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
