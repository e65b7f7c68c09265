//! Headline figures and monthly totals for the business overview.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::sum_of_kind;
use crate::{Transaction, TransactionType};

/// Flat share of revenue suggested as a provisional-tax set-aside.
pub const DEFAULT_SET_ASIDE_RATE: Decimal = dec!(0.25);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    /// Revenue less expenses. Unlike taxable income this may be negative.
    pub net_profit: Decimal,
    /// Revenue × set-aside rate.
    pub set_aside: Decimal,
    pub set_aside_rate: Decimal,
}

impl DashboardSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Self::with_set_aside_rate(transactions, DEFAULT_SET_ASIDE_RATE)
    }

    pub fn with_set_aside_rate(
        transactions: &[Transaction],
        set_aside_rate: Decimal,
    ) -> Self {
        let total_revenue = sum_of_kind(transactions, TransactionType::Revenue);
        let total_expenses = sum_of_kind(transactions, TransactionType::Expense);

        Self {
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            set_aside: total_revenue.saturating_mul(set_aside_rate),
            set_aside_rate,
        }
    }
}

/// Revenue and expenses booked in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// First day of the month.
    pub month: NaiveDate,
    pub revenue: Decimal,
    pub expenses: Decimal,
}

impl MonthlyTotal {
    /// "Sep 24" style label.
    pub fn label(&self) -> String {
        self.month.format("%b %y").to_string()
    }
}

/// Groups transactions by calendar month, oldest first. Months with no
/// transactions are left out.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for t in transactions {
        let entry = months
            .entry((t.date.year(), t.date.month()))
            .or_default();
        if t.is_revenue() {
            entry.0 = entry.0.saturating_add(t.amount);
        } else if t.is_expense() {
            entry.1 = entry.1.saturating_add(t.amount);
        }
    }

    months
        .into_iter()
        .filter_map(|((year, month), (revenue, expenses))| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|month| MonthlyTotal {
                month,
                revenue,
                expenses,
            })
        })
        .collect()
}
