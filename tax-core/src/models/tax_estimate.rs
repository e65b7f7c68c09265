use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{round_half_up, round_percent};

/// Derived tax position for a set of transactions. Never stored.
///
/// All amounts are kept at full precision; use [`TaxEstimate::rounded`] for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxEstimate {
    pub tax_year: i32,
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    /// Revenue less expenses, floored at zero.
    pub taxable_income: Decimal,
    /// Zero-based index of the bracket applied.
    pub bracket_index: usize,
    pub gross_tax: Decimal,
    /// Gross tax less the primary rebate, floored at zero.
    pub net_tax: Decimal,
    /// Net tax as a percentage of taxable income (0 when there is no income).
    pub effective_rate: Decimal,
    /// Revenue as a percentage of the VAT threshold, capped at 100.
    pub vat_progress_percent: Decimal,
    /// Revenue is strictly above the VAT threshold.
    pub vat_registration_required: bool,
    /// Taxable income is at or below the tax-free threshold.
    pub below_tax_threshold: bool,
}

/// The two provisional-tax instalments for a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalPayments {
    /// First period, due end of August.
    pub first_period: Decimal,
    /// Second period, due end of February.
    pub second_period: Decimal,
}

impl TaxEstimate {
    /// Splits net tax into two instalments rounded to cents.
    ///
    /// The second period takes whatever the first leaves over, so the pair
    /// always adds up to the rounded net tax.
    pub fn provisional_payments(&self) -> ProvisionalPayments {
        let total = round_half_up(self.net_tax);
        let first_period = round_half_up(total / Decimal::TWO);
        ProvisionalPayments {
            first_period,
            second_period: total - first_period,
        }
    }

    /// Copy with currency fields rounded to cents and percentages to two
    /// decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            total_revenue: round_half_up(self.total_revenue),
            total_expenses: round_half_up(self.total_expenses),
            taxable_income: round_half_up(self.taxable_income),
            gross_tax: round_half_up(self.gross_tax),
            net_tax: round_half_up(self.net_tax),
            effective_rate: round_percent(self.effective_rate),
            vat_progress_percent: round_percent(self.vat_progress_percent),
            ..self.clone()
        }
    }
}
