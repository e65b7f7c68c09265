use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed per-year constants that sit alongside the bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// Year in which the tax year ends, e.g. `2025` for 2024/25.
    pub tax_year: i32,
    /// Deducted once from gross tax.
    pub primary_rebate: Decimal,
    /// Taxable income at or below which no tax is payable (under 65).
    pub tax_threshold: Decimal,
    /// Annual turnover above which VAT registration is compulsory.
    pub vat_threshold: Decimal,
}
