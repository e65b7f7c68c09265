//! Income tax estimate for a sole proprietor.
//!
//! Turns a flat list of revenue and expense transactions into an estimate of
//! the year's income tax and VAT-registration position.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total revenue (sum of revenue amounts) |
//! | 2    | Total expenses (sum of expense amounts) |
//! | 3    | Taxable income: step 1 - step 2, minimum 0 |
//! | 4    | Gross tax: base tax of the matching bracket + rate × income above its lower bound |
//! | 5    | Net tax: step 4 - primary rebate, minimum 0 |
//! | 6    | Effective rate: step 5 / step 3 × 100 (0 when step 3 is 0) |
//! | 7    | VAT progress: step 1 / VAT threshold × 100, capped at 100 |
//!
//! No rounding happens between steps.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tax_core::{IncomeTaxEstimator, TaxTable, Transaction};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let transactions = vec![
//!     Transaction::revenue(dec!(500000), day),
//!     Transaction::expense(dec!(100000), day),
//! ];
//!
//! let table = TaxTable::sa_2025();
//! let estimate = IncomeTaxEstimator::new(&table).estimate(&transactions);
//!
//! assert_eq!(estimate.taxable_income, dec!(400000));
//! assert_eq!(estimate.gross_tax, dec!(86507.50));
//! assert_eq!(estimate.net_tax, dec!(69272.50));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{floor_at_zero, percent_of, sum_of_kind};
use crate::{TaxEstimate, TaxTable, Transaction, TransactionType};

/// Calculator bound to one tax year's table.
///
/// Holds only a shared reference, so one estimator can be used from many
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxEstimator<'a> {
    table: &'a TaxTable,
}

impl<'a> IncomeTaxEstimator<'a> {
    /// Creates an estimator over `table`.
    ///
    /// # Arguments
    ///
    /// * `table` - A validated tax table; every estimate reads its brackets,
    ///   primary rebate and VAT threshold
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_core::{IncomeTaxEstimator, TaxTable};
    ///
    /// let table = TaxTable::sa_2025();
    /// let estimate = IncomeTaxEstimator::new(&table).estimate(&[]);
    ///
    /// assert_eq!(estimate.tax_year, 2025);
    /// assert!(estimate.net_tax.is_zero());
    /// ```
    pub fn new(table: &'a TaxTable) -> Self {
        Self { table }
    }

    /// Computes the full estimate. Never fails; an empty list yields zeros.
    pub fn estimate(
        &self,
        transactions: &[Transaction],
    ) -> TaxEstimate {
        let config = self.table.config();

        let total_revenue = sum_of_kind(transactions, TransactionType::Revenue);
        let total_expenses = sum_of_kind(transactions, TransactionType::Expense);
        let taxable_income = self.taxable_income(total_revenue, total_expenses);

        let (bracket_index, gross_tax) = self.gross_tax(taxable_income);
        let net_tax = self.net_tax(gross_tax);

        TaxEstimate {
            tax_year: config.tax_year,
            total_revenue,
            total_expenses,
            taxable_income,
            bracket_index,
            gross_tax,
            net_tax,
            effective_rate: self.effective_rate(net_tax, taxable_income),
            vat_progress_percent: self.vat_progress_percent(total_revenue),
            vat_registration_required: total_revenue > config.vat_threshold,
            below_tax_threshold: taxable_income <= config.tax_threshold,
        }
    }

    /// Tax owed on a taxable income directly, skipping the transaction sums.
    ///
    /// Returns `(gross_tax, net_tax)`. Negative income is treated as zero.
    pub fn tax_on_income(
        &self,
        taxable_income: Decimal,
    ) -> (Decimal, Decimal) {
        let (_, gross_tax) = self.gross_tax(floor_at_zero(taxable_income));
        (gross_tax, self.net_tax(gross_tax))
    }

    fn taxable_income(
        &self,
        total_revenue: Decimal,
        total_expenses: Decimal,
    ) -> Decimal {
        floor_at_zero(total_revenue - total_expenses)
    }

    fn gross_tax(
        &self,
        taxable_income: Decimal,
    ) -> (usize, Decimal) {
        let (index, bracket) = self.table.bracket_for(taxable_income);
        debug!(
            %taxable_income,
            bracket = index,
            rate = %bracket.tax_rate,
            "matched tax bracket"
        );
        (index, bracket.tax_for(taxable_income))
    }

    fn net_tax(
        &self,
        gross_tax: Decimal,
    ) -> Decimal {
        floor_at_zero(gross_tax - self.table.config().primary_rebate)
    }

    fn effective_rate(
        &self,
        net_tax: Decimal,
        taxable_income: Decimal,
    ) -> Decimal {
        percent_of(net_tax, taxable_income)
    }

    fn vat_progress_percent(
        &self,
        total_revenue: Decimal,
    ) -> Decimal {
        percent_of(total_revenue, self.table.config().vat_threshold).min(Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
    }

    fn income_of(amount: Decimal) -> Vec<Transaction> {
        vec![Transaction::revenue(amount, day())]
    }

    // =========================================================================
    // taxable_income tests
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_expenses() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.taxable_income(dec!(500000), dec!(100000)), dec!(400000));
    }

    #[test]
    fn taxable_income_is_zero_when_expenses_exceed_revenue() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.taxable_income(dec!(10000), dec!(15000)), dec!(0));
    }

    // =========================================================================
    // gross_tax tests
    // =========================================================================

    #[test]
    fn gross_tax_first_bracket() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        // 0.18 * 100000
        assert_eq!(estimator.gross_tax(dec!(100000)), (0, dec!(18000)));
    }

    #[test]
    fn gross_tax_third_bracket() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        // 77362 + 0.31 * (400000 - 370500)
        assert_eq!(estimator.gross_tax(dec!(400000)), (2, dec!(86507.5)));
    }

    #[test]
    fn gross_tax_top_bracket() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        // 644489 + 0.45 * (2000000 - 1817000) = 644489 + 82350
        assert_eq!(estimator.gross_tax(dec!(2000000)), (6, dec!(726839)));
    }

    #[test]
    fn gross_tax_at_each_boundary_equals_next_base() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let boundaries = [
            (dec!(237100), dec!(42678)),
            (dec!(370500), dec!(77362)),
            (dec!(512800), dec!(121475)),
            (dec!(673000), dec!(179147)),
            (dec!(857900), dec!(251258)),
            (dec!(1817000), dec!(644489)),
        ];

        for (income, expected) in boundaries {
            let (_, gross) = estimator.gross_tax(income);
            assert_eq!(gross, expected, "gross tax at boundary {income}");
        }
    }

    #[test]
    fn gross_tax_keeps_fractional_cents() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        // 0.18 * 0.03 = 0.0054, no rounding applied
        assert_eq!(estimator.gross_tax(dec!(0.03)).1, dec!(0.0054));
    }

    // =========================================================================
    // net_tax tests
    // =========================================================================

    #[test]
    fn net_tax_subtracts_primary_rebate() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.net_tax(dec!(86507.5)), dec!(69272.5));
    }

    #[test]
    fn net_tax_is_zero_when_rebate_exceeds_gross() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.net_tax(dec!(10000)), dec!(0));
    }

    // =========================================================================
    // vat_progress_percent tests
    // =========================================================================

    #[test]
    fn vat_progress_is_proportional_below_threshold() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.vat_progress_percent(dec!(250000)), dec!(25));
    }

    #[test]
    fn vat_progress_is_capped_at_one_hundred() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.vat_progress_percent(dec!(5000000)), dec!(100));
    }

    // =========================================================================
    // estimate (integration) tests
    // =========================================================================

    #[test]
    fn estimate_standard_case() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);
        let transactions = vec![
            Transaction::revenue(dec!(500000), day()),
            Transaction::expense(dec!(100000), day()),
        ];

        let result = estimator.estimate(&transactions);

        assert_eq!(result.total_revenue, dec!(500000));
        assert_eq!(result.total_expenses, dec!(100000));
        assert_eq!(result.taxable_income, dec!(400000));
        assert_eq!(result.bracket_index, 2);
        assert_eq!(result.gross_tax, dec!(86507.5));
        assert_eq!(result.net_tax, dec!(69272.5));
        // 69272.5 / 400000 * 100
        assert_eq!(result.effective_rate, dec!(17.318125));
        assert_eq!(result.vat_progress_percent, dec!(50));
        assert!(!result.vat_registration_required);
        assert!(!result.below_tax_threshold);
    }

    #[test]
    fn estimate_empty_transactions_is_all_zero() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let result = estimator.estimate(&[]);

        assert_eq!(result.total_revenue, dec!(0));
        assert_eq!(result.total_expenses, dec!(0));
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.gross_tax, dec!(0));
        assert_eq!(result.net_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.vat_progress_percent, dec!(0));
        assert!(!result.vat_registration_required);
        assert!(result.below_tax_threshold);
    }

    #[test]
    fn estimate_loss_clamps_to_zero() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);
        let transactions = vec![
            Transaction::revenue(dec!(20000), day()),
            Transaction::expense(dec!(80000), day()),
        ];

        let result = estimator.estimate(&transactions);

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.net_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.vat_progress_percent, dec!(2));
    }

    #[test]
    fn estimate_at_tax_threshold_owes_nothing() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let result = estimator.estimate(&income_of(dec!(95750)));

        // 0.18 * 95750 = 17235, exactly the primary rebate
        assert_eq!(result.gross_tax, dec!(17235));
        assert_eq!(result.net_tax, dec!(0));
        assert!(result.below_tax_threshold);
    }

    #[test]
    fn estimate_just_above_tax_threshold_owes_tax() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let result = estimator.estimate(&income_of(dec!(95760)));

        assert_eq!(result.net_tax, dec!(1.8));
        assert!(!result.below_tax_threshold);
    }

    #[test]
    fn estimate_revenue_at_vat_threshold_does_not_require_registration() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let result = estimator.estimate(&income_of(dec!(1000000)));

        assert_eq!(result.vat_progress_percent, dec!(100));
        assert!(!result.vat_registration_required);
    }

    #[test]
    fn estimate_revenue_far_above_vat_threshold() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let result = estimator.estimate(&income_of(dec!(5000000)));

        assert_eq!(result.vat_progress_percent, dec!(100));
        assert!(result.vat_registration_required);
        assert_eq!(result.bracket_index, 6);
    }

    #[test]
    fn estimate_does_not_filter_by_date() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);
        let old = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let transactions = vec![
            Transaction::revenue(dec!(100000), old),
            Transaction::revenue(dec!(100000), day()),
        ];

        let result = estimator.estimate(&transactions);

        assert_eq!(result.total_revenue, dec!(200000));
    }

    #[test]
    fn tax_on_income_matches_estimate() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let (gross, net) = estimator.tax_on_income(dec!(400000));

        assert_eq!(gross, dec!(86507.5));
        assert_eq!(net, dec!(69272.5));
    }

    #[test]
    fn tax_on_negative_income_is_zero() {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        assert_eq!(estimator.tax_on_income(dec!(-500)), (dec!(0), dec!(0)));
    }
}
