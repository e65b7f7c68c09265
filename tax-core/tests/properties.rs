//! Property checks for the income tax estimator against the built-in table.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tax_core::{IncomeTaxEstimator, TaxTable, Transaction};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
}

/// Amounts in cents up to R5 million.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..500_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((any::<bool>(), amount_strategy()), 0..20).prop_map(|items| {
        items
            .into_iter()
            .map(|(is_revenue, amount)| {
                if is_revenue {
                    Transaction::revenue(amount, day())
                } else {
                    Transaction::expense(amount, day())
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn taxable_income_and_net_tax_are_never_negative(transactions in transactions_strategy()) {
        let table = TaxTable::sa_2025();
        let estimate = IncomeTaxEstimator::new(&table).estimate(&transactions);

        prop_assert!(estimate.taxable_income >= Decimal::ZERO);
        prop_assert!(estimate.net_tax >= Decimal::ZERO);
        prop_assert!(estimate.gross_tax >= estimate.net_tax);
    }

    #[test]
    fn vat_progress_stays_within_percent_range(transactions in transactions_strategy()) {
        let table = TaxTable::sa_2025();
        let estimate = IncomeTaxEstimator::new(&table).estimate(&transactions);

        prop_assert!(estimate.vat_progress_percent >= Decimal::ZERO);
        prop_assert!(estimate.vat_progress_percent <= Decimal::ONE_HUNDRED);
        prop_assert_eq!(
            estimate.vat_registration_required,
            estimate.total_revenue > table.config().vat_threshold
        );
    }

    #[test]
    fn more_revenue_never_lowers_net_tax(
        revenue in amount_strategy(),
        extra in amount_strategy(),
        expenses in amount_strategy(),
    ) {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let base = estimator.estimate(&[
            Transaction::revenue(revenue, day()),
            Transaction::expense(expenses, day()),
        ]);
        let raised = estimator.estimate(&[
            Transaction::revenue(revenue + extra, day()),
            Transaction::expense(expenses, day()),
        ]);

        prop_assert!(raised.net_tax >= base.net_tax);
        prop_assert!(raised.taxable_income >= base.taxable_income);
    }

    #[test]
    fn effective_rate_never_exceeds_top_marginal_rate(transactions in transactions_strategy()) {
        let table = TaxTable::sa_2025();
        let estimate = IncomeTaxEstimator::new(&table).estimate(&transactions);

        prop_assert!(estimate.effective_rate >= Decimal::ZERO);
        prop_assert!(estimate.effective_rate <= Decimal::new(45, 0));
    }

    #[test]
    fn transaction_order_does_not_matter(mut transactions in transactions_strategy()) {
        let table = TaxTable::sa_2025();
        let estimator = IncomeTaxEstimator::new(&table);

        let forward = estimator.estimate(&transactions);
        transactions.reverse();
        let backward = estimator.estimate(&transactions);

        prop_assert_eq!(forward, backward);
    }
}
