//! Shared arithmetic helpers for the calculators.
//!
//! Calculations keep full precision; the rounding helpers here are meant for
//! the presentation edge only.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Transaction, TransactionType};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage for display. Same strategy as [`round_half_up`].
pub fn round_percent(value: Decimal) -> Decimal {
    round_half_up(value)
}

/// Clamps negative values to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-10)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(10)), dec!(10));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Expresses `part` as a percentage of `whole`.
///
/// # Arguments
///
/// * `part` - The amount being measured, e.g. turnover to date
/// * `whole` - The reference amount, e.g. the VAT registration threshold
///
/// # Returns
///
/// `part / whole * 100` at full precision, or zero when `whole` is not
/// positive. Overflow saturates at [`Decimal::MAX`] instead of panicking.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(500000), dec!(1000000)), dec!(50));
/// assert_eq!(percent_of(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .unwrap_or(Decimal::MAX)
        .saturating_mul(ONE_HUNDRED)
}

/// Sums the amounts of every transaction of `kind`.
///
/// # Arguments
///
/// * `transactions` - The transactions to scan, in any order
/// * `kind` - Which side of the books to total
///
/// # Returns
///
/// The total amount, or zero when no transaction matches. Additions
/// saturate rather than overflow.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::sum_of_kind;
/// use tax_core::{Transaction, TransactionType};
///
/// let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let transactions = [
///     Transaction::revenue(dec!(1000), day),
///     Transaction::expense(dec!(250), day),
/// ];
///
/// assert_eq!(sum_of_kind(&transactions, TransactionType::Revenue), dec!(1000));
/// assert_eq!(sum_of_kind(&transactions, TransactionType::Expense), dec!(250));
/// ```
pub fn sum_of_kind(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .fold(Decimal::ZERO, |sum, t| sum.saturating_add(t.amount))
}

/// Strips the currency symbol and spaces from an amount, then settles what
/// the comma means.
///
/// A lone comma followed by one or two trailing digits (`1 234,56`) is a
/// decimal separator; any other comma is a thousands separator. The result
/// is left for [`Decimal`]'s parser and may still be invalid.
///
/// # Arguments
///
/// * `input` - Amount as typed or exported, e.g. `R 1 234,56` or `1,234.56`
///
/// # Returns
///
/// Plain decimal text with a `.` separator, or an empty string for blank
/// input.
///
/// # Examples
///
/// ```
/// use tax_core::calculations::common::normalize_amount;
///
/// assert_eq!(normalize_amount("R 1 234,56"), "1234.56");
/// assert_eq!(normalize_amount("1,234.56"), "1234.56");
/// assert_eq!(normalize_amount("450,00"), "450.00");
/// assert_eq!(normalize_amount("1,234,567"), "1234567");
/// ```
pub fn normalize_amount(input: &str) -> String {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix('R')
        .or_else(|| trimmed.strip_prefix('r'))
        .unwrap_or(trimmed);
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let decimal_comma = !compact.contains('.')
        && compact.matches(',').count() == 1
        && compact
            .rsplit_once(',')
            .is_some_and(|(_, tail)| (1..=2).contains(&tail.len()));

    if decimal_comma {
        compact.replace(',', ".")
    } else {
        compact.replace(',', "")
    }
}
