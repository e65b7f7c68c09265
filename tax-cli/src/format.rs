use rust_decimal::{Decimal, RoundingStrategy};
use tax_core::calculations::common::{normalize_amount, round_half_up};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a money amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a rand amount typed by a person.
///
/// Accepts `1234.56`, `1,234.56`, `R 1 234,56` and `R1234`.
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Groups the digits of a non-negative integer string in threes with spaces.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// South African rand display: `R 1 234 567,89`, negatives as `-R 12,00`.
pub fn format_rand(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R {},{cents}", group_thousands(whole))
}

/// Whole-rand figure without symbol or cents, as used in rate tables.
pub fn format_whole(amount: Decimal) -> String {
    let whole = amount.trunc().abs().to_string();
    group_thousands(&whole)
}

/// Percentage with one decimal place, e.g. `17.3%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

/// Marginal rate as a bare percentage, e.g. `0.31` becomes `31%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
