//! Plain-text rendering of estimates, dashboards and rate tables.
//!
//! Every renderer returns the finished text so callers decide where it goes.

use std::fmt::{self, Write};

use rust_decimal::Decimal;
use tax_core::{DashboardSummary, MonthlyTotal, TaxBracket, TaxEstimate, TaxTable, TaxYear};

use crate::format::{format_percent, format_rand, format_rate, format_whole};

const LABEL_WIDTH: usize = 26;

fn line(
    out: &mut String,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(out, "  {label:<LABEL_WIDTH$}{value:>18}")
}

/// "237 101 – 370 500" / "1 817 001 and above" range label for a band.
fn bracket_range(
    index: usize,
    bracket: &TaxBracket,
) -> String {
    let from = if index == 0 {
        Decimal::ONE
    } else if bracket.min_income.fract().is_zero() {
        bracket.min_income + Decimal::ONE
    } else {
        bracket.min_income
    };

    match bracket.max_income {
        Some(max) => format!("{} – {}", format_whole(from), format_whole(max)),
        None => format!("{} and above", format_whole(from)),
    }
}

/// "42 678 + 26% of taxable income above 237 100" style description.
fn bracket_rule(bracket: &TaxBracket) -> String {
    if bracket.base_tax.is_zero() && bracket.min_income.is_zero() {
        format!("{} of taxable income", format_rate(bracket.tax_rate))
    } else {
        format!(
            "{} + {} of taxable income above {}",
            format_whole(bracket.base_tax),
            format_rate(bracket.tax_rate),
            format_whole(bracket.min_income)
        )
    }
}

pub fn render_estimate(
    estimate: &TaxEstimate,
    table: &TaxTable,
) -> Result<String, fmt::Error> {
    let config = table.config();
    let mut out = String::new();

    writeln!(
        out,
        "Tax Estimator (SA {} tax year)\n",
        TaxYear(estimate.tax_year).display()
    )?;

    line(&mut out, "Gross Income", &format_rand(estimate.total_revenue))?;
    line(&mut out, "Allowable Deductions", &format_rand(estimate.total_expenses))?;
    line(&mut out, "Taxable Income", &format_rand(estimate.taxable_income))?;
    line(&mut out, "Gross Tax", &format_rand(estimate.gross_tax))?;
    line(&mut out, "Primary Rebate", &format_rand(config.primary_rebate))?;
    line(&mut out, "Estimated Tax Payable", &format_rand(estimate.net_tax))?;
    line(&mut out, "Effective Rate", &format_percent(estimate.effective_rate))?;

    if let Some(bracket) = table.brackets().get(estimate.bracket_index) {
        writeln!(
            out,
            "  Bracket: {} ({})",
            bracket_range(estimate.bracket_index, bracket),
            bracket_rule(bracket)
        )?;
    }
    if estimate.below_tax_threshold {
        writeln!(
            out,
            "  Taxable income is within the {} tax threshold.",
            format_rand(config.tax_threshold)
        )?;
    }

    let payments = estimate.provisional_payments();
    writeln!(out, "\nProvisional Tax Breakdown")?;
    line(&mut out, "1st Period (Due August)", &format_rand(payments.first_period))?;
    line(&mut out, "2nd Period (Due February)", &format_rand(payments.second_period))?;

    writeln!(out, "\nVAT Monitor")?;
    line(
        &mut out,
        "Turnover",
        &format!(
            "{} / {}",
            format_rand(estimate.total_revenue),
            format_rand(config.vat_threshold)
        ),
    )?;
    line(&mut out, "Progress", &format_percent(estimate.vat_progress_percent))?;
    if estimate.vat_registration_required {
        writeln!(
            out,
            "  You have exceeded the threshold. You must register for VAT."
        )?;
    }

    Ok(out)
}

pub fn render_dashboard(
    summary: &DashboardSummary,
    months: &[MonthlyTotal],
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Dashboard\n")?;
    line(&mut out, "Total Revenue", &format_rand(summary.total_revenue))?;
    line(&mut out, "Total Expenses", &format_rand(summary.total_expenses))?;
    line(&mut out, "Net Profit", &format_rand(summary.net_profit))?;
    line(
        &mut out,
        &format!("Tax Set-Aside ({})", format_rate(summary.set_aside_rate)),
        &format_rand(summary.set_aside),
    )?;

    writeln!(out, "\nMonthly Totals")?;
    if months.is_empty() {
        writeln!(out, "  No transactions.")?;
    }
    for month in months {
        writeln!(
            out,
            "  {:<8}{:>18}{:>18}",
            month.label(),
            format_rand(month.revenue),
            format_rand(month.expenses)
        )?;
    }

    Ok(out)
}

pub fn render_brackets(table: &TaxTable) -> Result<String, fmt::Error> {
    let config = table.config();
    let mut out = String::new();

    writeln!(
        out,
        "{} Tax Rates (Individuals)\n",
        TaxYear(table.tax_year()).display()
    )?;
    writeln!(out, "  {:<24}{}", "Taxable Income (R)", "Rates of Tax (R)")?;
    for (index, bracket) in table.brackets().iter().enumerate() {
        writeln!(
            out,
            "  {:<24}{}",
            bracket_range(index, bracket),
            bracket_rule(bracket)
        )?;
    }
    writeln!(
        out,
        "\n  * Primary Rebate: {} (deducted from tax payable) | Tax Threshold: {}",
        format_rand(config.primary_rebate),
        format_rand(config.tax_threshold)
    )?;

    Ok(out)
}

pub fn render_income(
    taxable_income: Decimal,
    gross_tax: Decimal,
    net_tax: Decimal,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    line(&mut out, "Taxable Income", &format_rand(taxable_income))?;
    line(&mut out, "Gross Tax", &format_rand(gross_tax))?;
    line(&mut out, "Estimated Tax Payable", &format_rand(net_tax))?;

    Ok(out)
}
