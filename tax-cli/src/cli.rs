use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tax_core::{
    DashboardSummary, IncomeTaxEstimator, TaxTable, TaxYear, filter_tax_year, monthly_totals,
};
use tax_data::{load_from_file, load_table_from_file};
use tracing::{debug, info};

use crate::{format::parse_amount, report};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Income tax, provisional tax and VAT estimator for South African freelancers.
///
/// Reads revenue and expense transactions from CSV and applies the
/// individual income tax table for the tax year.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also append log output to this file.
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate income tax, provisional payments and VAT position.
    Estimate {
        /// Transactions CSV file.
        #[arg(short, long, value_name = "FILE")]
        transactions: PathBuf,

        /// TOML tax table; the built-in 2025 table when omitted.
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,

        /// Only count transactions dated inside this tax year (e.g. 2025 for 2024/25).
        #[arg(long, value_name = "YEAR")]
        tax_year: Option<i32>,
    },

    /// Revenue, expenses, profit and set-aside with monthly totals.
    Dashboard {
        /// Transactions CSV file.
        #[arg(short, long, value_name = "FILE")]
        transactions: PathBuf,
    },

    /// Print the tax rates table.
    Brackets {
        /// TOML tax table; the built-in 2025 table when omitted.
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,
    },

    /// Tax on a single taxable income amount.
    Income {
        /// Taxable income, e.g. `400000`, `1,234.56` or `R 1 234,56`.
        amount: String,

        /// TOML tax table; the built-in 2025 table when omitted.
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn load_table(path: Option<&Path>) -> Result<TaxTable> {
    match path {
        Some(path) => load_table_from_file(path)
            .with_context(|| format!("loading tax table from '{}'", path.display())),
        None => {
            debug!("using built-in 2025 tax table");
            Ok(TaxTable::sa_2025())
        }
    }
}

fn load_transactions(path: &Path) -> Result<Vec<tax_core::Transaction>> {
    let transactions = load_from_file(path)
        .with_context(|| format!("loading transactions from '{}'", path.display()))?;
    info!(count = transactions.len(), path = %path.display(), "loaded transactions");
    Ok(transactions)
}

/// Runs the selected subcommand and returns the report to print.
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Estimate {
            transactions,
            table,
            tax_year,
        } => {
            let table = load_table(table.as_deref())?;
            let mut transactions = load_transactions(transactions)?;
            if let Some(year) = tax_year {
                let year = TaxYear(*year);
                transactions = filter_tax_year(&transactions, year);
                info!(
                    tax_year = %year.display(),
                    count = transactions.len(),
                    "filtered transactions to tax year"
                );
            }

            let estimate = IncomeTaxEstimator::new(&table).estimate(&transactions);
            Ok(report::render_estimate(&estimate, &table)?)
        }
        Command::Dashboard { transactions } => {
            let transactions = load_transactions(transactions)?;
            let summary = DashboardSummary::from_transactions(&transactions);
            Ok(report::render_dashboard(
                &summary,
                &monthly_totals(&transactions),
            )?)
        }
        Command::Brackets { table } => {
            let table = load_table(table.as_deref())?;
            Ok(report::render_brackets(&table)?)
        }
        Command::Income { amount, table } => {
            let table = load_table(table.as_deref())?;
            let income = parse_amount(amount)?;
            let (gross_tax, net_tax) = IncomeTaxEstimator::new(&table).tax_on_income(income);
            Ok(report::render_income(income, gross_tax, net_tax)?)
        }
    }
}
