//! Tax and bookkeeping calculations over transaction lists.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared state.

pub mod common;
pub mod dashboard;
pub mod income_tax;

pub use dashboard::{DashboardSummary, MonthlyTotal, monthly_totals};
pub use income_tax::IncomeTaxEstimator;
