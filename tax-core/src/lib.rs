pub mod calculations;
pub mod models;

pub use calculations::{DashboardSummary, IncomeTaxEstimator, MonthlyTotal, monthly_totals};
pub use models::*;
