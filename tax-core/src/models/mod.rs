mod tax_bracket;
mod tax_estimate;
mod tax_table;
mod tax_year;
mod tax_year_config;
mod transaction;

pub use tax_bracket::TaxBracket;
pub use tax_estimate::{ProvisionalPayments, TaxEstimate};
pub use tax_table::{TaxTable, TaxTableError};
pub use tax_year::{TaxYear, filter_tax_year};
pub use tax_year_config::TaxYearConfig;
pub use transaction::{Transaction, TransactionType};
