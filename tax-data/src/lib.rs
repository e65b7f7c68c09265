//! Loaders that turn files into `tax-core` models.
//!
//! - [`transactions`]: transaction lists from CSV.
//! - [`table`]: tax-year tables from TOML.

pub mod table;
pub mod transactions;

pub use table::{TaxTableLoadError, load_table_from_file, load_table_from_str};
pub use transactions::{TransactionLoadError, load_from_file, load_from_str};
