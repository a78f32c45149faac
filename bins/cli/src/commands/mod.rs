//! CLI command handlers.

pub mod config;
pub mod info;
pub mod purchase;

pub use config::{run_config_show, run_config_validate};
pub use info::run_info;
pub use purchase::{PurchaseArgs, run_purchase, run_quote};
