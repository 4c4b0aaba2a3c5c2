pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{csv_loader::CsvLoader, role_service::XmlmcRoleService, xmlmc::XmlmcSession};
pub use config::RunConfig;
pub use core::{engine::RemovalEngine, processor::BatchProcessor};
pub use utils::error::{RemoverError, Result};
