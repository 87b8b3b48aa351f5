pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, InventoryConfig};

pub use adapters::{aws::AwsProvider, simulated::SimulatedProvider};
pub use core::engine::InventoryEngine;
pub use utils::error::{InventoryError, Result};
