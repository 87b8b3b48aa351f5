pub mod accounts;
pub mod auth;
pub mod engine;
pub mod reporter;
pub mod scanner;

pub use crate::domain::model::{Account, FileSystemRecord, InventoryRow, Page, RunSummary};
pub use crate::domain::ports::{CloudProvider, ConfigProvider, Storage};
pub use crate::utils::error::Result;
