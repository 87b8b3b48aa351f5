pub mod cli;
pub mod toml_config;

pub use toml_config::InventoryConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "govcloud-fsx-inventory")]
#[command(about = "List FSX file systems from GovCloud accounts in an AWS Organization")]
#[command(after_help = "Examples:
  govcloud-fsx-inventory --profile my-commercial-account
  govcloud-fsx-inventory --profile my-commercial-account --dry-run
  govcloud-fsx-inventory --dry-run --role-name CustomRoleName")]
pub struct CliConfig {
    /// AWS CLI profile name to use
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Simulate the operations without making actual AWS API calls
    #[arg(long)]
    pub dry_run: bool,

    /// IAM role name to assume in target accounts (default: OrganizationAccountAccessRole)
    #[arg(short, long)]
    pub role_name: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the CSV report is written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Regions to scan (comma separated, overrides the GovCloud defaults)
    #[arg(long = "region", value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Skip accounts whose role cannot be assumed instead of scanning with the caller's session
    #[arg(long)]
    pub no_fallback: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log CPU / memory usage after each stage
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 → 設定檔 → 命令列參數，依序覆蓋
    pub fn load_config(&self) -> Result<InventoryConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                InventoryConfig::from_file(path)?
            }
            None => InventoryConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut InventoryConfig) {
        if let Some(role_name) = &self.role_name {
            config.scan.role_name = role_name.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if !self.regions.is_empty() {
            config.scan.regions = self.regions.clone();
        }
        if self.no_fallback {
            config.scan.fallback_to_caller = false;
        }
    }
}
