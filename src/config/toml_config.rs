use crate::domain::ports::ConfigProvider;
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ROLE_NAME: &str = "OrganizationAccountAccessRole";
pub const DEFAULT_ACCOUNT_FILTER_MARKER: &str = "govcloud";
pub const DEFAULT_PARTITION: &str = "aws-us-gov";
pub const DEFAULT_HOME_REGION: &str = "us-gov-west-1";
pub const DEFAULT_OUTPUT_PREFIX: &str = "govcloud_fsx_inventory";
pub const DEFAULT_REGIONS: [&str; 2] = ["us-gov-west-1", "us-gov-east-1"];

/// 盤點設定。所有欄位皆有預設值，TOML 檔案只需覆寫想改的部分：
///
/// ```toml
/// [scan]
/// regions = ["us-gov-west-1"]
/// role_name = "${INVENTORY_ROLE}"
///
/// [output]
/// directory = "./reports"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub regions: Vec<String>,
    pub account_filter_marker: String,
    pub role_name: String,
    /// ARN 分區，GovCloud 為 `aws-us-gov`
    pub partition: String,
    /// 設定檔與環境都沒有區域時，STS / Organizations 使用的區域
    pub home_region: String,
    /// 無法切換角色時改用呼叫者自己的 session 掃描
    pub fallback_to_caller: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            account_filter_marker: DEFAULT_ACCOUNT_FILTER_MARKER.to_string(),
            role_name: DEFAULT_ROLE_NAME.to_string(),
            partition: DEFAULT_PARTITION.to_string(),
            home_region: DEFAULT_HOME_REGION.to_string(),
            fallback_to_caller: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl InventoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InventoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InventoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INVENTORY_ROLE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InventoryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_directory(&self) -> &str {
        &self.output.directory
    }

    pub fn home_region(&self) -> &str {
        &self.scan.home_region
    }
}

impl ConfigProvider for InventoryConfig {
    fn regions(&self) -> &[String] {
        &self.scan.regions
    }

    fn account_filter_marker(&self) -> &str {
        &self.scan.account_filter_marker
    }

    fn role_name(&self) -> &str {
        &self.scan.role_name
    }

    fn partition(&self) -> &str {
        &self.scan.partition
    }

    fn fallback_to_caller(&self) -> bool {
        self.scan.fallback_to_caller
    }

    fn output_prefix(&self) -> &str {
        &self.output.prefix
    }
}

impl Validate for InventoryConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_regions("scan.regions", &self.scan.regions)?;
        validation::validate_non_empty_string(
            "scan.account_filter_marker",
            &self.scan.account_filter_marker,
        )?;
        validation::validate_role_name("scan.role_name", &self.scan.role_name)?;
        validation::validate_non_empty_string("scan.partition", &self.scan.partition)?;
        validation::validate_aws_region("scan.home_region", &self.scan.home_region)?;
        validation::validate_path("output.directory", &self.output.directory)?;
        validation::validate_file_prefix("output.prefix", &self.output.prefix)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
