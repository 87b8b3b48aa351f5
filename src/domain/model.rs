use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CSV 欄位順序固定為六欄
pub const CSV_HEADERS: [&str; 6] = [
    "Organization Name",
    "GovCloud Account ID",
    "FSX ID",
    "FSX Type",
    "Region",
    "Lifecycle",
];

pub const ACTIVE_STATUS: &str = "ACTIVE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub arn: String,
    pub account: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }

    /// 名稱或 email 含有標記字串（不分大小寫）
    pub fn matches_marker(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.name.to_lowercase().contains(&marker) || self.email.to_lowercase().contains(&marker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystemRecord {
    pub filesystem_id: String,
    pub filesystem_type: String,
    pub region: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub lifecycle_state: String,
}

/// 匯出用的扁平資料列，欄位名稱即 CSV 標頭
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "Organization Name")]
    pub organization_name: String,
    #[serde(rename = "GovCloud Account ID")]
    pub account_id: String,
    #[serde(rename = "FSX ID")]
    pub filesystem_id: String,
    #[serde(rename = "FSX Type")]
    pub filesystem_type: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Lifecycle")]
    pub lifecycle_state: String,
}

impl InventoryRow {
    pub fn new(account: &Account, record: &FileSystemRecord) -> Self {
        Self {
            organization_name: account.name.clone(),
            account_id: account.id.clone(),
            filesystem_id: record.filesystem_id.clone(),
            filesystem_type: record.filesystem_type.clone(),
            region: record.region.clone(),
            lifecycle_state: record.lifecycle_state.clone(),
        }
    }
}

/// 分頁 API 的單頁結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    pub fn with_next(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }
}

/// 一次執行的統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub accounts_listed: usize,
    pub accounts_scanned: usize,
    pub accounts_skipped: usize,
    pub rows: usize,
    pub output_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, email: &str, status: &str) -> Account {
        Account {
            id: "111111111111".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        assert!(account("Prod-GOVCLOUD", "ops@example.com", "SUSPENDED").matches_marker("govcloud"));
        assert!(account("Prod", "GovCloud-ops@example.com", "SUSPENDED").matches_marker("govcloud"));
        assert!(!account("Prod", "ops@example.com", "ACTIVE").matches_marker("govcloud"));
    }

    #[test]
    fn test_row_joins_account_and_record() {
        let acc = account("Test-GovCloud", "t@example.com", "ACTIVE");
        let record = FileSystemRecord {
            filesystem_id: "fs-1".to_string(),
            filesystem_type: "ONTAP".to_string(),
            region: "us-gov-east-1".to_string(),
            creation_time: None,
            lifecycle_state: "CREATING".to_string(),
        };

        let row = InventoryRow::new(&acc, &record);
        assert_eq!(row.organization_name, "Test-GovCloud");
        assert_eq!(row.account_id, "111111111111");
        assert_eq!(row.filesystem_id, "fs-1");
        assert_eq!(row.filesystem_type, "ONTAP");
        assert_eq!(row.region, "us-gov-east-1");
        assert_eq!(row.lifecycle_state, "CREATING");
    }
}
