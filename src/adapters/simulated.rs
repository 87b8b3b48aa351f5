use crate::domain::model::{Account, CallerIdentity, FileSystemRecord, Page};
use crate::domain::ports::CloudProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

pub const MOCK_CALLER_ARN: &str = "arn:aws:iam::123456789012:user/mock-user";
pub const MOCK_CALLER_ACCOUNT: &str = "123456789012";

pub fn mock_accounts() -> Vec<Account> {
    [
        ("987654321098", "Production-GovCloud", "govcloud-prod@example.com"),
        ("876543210987", "Development-GovCloud", "govcloud-dev@example.com"),
        ("765432109876", "Test-GovCloud", "govcloud-test@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| Account {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        status: "ACTIVE".to_string(),
    })
    .collect()
}

pub fn mock_file_systems(region: &str) -> Vec<FileSystemRecord> {
    [
        ("fs-0123456789abcdef0", "LUSTRE", (2024, 1, 15)),
        ("fs-abcdef0123456789", "WINDOWS", (2024, 2, 20)),
    ]
    .into_iter()
    .map(|(id, fs_type, (y, m, d))| FileSystemRecord {
        filesystem_id: id.to_string(),
        filesystem_type: fs_type.to_string(),
        region: region.to_string(),
        creation_time: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single(),
        lifecycle_state: "AVAILABLE".to_string(),
    })
    .collect()
}

/// 模擬 session：呼叫者本身或某個角色
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedSession {
    Caller,
    Role(String),
}

/// 乾跑模式用的雲端實作，不發出任何網路請求。
/// 範例檔案系統全部放在 `fixture_region`，其他區域回傳空結果。
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    fixture_region: String,
}

impl SimulatedProvider {
    pub fn new(fixture_region: impl Into<String>) -> Self {
        Self {
            fixture_region: fixture_region.into(),
        }
    }
}

#[async_trait]
impl CloudProvider for SimulatedProvider {
    type Session = SimulatedSession;

    fn is_simulated(&self) -> bool {
        true
    }

    async fn connect(&self, _profile: Option<&str>) -> Result<(SimulatedSession, CallerIdentity)> {
        Ok((
            SimulatedSession::Caller,
            CallerIdentity {
                arn: MOCK_CALLER_ARN.to_string(),
                account: MOCK_CALLER_ACCOUNT.to_string(),
                user_id: "AIDAMOCKUSER".to_string(),
            },
        ))
    }

    async fn list_accounts_page(
        &self,
        _session: &SimulatedSession,
        _next_token: Option<String>,
    ) -> Result<Page<Account>> {
        Ok(Page::last(mock_accounts()))
    }

    async fn assume_role(
        &self,
        _session: &SimulatedSession,
        role_arn: &str,
        _session_name: &str,
    ) -> Result<SimulatedSession> {
        Ok(SimulatedSession::Role(role_arn.to_string()))
    }

    async fn describe_file_systems_page(
        &self,
        _session: &SimulatedSession,
        region: &str,
        _next_token: Option<String>,
    ) -> Result<Page<FileSystemRecord>> {
        if region == self.fixture_region {
            Ok(Page::last(mock_file_systems(region)))
        } else {
            Ok(Page::last(Vec::new()))
        }
    }
}
