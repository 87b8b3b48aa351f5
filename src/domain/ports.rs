use crate::domain::model::{Account, CallerIdentity, FileSystemRecord, Page};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn regions(&self) -> &[String];
    fn account_filter_marker(&self) -> &str;
    fn role_name(&self) -> &str;
    fn partition(&self) -> &str;
    fn fallback_to_caller(&self) -> bool;
    fn output_prefix(&self) -> &str;
}

/// 雲端 API 的唯讀入口。`Session` 由實作決定：AWS 實作是 `SdkConfig`，
/// 模擬與測試實作則是輕量值。
#[async_trait]
pub trait CloudProvider: Send + Sync {
    type Session: Clone + Send + Sync;

    /// 模擬模式：不發出任何網路請求，只回傳固定範例資料
    fn is_simulated(&self) -> bool {
        false
    }

    /// 建立呼叫者本身的 session 並以身分查詢驗證
    async fn connect(&self, profile: Option<&str>) -> Result<(Self::Session, CallerIdentity)>;

    async fn list_accounts_page(
        &self,
        session: &Self::Session,
        next_token: Option<String>,
    ) -> Result<Page<Account>>;

    async fn assume_role(
        &self,
        session: &Self::Session,
        role_arn: &str,
        session_name: &str,
    ) -> Result<Self::Session>;

    async fn describe_file_systems_page(
        &self,
        session: &Self::Session,
        region: &str,
        next_token: Option<String>,
    ) -> Result<Page<FileSystemRecord>>;
}
