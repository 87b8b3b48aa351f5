use crate::domain::model::{Account, FileSystemRecord, InventoryRow};
use crate::domain::ports::{CloudProvider, ConfigProvider};
use crate::utils::error::InventoryError;

pub fn role_arn(partition: &str, account_id: &str, role_name: &str) -> String {
    format!("arn:{}:iam::{}:role/{}", partition, account_id, role_name)
}

pub fn role_session_name(account_id: &str) -> String {
    format!("fsx-inventory-{}", account_id)
}

/// 掃描結果：所有帳號的資料列與統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub rows: Vec<InventoryRow>,
    pub accounts_scanned: usize,
    pub accounts_skipped: usize,
    pub fallback_accounts: Vec<String>,
}

enum AccountSession<S> {
    Assumed(S),
    Fallback(S),
    Skipped,
}

pub struct Scanner<'a, P: CloudProvider, C: ConfigProvider> {
    provider: &'a P,
    config: &'a C,
}

impl<'a, P: CloudProvider, C: ConfigProvider> Scanner<'a, P, C> {
    pub fn new(provider: &'a P, config: &'a C) -> Self {
        Self { provider, config }
    }

    /// 逐一掃描帳號；單一帳號或區域失敗不會中斷其他帳號
    pub async fn scan_accounts(&self, caller: &P::Session, accounts: &[Account]) -> ScanReport {
        tracing::info!("→ Scanning accounts for FSX file systems...");
        let mut report = ScanReport::default();

        for account in accounts {
            tracing::info!("  Processing: {} ({})", account.name, account.id);

            let session = match self.session_for(caller, account).await {
                AccountSession::Assumed(session) => session,
                AccountSession::Fallback(session) => {
                    report.fallback_accounts.push(account.id.clone());
                    session
                }
                AccountSession::Skipped => {
                    report.accounts_skipped += 1;
                    continue;
                }
            };

            let records = self.scan_account(&session).await;
            report.accounts_scanned += 1;

            if records.is_empty() {
                tracing::info!("  ℹ No FSX file systems found");
            }
            report
                .rows
                .extend(records.iter().map(|record| InventoryRow::new(account, record)));
        }

        report
    }

    async fn session_for(&self, caller: &P::Session, account: &Account) -> AccountSession<P::Session> {
        let arn = role_arn(self.config.partition(), &account.id, self.config.role_name());

        if self.provider.is_simulated() {
            tracing::info!("  [DRY-RUN] Would assume role: {}", arn);
        } else {
            tracing::debug!("Assuming role {}", arn);
        }

        match self
            .provider
            .assume_role(caller, &arn, &role_session_name(&account.id))
            .await
        {
            Ok(session) => AccountSession::Assumed(session),
            Err(e) => {
                let code = e.code().unwrap_or("Unknown");
                tracing::warn!("  ⚠ Cannot assume role in account {}: {}", account.id, code);
                if self.config.fallback_to_caller() {
                    tracing::warn!(
                        "  ⚠ Scanning account {} with the caller's own credentials; results may belong to the caller's account",
                        account.id
                    );
                    AccountSession::Fallback(caller.clone())
                } else {
                    tracing::warn!("  ⚠ Skipping account {}", account.id);
                    AccountSession::Skipped
                }
            }
        }
    }

    /// 依序查詢每個區域；區域錯誤只記錄，不往上傳
    pub async fn scan_account(&self, session: &P::Session) -> Vec<FileSystemRecord> {
        let regions = self.config.regions();
        if self.provider.is_simulated() {
            tracing::info!("  [DRY-RUN] Would query FSX in regions: {}", regions.join(", "));
        }

        let mut records = Vec::new();
        for region in regions {
            let (found, error) = self.scan_region(session, region).await;

            if let Some(e) = error {
                if e.is_access_denied() {
                    tracing::debug!("Access denied querying FSX in {}: {}", region, e);
                } else {
                    tracing::warn!(
                        "  ⚠ Error querying FSX in {}: {}",
                        region,
                        e.code().unwrap_or("Unknown")
                    );
                }
            }

            if !found.is_empty() {
                tracing::info!("  ✓ Found {} FSX system(s) in {}", found.len(), region);
            }
            records.extend(found);
        }

        records
    }

    /// 讀取單一區域的所有分頁，發生錯誤時保留已取得的資料
    async fn scan_region(
        &self,
        session: &P::Session,
        region: &str,
    ) -> (Vec<FileSystemRecord>, Option<InventoryError>) {
        let mut records = Vec::new();
        let mut next_token = None;

        loop {
            match self
                .provider
                .describe_file_systems_page(session, region, next_token.take())
                .await
            {
                Ok(page) => {
                    records.extend(page.items);
                    match page.next_token {
                        Some(token) => next_token = Some(token),
                        None => return (records, None),
                    }
                }
                Err(e) => return (records, Some(e)),
            }
        }
    }
}
