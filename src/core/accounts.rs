use crate::domain::model::Account;
use crate::domain::ports::CloudProvider;
use crate::utils::error::Result;

/// 保留名稱/email 含標記字串，或狀態為 ACTIVE 的帳號，維持 API 回傳順序
pub fn filter_accounts(accounts: impl IntoIterator<Item = Account>, marker: &str) -> Vec<Account> {
    accounts
        .into_iter()
        .filter(|account| account.matches_marker(marker) || account.is_active())
        .collect()
}

pub struct AccountLister<'a, P: CloudProvider> {
    provider: &'a P,
    marker: &'a str,
}

impl<'a, P: CloudProvider> AccountLister<'a, P> {
    pub fn new(provider: &'a P, marker: &'a str) -> Self {
        Self { provider, marker }
    }

    /// 讀完所有分頁後過濾
    pub async fn fetch_all(&self, session: &P::Session) -> Result<Vec<Account>> {
        let mut accounts = Vec::new();
        let mut next_token = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .provider
                .list_accounts_page(session, next_token.take())
                .await?;
            pages += 1;
            tracing::debug!("ListAccounts page {}: {} account(s)", pages, page.items.len());
            accounts.extend(filter_accounts(page.items, self.marker));

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        Ok(accounts)
    }

    /// 失敗時記錄提示並回傳空清單，由呼叫端決定是否中止
    pub async fn list(&self, session: &P::Session) -> Vec<Account> {
        if self.provider.is_simulated() {
            tracing::info!("→ [DRY-RUN] Would list accounts in organization...");
            tracing::info!("  [DRY-RUN] API Call: organizations.list_accounts()");
        } else {
            tracing::info!("→ Listing accounts in organization...");
        }

        match self.fetch_all(session).await {
            Ok(accounts) => {
                if self.provider.is_simulated() {
                    tracing::info!("✓ [DRY-RUN] Would find {} account(s)", accounts.len());
                } else {
                    tracing::info!("✓ Found {} account(s)", accounts.len());
                }
                for account in &accounts {
                    tracing::info!("  - {} ({})", account.name, account.id);
                }
                accounts
            }
            Err(e) if e.is_access_denied() => {
                tracing::error!("❌ {}", e.user_friendly_message());
                tracing::error!("💡 {}", e.recovery_suggestion());
                Vec::new()
            }
            Err(e) => {
                tracing::error!("❌ Failed to list accounts: {}", e);
                Vec::new()
            }
        }
    }
}
