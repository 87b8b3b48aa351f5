use crate::core::accounts::AccountLister;
use crate::core::auth::authenticate;
use crate::core::reporter::Reporter;
use crate::core::scanner::Scanner;
use crate::domain::model::RunSummary;
use crate::domain::ports::{CloudProvider, ConfigProvider, Storage};
use crate::utils::error::{InventoryError, Result};
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Local};

const BANNER_WIDTH: usize = 60;

/// 驗證 → 列出帳號 → 逐帳號掃描 → 輸出，單向依序執行
pub struct InventoryEngine<P: CloudProvider, S: Storage, C: ConfigProvider> {
    provider: P,
    reporter: Reporter<S>,
    config: C,
    profile: Option<String>,
    monitor: SystemMonitor,
}

impl<P: CloudProvider, S: Storage, C: ConfigProvider> InventoryEngine<P, S, C> {
    pub fn new(provider: P, storage: S, config: C) -> Self {
        Self::new_with_monitoring(provider, storage, config, false)
    }

    pub fn new_with_monitoring(provider: P, storage: S, config: C, monitor_enabled: bool) -> Self {
        let reporter = Reporter::new(storage, config.output_prefix());
        Self {
            provider,
            reporter,
            config,
            profile: None,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_at(Local::now()).await
    }

    /// 以指定時間戳命名輸出檔
    pub async fn run_at(&self, timestamp: DateTime<Local>) -> Result<RunSummary> {
        let dry_run = self.provider.is_simulated();

        tracing::info!("{}", "=".repeat(BANNER_WIDTH));
        tracing::info!("AWS GovCloud FSX Inventory");
        if dry_run {
            tracing::info!("[DRY-RUN MODE - No actual AWS API calls will be made]");
        }
        tracing::info!("{}", "=".repeat(BANNER_WIDTH));

        let session = authenticate(&self.provider, self.profile.as_deref()).await?;
        self.monitor.log_stage("Authenticate");

        let accounts = AccountLister::new(&self.provider, self.config.account_filter_marker())
            .list(&session)
            .await;
        self.monitor.log_stage("List accounts");
        if accounts.is_empty() {
            return Err(InventoryError::NoAccounts);
        }

        let scan = Scanner::new(&self.provider, &self.config)
            .scan_accounts(&session, &accounts)
            .await;
        self.monitor.log_stage("Scan accounts");
        if !scan.fallback_accounts.is_empty() {
            tracing::warn!(
                "⚠ {} account(s) were scanned with the caller's credentials: {}",
                scan.fallback_accounts.len(),
                scan.fallback_accounts.join(", ")
            );
        }

        let file_name = self.reporter.file_name(&timestamp);
        let output_path = if dry_run {
            self.reporter.preview(&scan.rows, &file_name);
            None
        } else {
            Some(self.reporter.write(&scan.rows, &file_name).await?)
        };
        self.monitor.log_stage("Report");

        tracing::info!("{}", "=".repeat(BANNER_WIDTH));
        tracing::info!("Scan complete!");
        tracing::info!("{}", "=".repeat(BANNER_WIDTH));
        self.monitor.log_final_stats();

        Ok(RunSummary {
            accounts_listed: accounts.len(),
            accounts_scanned: scan.accounts_scanned,
            accounts_skipped: scan.accounts_skipped,
            rows: scan.rows.len(),
            output_path,
        })
    }
}
