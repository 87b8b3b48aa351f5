use crate::domain::model::{Account, CallerIdentity, FileSystemRecord, Page};
use crate::domain::ports::CloudProvider;
use crate::utils::error::{InventoryError, Result};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};
use std::time::SystemTime;

const UNKNOWN_STATUS: &str = "UNKNOWN";

/// 將 SDK 錯誤轉成 `InventoryError`，保留 AWS 錯誤碼
fn service_error<E>(operation: &str, err: E) -> InventoryError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    InventoryError::from_service(operation, err.code(), Some(message.as_str()))
}

fn to_chrono(time: &aws_sdk_fsx::primitives::DateTime) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(time.secs(), time.subsec_nanos())
}

/// 透過 AWS SDK 存取 STS、Organizations 與 FSx。所有呼叫都關閉 SDK 內建重試。
#[derive(Debug, Clone)]
pub struct AwsProvider {
    home_region: String,
    endpoint_url: Option<String>,
}

impl AwsProvider {
    pub fn new(home_region: impl Into<String>) -> Self {
        Self {
            home_region: home_region.into(),
            endpoint_url: None,
        }
    }

    /// 指向自訂端點（本機模擬服務）
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    async fn load_config(&self, profile: Option<&str>) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::disabled());
        if let Some(name) = profile {
            loader = loader.profile_name(name);
        }
        if let Some(url) = &self.endpoint_url {
            loader = loader.endpoint_url(url);
        }

        let config = loader.load().await;
        if config.region().is_some() {
            return config;
        }

        tracing::debug!("No region configured, using {}", self.home_region);
        config
            .to_builder()
            .region(Region::new(self.home_region.clone()))
            .build()
    }

    async fn ensure_credentials(config: &SdkConfig) -> Result<()> {
        let provider = config
            .credentials_provider()
            .ok_or(InventoryError::NoCredentials)?;

        match provider.provide_credentials().await {
            Ok(_) => Ok(()),
            Err(CredentialsError::CredentialsNotLoaded(_)) => Err(InventoryError::NoCredentials),
            Err(e) => Err(InventoryError::Authentication {
                message: DisplayErrorContext(&e).to_string(),
            }),
        }
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    type Session = SdkConfig;

    async fn connect(&self, profile: Option<&str>) -> Result<(SdkConfig, CallerIdentity)> {
        let config = self.load_config(profile).await;
        Self::ensure_credentials(&config).await?;

        let sts = aws_sdk_sts::Client::new(&config);
        let output = sts.get_caller_identity().send().await.map_err(|e| {
            let err = service_error("GetCallerIdentity", e);
            InventoryError::Authentication {
                message: err.to_string(),
            }
        })?;

        let identity = CallerIdentity {
            arn: output.arn().unwrap_or_default().to_string(),
            account: output.account().unwrap_or_default().to_string(),
            user_id: output.user_id().unwrap_or_default().to_string(),
        };
        Ok((config, identity))
    }

    async fn list_accounts_page(
        &self,
        session: &SdkConfig,
        next_token: Option<String>,
    ) -> Result<Page<Account>> {
        let client = aws_sdk_organizations::Client::new(session);
        let output = client
            .list_accounts()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| service_error("ListAccounts", e))?;

        #[allow(deprecated)]
        let items = output
            .accounts()
            .iter()
            .filter_map(|account| {
                Some(Account {
                    id: account.id()?.to_string(),
                    name: account.name().unwrap_or_default().to_string(),
                    email: account.email().unwrap_or_default().to_string(),
                    status: account
                        .status()
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn assume_role(
        &self,
        session: &SdkConfig,
        role_arn: &str,
        session_name: &str,
    ) -> Result<SdkConfig> {
        let sts = aws_sdk_sts::Client::new(session);
        let output = sts
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| service_error("AssumeRole", e))?;

        let creds = output.credentials().ok_or_else(|| InventoryError::Service {
            operation: "AssumeRole".to_string(),
            code: "MissingCredentials".to_string(),
            message: format!("No credentials returned for {}", role_arn),
        })?;

        let credentials = Credentials::new(
            creds.access_key_id(),
            creds.secret_access_key(),
            Some(creds.session_token().to_string()),
            SystemTime::try_from(*creds.expiration()).ok(),
            "AssumeRole",
        );

        Ok(session
            .to_builder()
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .build())
    }

    async fn describe_file_systems_page(
        &self,
        session: &SdkConfig,
        region: &str,
        next_token: Option<String>,
    ) -> Result<Page<FileSystemRecord>> {
        let config = aws_sdk_fsx::config::Builder::from(session)
            .region(Region::new(region.to_string()))
            .build();
        let client = aws_sdk_fsx::Client::from_conf(config);

        let output = client
            .describe_file_systems()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| service_error("DescribeFileSystems", e))?;

        let items = output
            .file_systems()
            .iter()
            .filter_map(|fs| {
                Some(FileSystemRecord {
                    filesystem_id: fs.file_system_id()?.to_string(),
                    filesystem_type: fs
                        .file_system_type()
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_default(),
                    region: region.to_string(),
                    creation_time: fs.creation_time().and_then(to_chrono),
                    lifecycle_state: fs
                        .lifecycle()
                        .map(|l| l.as_str().to_string())
                        .unwrap_or_default(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_chrono_keeps_seconds() {
        let time = aws_sdk_fsx::primitives::DateTime::from_secs(1_705_276_800);
        let converted = to_chrono(&time).unwrap();
        assert_eq!(converted.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_service_error_keeps_code() {
        let meta = aws_sdk_fsx::error::ErrorMetadata::builder()
            .code("AccessDenied")
            .message("not allowed")
            .build();
        let err = aws_sdk_fsx::operation::describe_file_systems::DescribeFileSystemsError::generic(meta);

        let converted = service_error("DescribeFileSystems", err);
        assert!(converted.is_access_denied());
        assert_eq!(converted.code(), Some("AccessDenied"));
    }
}
