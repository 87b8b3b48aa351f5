use crate::domain::ports::CloudProvider;
use crate::utils::error::Result;

/// 建立並驗證呼叫者的 session；失敗時由呼叫端中止整個執行
pub async fn authenticate<P: CloudProvider>(
    provider: &P,
    profile: Option<&str>,
) -> Result<P::Session> {
    match profile {
        Some(name) => tracing::info!("→ Using AWS profile: {}", name),
        None => tracing::info!("→ Using default AWS credentials"),
    }
    tracing::info!("→ Authenticating with AWS SSO...");

    let (session, identity) = match provider.connect(profile).await {
        Ok(connected) => connected,
        Err(e) => {
            tracing::error!("❌ {}", e.user_friendly_message());
            tracing::error!("💡 {}", e.recovery_suggestion());
            return Err(e);
        }
    };

    let prefix = if provider.is_simulated() {
        "[DRY-RUN] Would connect as"
    } else {
        "Connected as"
    };
    tracing::info!("✓ {}: {}", prefix, identity.arn);
    tracing::info!("✓ Account: {}", identity.account);
    tracing::debug!("Caller user id: {}", identity.user_id);

    Ok(session)
}
