use clap::Parser;
use govcloud_fsx_inventory::domain::ports::{CloudProvider, ConfigProvider};
use govcloud_fsx_inventory::utils::{logger, validation::Validate};
use govcloud_fsx_inventory::{
    AwsProvider, CliConfig, InventoryConfig, InventoryEngine, InventoryError, LocalStorage,
    SimulatedProvider,
};

async fn execute<P: CloudProvider>(
    provider: P,
    config: InventoryConfig,
    cli: &CliConfig,
) -> Result<(), InventoryError> {
    let storage = LocalStorage::new(config.output_directory().to_string());
    let engine = InventoryEngine::new_with_monitoring(provider, storage, config, cli.monitor)
        .with_profile(cli.profile.clone());

    let summary = engine.run().await?;
    if let Ok(json) = serde_json::to_string(&summary) {
        tracing::debug!("Run summary: {}", json);
    }
    if let Some(path) = &summary.output_path {
        println!("📁 Output saved to: {}", path);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let result = match cli.load_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) if cli.dry_run => {
            let fixture_region = config.regions()[0].clone();
            execute(SimulatedProvider::new(fixture_region), config, &cli).await
        }
        Ok(config) => {
            let provider = AwsProvider::new(config.home_region());
            execute(provider, config, &cli).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Inventory failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}
