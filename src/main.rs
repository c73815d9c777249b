use clap::Parser;
use football_site::domain::Storage;
use football_site::utils::logger::{self, LogFormat};
use football_site::utils::validation::Validate;
use football_site::{
    CliConfig, HttpFixtureClient, LocalStorage, MemoryStorage, RefreshConfig, RefreshPipeline,
    RefreshResult, SiteError,
};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    let format = if args.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, args.verbose);

    tracing::info!("🚀 Starting football-site refresh");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match RefreshConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => fail_startup(&format!("Failed to load config '{}'", args.config), &e),
    };
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        fail_startup("Configuration validation failed", &e);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let client = match HttpFixtureClient::new(&config.api) {
        Ok(client) => client,
        Err(e) => fail_startup("Could not create the HTTP client", &e),
    };

    let result = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - files are kept in memory");
        let storage = MemoryStorage::new();
        let result = execute(client, storage.clone(), config).await;
        for path in storage.paths().await {
            tracing::info!("🔍 would write: {}", path);
        }
        result
    } else {
        let storage = LocalStorage::new(config.output.path.clone());
        execute(client, storage, config).await
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("❌ Could not serialize the run report: {}", e),
        }
    } else {
        let icon = if result.is_success() { "✅" } else { "❌" };
        println!("{} Refresh finished", icon);
        println!("{}", result.summary());
    }

    std::process::exit(result.outcome.exit_code());
}

async fn execute<S: Storage>(
    client: HttpFixtureClient,
    storage: S,
    config: RefreshConfig,
) -> RefreshResult {
    let pipeline = RefreshPipeline::new(client, storage, config);
    pipeline.run().await
}

fn display_config_summary(config: &RefreshConfig, args: &CliConfig) {
    tracing::info!("📋 Site: {}", config.site.name);
    tracing::info!("📡 API: {}", config.api.base_url);
    tracing::info!(
        "⚽ Season {}: {} countries, {} leagues, min success rate {:.2}",
        config.season_label(),
        config.fetch.countries.len(),
        config.leagues_requested(),
        config.fetch.min_success_rate
    );
    tracing::info!(
        "📁 Output: {}/{}",
        config.output.path,
        config.output.site_dir
    );
    if config.monitoring_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }
}

fn fail_startup(context: &str, e: &SiteError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
