use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stream_warden::{
    config::Config,
    database::Database,
    models::Action,
    repositories::SeaOrmStreamRegistry,
    services::{
        AlertSink, CheckLogSink, HttpHealthProbe, JsonlCheckLog, LifecycleManager, NoopAlertSink,
        TelegramAlertSink,
    },
    sources::HttpPlaylistFetcher,
};

#[derive(Parser)]
#[command(name = "stream-warden")]
#[command(version)]
#[command(about = "Autonomous IPTV stream lifecycle manager")]
#[command(long_about = None)]
struct Cli {
    /// Lifecycle operation: discover, check, restart, cleanup or update.
    /// Anything else falls back to check.
    #[arg(default_value = "check")]
    action: String,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the JSON report.
    let log_filter = format!("stream_warden={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load_from_file(&cli.config)?;
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }

    let database = Database::connect(&config.database).await?;
    database.migrate().await?;

    let registry = Arc::new(SeaOrmStreamRegistry::new(database.connection.clone()));

    let check_log: Option<Arc<dyn CheckLogSink>> = config
        .auto
        .check_log_path
        .clone()
        .map(|path| Arc::new(JsonlCheckLog::new(path)) as Arc<dyn CheckLogSink>);

    let probe = Arc::new(HttpHealthProbe::new(
        Duration::from_secs(config.auto.probe_timeout_seconds),
        check_log,
    ));

    let alerts: Arc<dyn AlertSink> = match (
        &config.alerts.telegram_bot_token,
        &config.alerts.telegram_chat_id,
    ) {
        (Some(token), Some(chat)) => {
            Arc::new(TelegramAlertSink::new(token.clone(), chat.clone()))
        }
        _ => Arc::new(NoopAlertSink),
    };

    let manager = LifecycleManager::new(
        &config,
        registry,
        probe,
        Arc::new(HttpPlaylistFetcher::new()),
        alerts,
    );

    let action = Action::from_arg(&cli.action);
    let report = manager.run(action).await?;
    info!("Operation {} finished", action);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
