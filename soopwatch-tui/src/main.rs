use clap::Parser;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use soopwatch_common::traits::repository_traits::{
    BotConfigRepository, StatusLogRepository, StreamStatusRepository, StreamerRepository,
};
use soopwatch_core::eventbus::EventBus;
use soopwatch_core::notifier::DesktopNotifier;
use soopwatch_core::platforms::soop::SoopClient;
use soopwatch_core::repositories::sqlite::{
    SqliteBotConfigRepository, SqliteStatusLogRepository, SqliteStreamStatusRepository,
    SqliteStreamerRepository,
};
use soopwatch_core::services::StreamerService;
use soopwatch_core::tasks::{BroadcastMonitor, PollScheduler};
use soopwatch_core::{Database, DefaultHttpClient};

use soopwatch_tui::{spawn_event_feed, TuiContext, TuiModule};

#[derive(Parser, Debug, Clone)]
#[command(name = "soopwatch")]
#[command(author, version, about = "SOOP broadcast alerts with a console UI")]
struct Args {
    /// Path to the SQLite database file
    #[arg(long, default_value = "soopwatch.db")]
    db_path: String,

    /// Run without the interactive console (Ctrl-C to exit)
    #[arg(long, default_value = "false")]
    headless: bool,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("soopwatch=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let db = Database::new(&args.db_path).await?;
    db.migrate().await?;

    let streamer_repo: Arc<dyn StreamerRepository> =
        Arc::new(SqliteStreamerRepository::new(db.pool().clone()));
    let status_repo: Arc<dyn StreamStatusRepository> =
        Arc::new(SqliteStreamStatusRepository::new(db.pool().clone()));
    let log_repo: Arc<dyn StatusLogRepository> =
        Arc::new(SqliteStatusLogRepository::new(db.pool().clone()));
    let config_repo: Arc<dyn BotConfigRepository> =
        Arc::new(SqliteBotConfigRepository::new(db.pool().clone()));

    let event_bus = Arc::new(EventBus::new());
    let platform = Arc::new(SoopClient::new(Arc::new(DefaultHttpClient::new())));
    let notifier = Arc::new(DesktopNotifier::new());

    let monitor = Arc::new(BroadcastMonitor::new(
        platform,
        streamer_repo.clone(),
        status_repo.clone(),
        log_repo.clone(),
        config_repo.clone(),
        notifier,
        event_bus.clone(),
    ));
    let scheduler = Arc::new(PollScheduler::new(monitor.clone(), event_bus.clone()));

    let interval_ms = config_repo.poll_interval_ms().await?;
    scheduler.start(Duration::from_millis(interval_ms)).await?;

    let feed = spawn_event_feed(event_bus.clone());

    if args.headless {
        info!("Running headless; press Ctrl-C to exit.");
        tokio::signal::ctrl_c().await?;
    } else {
        let ctx = Arc::new(TuiContext {
            streamer_service: Arc::new(StreamerService::new(
                streamer_repo,
                status_repo.clone(),
                log_repo,
            )),
            status_repo,
            config_repo,
            monitor,
            scheduler: scheduler.clone(),
            event_bus: event_bus.clone(),
        });
        TuiModule::new(ctx).run().await;
    }

    scheduler.stop().await;
    event_bus.shutdown();
    feed.abort();
    info!("soopwatch shut down.");
    Ok(())
}
