use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use soopwatch_common::traits::repository_traits::{BotConfigRepository, StreamStatusRepository};
use soopwatch_core::eventbus::{AlertEvent, EventBus};
use soopwatch_core::services::StreamerService;
use soopwatch_core::tasks::{BroadcastMonitor, PollScheduler};

pub mod commands;

/// Everything the console commands need to do their work.
pub struct TuiContext {
    pub streamer_service: Arc<StreamerService>,
    pub status_repo: Arc<dyn StreamStatusRepository>,
    pub config_repo: Arc<dyn BotConfigRepository>,
    pub monitor: Arc<BroadcastMonitor>,
    pub scheduler: Arc<PollScheduler>,
    pub event_bus: Arc<EventBus>,
}

/// Line-based console over stdin. One command per line; `quit` exits.
pub struct TuiModule {
    ctx: Arc<TuiContext>,
}

impl TuiModule {
    pub fn new(ctx: Arc<TuiContext>) -> Self {
        Self { ctx }
    }

    /// Read lines from stdin and dispatch them until `quit` or EOF.
    pub async fn run(&self) {
        println!("soopwatch console ready. Type 'help' for commands.");

        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();

        loop {
            print!("soopwatch> ");
            let _ = std::io::stdout().flush();

            match lines.next_line().await {
                Ok(Some(line)) => {
                    let (quit, output) = commands::dispatch(line.trim(), &self.ctx).await;
                    if let Some(out) = output {
                        println!("{out}");
                    }
                    if quit {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    eprintln!("Error reading from stdin: {e}");
                    break;
                }
            }
        }
    }
}

/// Prints transition events to the console as they happen.
pub fn spawn_event_feed(event_bus: Arc<EventBus>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rx = event_bus.subscribe(None).await;
        while let Some(event) = rx.recv().await {
            match event {
                AlertEvent::StreamOnline {
                    streamer_id,
                    nickname,
                    title,
                    timestamp,
                } => {
                    println!(
                        "[{}] {} ({}) went LIVE: {}",
                        timestamp.format("%H:%M:%S"),
                        streamer_id,
                        nickname,
                        title
                    );
                }
                AlertEvent::StreamOffline {
                    streamer_id,
                    timestamp,
                } => {
                    println!(
                        "[{}] {} went offline",
                        timestamp.format("%H:%M:%S"),
                        streamer_id
                    );
                }
                _ => {}
            }
        }
    })
}
