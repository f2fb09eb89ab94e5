use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::eventbus::EventBus;
use crate::tasks::BroadcastMonitor;
use crate::Error;

/// Owns the single repeating poll timer.
///
/// `reschedule` atomically replaces the timer task, so at any instant at
/// most one timer exists. Each tick spawns the poll cycle as its own task:
/// a cycle that outlives the interval never delays the next tick (and two
/// overlapping cycles for the same streamer resolve last-write-wins, as
/// the streamers are independent keys). In-flight fetches are not
/// cancelled on reschedule.
pub struct PollScheduler {
    monitor: Arc<BroadcastMonitor>,
    event_bus: Arc<EventBus>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollScheduler {
    pub fn new(monitor: Arc<BroadcastMonitor>, event_bus: Arc<EventBus>) -> Self {
        Self {
            monitor,
            event_bus,
            handle: Mutex::new(None),
        }
    }

    /// Start polling. The first check fires immediately, then every
    /// `period`.
    pub async fn start(&self, period: Duration) -> Result<(), Error> {
        self.reschedule(period).await
    }

    /// Stop the previous timer and start a new one at `period`. A
    /// non-positive period is rejected and the previous timer kept.
    pub async fn reschedule(&self, period: Duration) -> Result<(), Error> {
        if period.is_zero() {
            return Err(Error::Parse("poll interval must be positive".to_string()));
        }

        let mut guard = self.handle.lock().await;
        if let Some(old) = guard.take() {
            old.abort();
        }

        info!("Scheduling broadcast checks every {:?}", period);
        let monitor = self.monitor.clone();
        let mut shutdown_rx = self.event_bus.shutdown_rx.clone();

        *guard = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let monitor = monitor.clone();
                        tokio::spawn(async move {
                            if let Err(e) = monitor.check_all_broadcasts().await {
                                error!("Broadcast check failed: {e}");
                            }
                        });
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        }));

        Ok(())
    }

    /// Abort the timer if one is running.
    pub async fn stop(&self) {
        if let Some(handle) = self.handle.lock().await.take() {
            handle.abort();
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    use soopwatch_common::models::LiveStatus;
    use soopwatch_common::traits::repository_traits::StreamerRepository;
    use crate::notifier::MockNotifier;
    use crate::platforms::MockLivePlatform;
    use crate::repositories::sqlite::{
        SqliteBotConfigRepository, SqliteStatusLogRepository, SqliteStreamStatusRepository,
        SqliteStreamerRepository,
    };
    use crate::test_utils::create_test_db;

    /// Monitor over one tracked streamer whose platform fetch bumps a
    /// counter, so tests can observe tick activity.
    async fn counting_setup() -> (Arc<BroadcastMonitor>, Arc<EventBus>, Arc<AtomicUsize>) {
        let db = create_test_db().await.unwrap();
        let streamer_repo = Arc::new(SqliteStreamerRepository::new(db.pool().clone()));
        streamer_repo.add_streamer("alice").await.unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_for_mock = calls.clone();
        let mut platform = MockLivePlatform::new();
        platform.expect_fetch_live_status().returning(move |_| {
            calls_for_mock.fetch_add(1, Ordering::SeqCst);
            Ok(LiveStatus::offline())
        });

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().returning(|_, _| Ok(()));

        let event_bus = Arc::new(EventBus::new());
        let monitor = Arc::new(BroadcastMonitor::new(
            Arc::new(platform),
            streamer_repo,
            Arc::new(SqliteStreamStatusRepository::new(db.pool().clone())),
            Arc::new(SqliteStatusLogRepository::new(db.pool().clone())),
            Arc::new(SqliteBotConfigRepository::new(db.pool().clone())),
            Arc::new(notifier),
            event_bus.clone(),
        ));
        (monitor, event_bus, calls)
    }

    #[tokio::test]
    async fn start_fires_immediately_and_repeats() {
        let (monitor, bus, calls) = counting_setup().await;
        let scheduler = PollScheduler::new(monitor, bus);

        scheduler.start(Duration::from_millis(20)).await.unwrap();
        sleep(Duration::from_millis(200)).await;

        assert!(scheduler.is_running().await);
        assert!(calls.load(Ordering::SeqCst) >= 2);
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn zero_period_is_rejected_and_previous_timer_kept() {
        let (monitor, bus, calls) = counting_setup().await;
        let scheduler = PollScheduler::new(monitor, bus);

        scheduler.start(Duration::from_millis(20)).await.unwrap();
        let err = scheduler.reschedule(Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        // The old timer keeps ticking.
        let before = calls.load(Ordering::SeqCst);
        sleep(Duration::from_millis(100)).await;
        assert!(calls.load(Ordering::SeqCst) > before);
        assert!(scheduler.is_running().await);
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn stop_halts_polling() {
        let (monitor, bus, calls) = counting_setup().await;
        let scheduler = PollScheduler::new(monitor, bus);

        scheduler.start(Duration::from_millis(20)).await.unwrap();
        sleep(Duration::from_millis(60)).await;
        scheduler.stop().await;
        assert!(!scheduler.is_running().await);

        // Allow any in-flight cycle to finish, then verify quiescence.
        sleep(Duration::from_millis(60)).await;
        let settled = calls.load(Ordering::SeqCst);
        sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), settled);
    }

    #[tokio::test]
    async fn reschedule_replaces_the_timer() {
        let (monitor, bus, calls) = counting_setup().await;
        let scheduler = PollScheduler::new(monitor, bus);

        // A timer that would effectively never fire again...
        scheduler.start(Duration::from_secs(3600)).await.unwrap();
        sleep(Duration::from_millis(20)).await;
        let after_start = calls.load(Ordering::SeqCst);

        // ...replaced by a fast one.
        scheduler.reschedule(Duration::from_millis(20)).await.unwrap();
        sleep(Duration::from_millis(200)).await;
        assert!(calls.load(Ordering::SeqCst) > after_start + 1);
        assert!(scheduler.is_running().await);
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn shutdown_signal_ends_the_timer_task() {
        let (monitor, bus, _calls) = counting_setup().await;
        let scheduler = PollScheduler::new(monitor, bus.clone());

        scheduler.start(Duration::from_millis(20)).await.unwrap();
        bus.shutdown();
        sleep(Duration::from_millis(100)).await;

        assert!(!scheduler.is_running().await);
    }
}
