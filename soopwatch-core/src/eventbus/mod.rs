//! src/eventbus/mod.rs
//!
//! Provides an in-process event bus that supports guaranteed delivery
//! to multiple subscribers via bounded MPSC queues.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch, Mutex};

/// Events published by the broadcast monitor. Subscribers today are the
/// console feed printer; the scheduler watches the shutdown flag.
#[derive(Debug, Clone)]
pub enum AlertEvent {
    /// A tracked streamer transitioned offline→online.
    StreamOnline {
        streamer_id: String,
        nickname: String,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A tracked streamer transitioned online→offline.
    StreamOffline {
        streamer_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Emitted at the start of every poll cycle.
    Tick,

    /// System-wide event for debugging or administration.
    SystemMessage(String),
}

impl AlertEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            AlertEvent::StreamOnline { .. } => "stream.online",
            AlertEvent::StreamOffline { .. } => "stream.offline",
            AlertEvent::Tick => "tick",
            AlertEvent::SystemMessage(_) => "system_message",
        }
    }

    pub fn streamer_id(&self) -> Option<&str> {
        match self {
            AlertEvent::StreamOnline { streamer_id, .. } => Some(streamer_id),
            AlertEvent::StreamOffline { streamer_id, .. } => Some(streamer_id),
            _ => None,
        }
    }
}

/// Each subscriber gets its own `mpsc::Sender<AlertEvent>` for guaranteed
/// delivery.
///
/// - If the subscriber's channel buffer fills, `publish` will await
///   until there's space (backpressure).
/// - If the subscriber has dropped the `Receiver`, the channel is closed
///   and sending returns an error.
#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<AlertEvent>>>>,
    shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Default size for each subscriber's buffer.
const DEFAULT_BUFFER_SIZE: usize = 1000;

impl EventBus {
    /// Create a new, empty event bus.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            subscribers: Arc::new(Mutex::new(vec![])),
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Returns a receiver on which events will be delivered.
    pub async fn subscribe(&self, buffer_size: Option<usize>) -> mpsc::Receiver<AlertEvent> {
        let size = buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        let (tx, rx) = mpsc::channel(size);
        let mut subs = self.subscribers.lock().await;
        subs.push(tx);
        rx
    }

    /// Publish an event to all subscribers.
    pub async fn publish(&self, event: AlertEvent) {
        let senders = {
            let subs = self.subscribers.lock().await;
            subs.clone()
        };
        for s in senders {
            let _ = s.send(event.clone()).await;
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
