use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A streamer ID registered for broadcast alerts. IDs are case-sensitive
/// and compared by exact match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedStreamer {
    pub streamer_id: String,
    pub added_at: DateTime<Utc>,
}

/// Last observed broadcast state of a streamer. A streamer with no stored
/// state is treated as `Offline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamState {
    Online,
    Offline,
}

impl StreamState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamState::Online => "online",
            StreamState::Offline => "offline",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "online" => Some(StreamState::Online),
            "offline" => Some(StreamState::Offline),
            _ => None,
        }
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one live-status fetch from the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStatus {
    pub online: bool,
    pub title: String,
    pub nickname: String,
}

impl LiveStatus {
    /// An offline observation carries no title or nickname.
    pub fn offline() -> Self {
        Self {
            online: false,
            title: String::new(),
            nickname: String::new(),
        }
    }
}

/// One appended transition record. The log is append-only and unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLogEntry {
    pub streamer_id: String,
    pub status: StreamState,
    pub logged_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_state_round_trips_through_strings() {
        assert_eq!(StreamState::Online.as_str(), "online");
        assert_eq!(StreamState::Offline.as_str(), "offline");
        assert_eq!(StreamState::from_str_loose("online"), Some(StreamState::Online));
        assert_eq!(StreamState::from_str_loose("offline"), Some(StreamState::Offline));
        assert_eq!(StreamState::from_str_loose("ONLINE"), None);
    }

    #[test]
    fn offline_status_has_empty_fields() {
        let st = LiveStatus::offline();
        assert!(!st.online);
        assert!(st.title.is_empty());
        assert!(st.nickname.is_empty());
    }
}
