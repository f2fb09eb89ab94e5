/// Default poll interval: 5 minutes.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300_000;

/// Notifications start enabled until the user toggles them off.
pub const DEFAULT_NOTIFICATIONS_ENABLED: bool = true;

/// How long a desktop notification stays on screen.
pub const NOTIFICATION_TIMEOUT_MS: u32 = 5_000;
