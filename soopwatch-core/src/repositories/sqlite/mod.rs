// src/repositories/sqlite/mod.rs

pub mod bot_config;
pub mod status_log;
pub mod stream_status;
pub mod streamers;

pub use bot_config::SqliteBotConfigRepository;
pub use status_log::SqliteStatusLogRepository;
pub use stream_status::SqliteStreamStatusRepository;
pub use streamers::SqliteStreamerRepository;
