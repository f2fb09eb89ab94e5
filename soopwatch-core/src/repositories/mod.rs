// src/repositories/mod.rs

pub mod sqlite;

pub use sqlite::{
    SqliteBotConfigRepository,
    SqliteStatusLogRepository,
    SqliteStreamStatusRepository,
    SqliteStreamerRepository,
};
