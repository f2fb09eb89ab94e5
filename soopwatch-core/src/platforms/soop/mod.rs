pub mod client;

pub use client::{SoopClient, PLAYER_LIVE_API_URL};
