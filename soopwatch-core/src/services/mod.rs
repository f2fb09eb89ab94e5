// File: src/services/mod.rs

pub mod streamer_service;

pub use streamer_service::StreamerService;
