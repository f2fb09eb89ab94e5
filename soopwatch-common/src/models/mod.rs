// File: soopwatch-common/src/models/mod.rs

pub mod settings;
pub mod streamer;

pub use settings::*;
pub use streamer::*;
