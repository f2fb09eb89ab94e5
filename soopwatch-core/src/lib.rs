// src/lib.rs

pub mod db;
pub mod eventbus;
pub mod http;
pub mod notifier;
pub mod platforms;
pub mod repositories;
pub mod services;
pub mod tasks;
pub mod test_utils;

pub use db::Database;
pub use soopwatch_common::Error;
pub use http::{DefaultHttpClient, HttpClient};
