pub mod helpers;

pub use helpers::create_test_db;
