// Repository tests against an in-memory database.

use chrono::Utc;

use soopwatch_common::models::{StreamState, DEFAULT_POLL_INTERVAL_MS};
use soopwatch_common::traits::repository_traits::{
    BotConfigRepository, StatusLogRepository, StreamStatusRepository, StreamerRepository,
};
use soopwatch_core::repositories::sqlite::{
    SqliteBotConfigRepository, SqliteStatusLogRepository, SqliteStreamStatusRepository,
    SqliteStreamerRepository,
};
use soopwatch_core::test_utils::create_test_db;

#[tokio::test]
async fn streamer_repo_add_list_remove() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteStreamerRepository::new(db.pool().clone());

    repo.add_streamer("alice").await.unwrap();
    repo.add_streamer("bob").await.unwrap();

    let listed = repo.list_streamers().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].streamer_id, "alice");
    assert_eq!(listed[1].streamer_id, "bob");
    assert!(repo.is_tracked("alice").await.unwrap());
    assert!(!repo.is_tracked("carol").await.unwrap());

    assert!(repo.remove_streamer("alice").await.unwrap());
    assert!(!repo.remove_streamer("alice").await.unwrap());
    assert_eq!(repo.list_streamers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_insert_is_a_database_error() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteStreamerRepository::new(db.pool().clone());

    repo.add_streamer("alice").await.unwrap();
    assert!(repo.add_streamer("alice").await.is_err());
}

#[tokio::test]
async fn absent_status_reads_offline() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteStreamStatusRepository::new(db.pool().clone());

    assert!(!repo.get_status("never_seen").await.unwrap());
}

#[tokio::test]
async fn status_upsert_flips_in_place() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteStreamStatusRepository::new(db.pool().clone());

    repo.set_status("alice", true).await.unwrap();
    assert!(repo.get_status("alice").await.unwrap());

    repo.set_status("alice", false).await.unwrap();
    assert!(!repo.get_status("alice").await.unwrap());

    // Still a single row.
    assert_eq!(repo.all_statuses().await.unwrap().len(), 1);
}

#[tokio::test]
async fn status_delete_returns_to_offline_default() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteStreamStatusRepository::new(db.pool().clone());

    repo.set_status("alice", true).await.unwrap();
    repo.delete_status("alice").await.unwrap();
    assert!(!repo.get_status("alice").await.unwrap());
    assert!(repo.all_statuses().await.unwrap().is_empty());
}

#[tokio::test]
async fn log_entries_are_per_streamer_and_ordered() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteStatusLogRepository::new(db.pool().clone());

    repo.append_entry("alice", StreamState::Online, Utc::now())
        .await
        .unwrap();
    repo.append_entry("bob", StreamState::Online, Utc::now())
        .await
        .unwrap();
    repo.append_entry("alice", StreamState::Offline, Utc::now())
        .await
        .unwrap();

    let alice = repo.list_entries("alice").await.unwrap();
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[0].status, StreamState::Online);
    assert_eq!(alice[1].status, StreamState::Offline);

    assert_eq!(repo.list_entries("bob").await.unwrap().len(), 1);

    repo.delete_entries("alice").await.unwrap();
    assert!(repo.list_entries("alice").await.unwrap().is_empty());
    assert_eq!(repo.list_entries("bob").await.unwrap().len(), 1);
}

#[tokio::test]
async fn config_defaults_apply_when_keys_are_absent() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteBotConfigRepository::new(db.pool().clone());

    assert_eq!(repo.poll_interval_ms().await.unwrap(), DEFAULT_POLL_INTERVAL_MS);
    assert!(repo.notifications_enabled().await.unwrap());
}

#[tokio::test]
async fn config_round_trips_typed_settings() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteBotConfigRepository::new(db.pool().clone());

    repo.set_poll_interval_ms(60_000).await.unwrap();
    assert_eq!(repo.poll_interval_ms().await.unwrap(), 60_000);

    repo.set_notifications_enabled(false).await.unwrap();
    assert!(!repo.notifications_enabled().await.unwrap());
}

#[tokio::test]
async fn config_falls_back_on_garbage_values() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteBotConfigRepository::new(db.pool().clone());

    repo.set_value("poll_interval_ms", "not a number").await.unwrap();
    assert_eq!(repo.poll_interval_ms().await.unwrap(), DEFAULT_POLL_INTERVAL_MS);

    repo.set_value("poll_interval_ms", "0").await.unwrap();
    assert_eq!(repo.poll_interval_ms().await.unwrap(), DEFAULT_POLL_INTERVAL_MS);

    repo.set_value("notifications_enabled", "maybe").await.unwrap();
    assert!(repo.notifications_enabled().await.unwrap());
}

#[tokio::test]
async fn config_generic_kv_surface() {
    let db = create_test_db().await.unwrap();
    let repo = SqliteBotConfigRepository::new(db.pool().clone());

    assert!(repo.get_value("missing").await.unwrap().is_none());

    repo.set_value("k", "v1").await.unwrap();
    repo.set_value("k", "v2").await.unwrap();
    assert_eq!(repo.get_value("k").await.unwrap().as_deref(), Some("v2"));

    repo.set_value("other", "x").await.unwrap();
    let mut all = repo.list_all().await.unwrap();
    all.sort();
    assert_eq!(
        all,
        vec![
            ("k".to_string(), "v2".to_string()),
            ("other".to_string(), "x".to_string()),
        ]
    );

    repo.delete_value("k").await.unwrap();
    assert!(repo.get_value("k").await.unwrap().is_none());
}
