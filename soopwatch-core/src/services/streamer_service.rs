//! Registry operations over the tracked-streamer list.
//!
//! All validation lives here so the console stays a thin prompt layer:
//! duplicate adds and unknown removals are rejected as errors, not
//! surfaced as database failures.

use std::sync::Arc;
use tracing::info;

use soopwatch_common::models::{StatusLogEntry, TrackedStreamer};
use soopwatch_common::traits::repository_traits::{
    StatusLogRepository, StreamStatusRepository, StreamerRepository,
};
use crate::Error;

pub struct StreamerService {
    streamer_repo: Arc<dyn StreamerRepository>,
    status_repo: Arc<dyn StreamStatusRepository>,
    log_repo: Arc<dyn StatusLogRepository>,
}

impl StreamerService {
    pub fn new(
        streamer_repo: Arc<dyn StreamerRepository>,
        status_repo: Arc<dyn StreamStatusRepository>,
        log_repo: Arc<dyn StatusLogRepository>,
    ) -> Self {
        Self {
            streamer_repo,
            status_repo,
            log_repo,
        }
    }

    /// Register a streamer ID. IDs are case-sensitive; duplicates are
    /// rejected and leave the list unchanged.
    pub async fn add_streamer(&self, streamer_id: &str) -> Result<(), Error> {
        let streamer_id = streamer_id.trim();
        if streamer_id.is_empty() {
            return Err(Error::Parse("streamer id must not be empty".to_string()));
        }
        if self.streamer_repo.is_tracked(streamer_id).await? {
            return Err(Error::AlreadyTracked(streamer_id.to_string()));
        }
        self.streamer_repo.add_streamer(streamer_id).await?;
        info!("Registered streamer '{}'", streamer_id);
        Ok(())
    }

    /// Unregister a streamer and drop its stored status and log entries.
    /// Removing an unknown ID leaves the list unchanged.
    pub async fn remove_streamer(&self, streamer_id: &str) -> Result<(), Error> {
        let removed = self.streamer_repo.remove_streamer(streamer_id).await?;
        if !removed {
            return Err(Error::NotFound(format!(
                "streamer '{streamer_id}' is not registered"
            )));
        }
        self.status_repo.delete_status(streamer_id).await?;
        self.log_repo.delete_entries(streamer_id).await?;
        info!("Unregistered streamer '{}'", streamer_id);
        Ok(())
    }

    /// Exact-match membership test.
    pub async fn is_tracked(&self, streamer_id: &str) -> Result<bool, Error> {
        self.streamer_repo.is_tracked(streamer_id).await
    }

    pub async fn list_streamers(&self) -> Result<Vec<TrackedStreamer>, Error> {
        self.streamer_repo.list_streamers().await
    }

    pub async fn status_log(&self, streamer_id: &str) -> Result<Vec<StatusLogEntry>, Error> {
        self.log_repo.list_entries(streamer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use soopwatch_common::models::StreamState;
    use crate::repositories::sqlite::{
        SqliteStatusLogRepository, SqliteStreamStatusRepository, SqliteStreamerRepository,
    };
    use crate::test_utils::create_test_db;

    async fn make_service() -> StreamerService {
        let db = create_test_db().await.unwrap();
        StreamerService::new(
            Arc::new(SqliteStreamerRepository::new(db.pool().clone())),
            Arc::new(SqliteStreamStatusRepository::new(db.pool().clone())),
            Arc::new(SqliteStatusLogRepository::new(db.pool().clone())),
        )
    }

    #[tokio::test]
    async fn add_then_list_preserves_insertion_order() {
        let svc = make_service().await;
        svc.add_streamer("alice").await.unwrap();
        svc.add_streamer("bob").await.unwrap();

        let ids: Vec<String> = svc
            .list_streamers()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.streamer_id)
            .collect();
        assert_eq!(ids, vec!["alice", "bob"]);
    }

    #[tokio::test]
    async fn duplicate_add_is_rejected_and_list_unchanged() {
        let svc = make_service().await;
        svc.add_streamer("alice").await.unwrap();

        let err = svc.add_streamer("alice").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyTracked(_)));
        assert_eq!(svc.list_streamers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_is_case_sensitive() {
        let svc = make_service().await;
        svc.add_streamer("alice").await.unwrap();
        svc.add_streamer("Alice").await.unwrap();
        assert_eq!(svc.list_streamers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_id_is_rejected() {
        let svc = make_service().await;
        assert!(matches!(
            svc.add_streamer("   ").await.unwrap_err(),
            Error::Parse(_)
        ));
    }

    #[tokio::test]
    async fn remove_unknown_is_rejected_and_list_unchanged() {
        let svc = make_service().await;
        svc.add_streamer("alice").await.unwrap();

        let err = svc.remove_streamer("bob").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(svc.list_streamers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_cascades_status_and_log() {
        let db = create_test_db().await.unwrap();
        let streamer_repo = Arc::new(SqliteStreamerRepository::new(db.pool().clone()));
        let status_repo = Arc::new(SqliteStreamStatusRepository::new(db.pool().clone()));
        let log_repo = Arc::new(SqliteStatusLogRepository::new(db.pool().clone()));
        let svc = StreamerService::new(
            streamer_repo.clone(),
            status_repo.clone(),
            log_repo.clone(),
        );

        svc.add_streamer("alice").await.unwrap();
        status_repo.set_status("alice", true).await.unwrap();
        log_repo
            .append_entry("alice", StreamState::Online, Utc::now())
            .await
            .unwrap();

        svc.remove_streamer("alice").await.unwrap();

        assert!(!svc.is_tracked("alice").await.unwrap());
        assert!(!status_repo.get_status("alice").await.unwrap());
        assert!(log_repo.list_entries("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_reports_membership() {
        let svc = make_service().await;
        svc.add_streamer("alice").await.unwrap();
        assert!(svc.is_tracked("alice").await.unwrap());
        assert!(!svc.is_tracked("bob").await.unwrap());
    }
}
