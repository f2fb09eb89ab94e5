use sqlx::{Pool, Row, Sqlite};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use soopwatch_common::models::{StatusLogEntry, StreamState};
pub(crate) use soopwatch_common::traits::repository_traits::StatusLogRepository;
use crate::Error;

#[derive(Clone)]
pub struct SqliteStatusLogRepository {
    pool: Pool<Sqlite>,
}

impl SqliteStatusLogRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusLogRepository for SqliteStatusLogRepository {
    async fn append_entry(
        &self,
        streamer_id: &str,
        status: StreamState,
        logged_at: DateTime<Utc>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO status_log (streamer_id, status, logged_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
            .bind(streamer_id)
            .bind(status.as_str())
            .bind(logged_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_entries(&self, streamer_id: &str) -> Result<Vec<StatusLogEntry>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT streamer_id, status, logged_at
            FROM status_log
            WHERE streamer_id = ?1
            ORDER BY log_id
            "#,
        )
            .bind(streamer_id)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let status_str: String = row.try_get("status")?;
            let status = StreamState::from_str_loose(&status_str).ok_or_else(|| {
                Error::Parse(format!("unknown status '{status_str}' in status_log"))
            })?;
            out.push(StatusLogEntry {
                streamer_id: row.try_get("streamer_id")?,
                status,
                logged_at: row.try_get("logged_at")?,
            });
        }
        Ok(out)
    }

    async fn delete_entries(&self, streamer_id: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM status_log
            WHERE streamer_id = ?1
            "#,
        )
            .bind(streamer_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
