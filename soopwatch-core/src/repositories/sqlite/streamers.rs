use sqlx::{Pool, Row, Sqlite};
use async_trait::async_trait;
use chrono::Utc;

use soopwatch_common::models::TrackedStreamer;
pub(crate) use soopwatch_common::traits::repository_traits::StreamerRepository;
use crate::Error;

#[derive(Clone)]
pub struct SqliteStreamerRepository {
    pool: Pool<Sqlite>,
}

impl SqliteStreamerRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreamerRepository for SqliteStreamerRepository {
    async fn add_streamer(&self, streamer_id: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO tracked_streamers (streamer_id, added_at)
            VALUES (?1, ?2)
            "#,
        )
            .bind(streamer_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_streamers(&self) -> Result<Vec<TrackedStreamer>, Error> {
        // rowid order = insertion order.
        let rows = sqlx::query(
            r#"
            SELECT streamer_id, added_at
            FROM tracked_streamers
            ORDER BY rowid
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(TrackedStreamer {
                streamer_id: row.try_get("streamer_id")?,
                added_at: row.try_get("added_at")?,
            });
        }
        Ok(out)
    }

    async fn remove_streamer(&self, streamer_id: &str) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tracked_streamers
            WHERE streamer_id = ?1
            "#,
        )
            .bind(streamer_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_tracked(&self, streamer_id: &str) -> Result<bool, Error> {
        let row = sqlx::query(
            r#"
            SELECT 1 AS present
            FROM tracked_streamers
            WHERE streamer_id = ?1
            "#,
        )
            .bind(streamer_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
