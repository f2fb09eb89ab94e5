use sqlx::{Pool, Row, Sqlite};
use async_trait::async_trait;
use chrono::Utc;

pub(crate) use soopwatch_common::traits::repository_traits::StreamStatusRepository;
use crate::Error;

#[derive(Clone)]
pub struct SqliteStreamStatusRepository {
    pool: Pool<Sqlite>,
}

impl SqliteStreamStatusRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreamStatusRepository for SqliteStreamStatusRepository {
    async fn get_status(&self, streamer_id: &str) -> Result<bool, Error> {
        let row = sqlx::query(
            r#"
            SELECT is_live
            FROM stream_status
            WHERE streamer_id = ?1
            "#,
        )
            .bind(streamer_id)
            .fetch_optional(&self.pool)
            .await?;

        // Absent row means the streamer was never observed live.
        if let Some(r) = row {
            Ok(r.try_get("is_live")?)
        } else {
            Ok(false)
        }
    }

    async fn set_status(&self, streamer_id: &str, is_live: bool) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO stream_status (streamer_id, is_live, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (streamer_id)
            DO UPDATE SET
               is_live    = excluded.is_live,
               updated_at = excluded.updated_at
            "#,
        )
            .bind(streamer_id)
            .bind(is_live)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_status(&self, streamer_id: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM stream_status
            WHERE streamer_id = ?1
            "#,
        )
            .bind(streamer_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn all_statuses(&self) -> Result<Vec<(String, bool)>, Error> {
        let rows = sqlx::query(r#"SELECT streamer_id, is_live FROM stream_status"#)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("streamer_id")?;
            let is_live: bool = row.try_get("is_live")?;
            out.push((id, is_live));
        }
        Ok(out)
    }
}
