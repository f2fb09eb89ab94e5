use sqlx::{Pool, Row, Sqlite};
use async_trait::async_trait;

use soopwatch_common::models::{DEFAULT_NOTIFICATIONS_ENABLED, DEFAULT_POLL_INTERVAL_MS};
pub(crate) use soopwatch_common::traits::repository_traits::BotConfigRepository;
use crate::Error;

const POLL_INTERVAL_KEY: &str = "poll_interval_ms";
const NOTIFICATIONS_ENABLED_KEY: &str = "notifications_enabled";

#[derive(Clone)]
pub struct SqliteBotConfigRepository {
    pool: Pool<Sqlite>,
}

impl SqliteBotConfigRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BotConfigRepository for SqliteBotConfigRepository {
    async fn get_value(&self, config_key: &str) -> Result<Option<String>, Error> {
        let row = sqlx::query(
            r#"
            SELECT config_value
            FROM bot_config
            WHERE config_key = ?1
            "#,
        )
            .bind(config_key)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Some(r.try_get("config_value")?))
        } else {
            Ok(None)
        }
    }

    async fn set_value(&self, config_key: &str, config_value: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO bot_config (config_key, config_value)
            VALUES (?1, ?2)
            ON CONFLICT (config_key)
            DO UPDATE SET
               config_value = excluded.config_value
            "#,
        )
            .bind(config_key)
            .bind(config_value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_value(&self, config_key: &str) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM bot_config
            WHERE config_key = ?1
            "#,
        )
            .bind(config_key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<(String, String)>, Error> {
        let rows = sqlx::query(r#"SELECT config_key, config_value FROM bot_config"#)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let k: String = row.try_get("config_key")?;
            let v: String = row.try_get("config_value")?;
            out.push((k, v));
        }
        Ok(out)
    }

    async fn poll_interval_ms(&self) -> Result<u64, Error> {
        // Absent, unparseable, or non-positive values fall back to the
        // default rather than erroring out.
        if let Some(val) = self.get_value(POLL_INTERVAL_KEY).await? {
            if let Ok(parsed) = val.parse::<u64>() {
                if parsed > 0 {
                    return Ok(parsed);
                }
            }
        }
        Ok(DEFAULT_POLL_INTERVAL_MS)
    }

    async fn set_poll_interval_ms(&self, interval_ms: u64) -> Result<(), Error> {
        self.set_value(POLL_INTERVAL_KEY, &interval_ms.to_string()).await
    }

    async fn notifications_enabled(&self) -> Result<bool, Error> {
        if let Some(val) = self.get_value(NOTIFICATIONS_ENABLED_KEY).await? {
            if let Ok(parsed) = val.parse::<bool>() {
                return Ok(parsed);
            }
        }
        Ok(DEFAULT_NOTIFICATIONS_ENABLED)
    }

    async fn set_notifications_enabled(&self, enabled: bool) -> Result<(), Error> {
        self.set_value(NOTIFICATIONS_ENABLED_KEY, &enabled.to_string()).await
    }
}
