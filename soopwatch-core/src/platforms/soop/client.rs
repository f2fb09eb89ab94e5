//! SOOP (AfreecaTV) player live API client.
//!
//! One fire-and-forget POST per streamer: `bid=<id>` form-encoded, JSON
//! back. `CHANNEL.RESULT == 1` means the streamer is live; any other
//! RESULT means offline; a missing `CHANNEL` object means the streamer
//! does not exist and is reported as a platform error.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use soopwatch_common::models::LiveStatus;
use crate::http::HttpClient;
use crate::platforms::LivePlatform;
use crate::Error;

pub const PLAYER_LIVE_API_URL: &str =
    "https://live.afreecatv.com/afreeca/player_live_api.php";

const RESULT_LIVE: i64 = 1;

/// Partial response struct (we don't need every field).
#[derive(Debug, Deserialize)]
struct PlayerLiveResponse {
    #[serde(rename = "CHANNEL")]
    channel: Option<ChannelData>,
}

#[derive(Debug, Deserialize)]
struct ChannelData {
    #[serde(rename = "RESULT", default)]
    result: i64,
    #[serde(rename = "TITLE")]
    title: Option<String>,
    #[serde(rename = "NICKNAME")]
    nickname: Option<String>,
}

pub struct SoopClient {
    http: Arc<dyn HttpClient>,
    api_url: String,
}

impl SoopClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            api_url: PLAYER_LIVE_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_api_url(http: Arc<dyn HttpClient>, api_url: &str) -> Self {
        Self {
            http,
            api_url: api_url.to_string(),
        }
    }
}

#[async_trait]
impl LivePlatform for SoopClient {
    async fn fetch_live_status(&self, streamer_id: &str) -> Result<LiveStatus, Error> {
        let body = format!("bid={}", urlencoding::encode(streamer_id));
        let text = self.http.post_form(self.api_url.clone(), body).await?;

        let parsed: PlayerLiveResponse = serde_json::from_str(&text)?;
        let chan = parsed.channel.ok_or_else(|| {
            Error::Platform(format!("no channel data for streamer '{streamer_id}'"))
        })?;

        if chan.result == RESULT_LIVE {
            Ok(LiveStatus {
                online: true,
                title: chan.title.unwrap_or_default(),
                nickname: chan.nickname.unwrap_or_default(),
            })
        } else {
            Ok(LiveStatus::offline())
        }
    }
}
