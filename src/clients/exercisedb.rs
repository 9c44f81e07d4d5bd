use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::{host_of, ExerciseRecord, ExerciseSource};

/// ExerciseDB over RapidAPI.
#[derive(Clone)]
pub struct ExerciseDbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ExerciseDbClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ExerciseSource for ExerciseDbClient {
    async fn fetch_page(&self, offset: u32, limit: u32) -> anyhow::Result<Vec<ExerciseRecord>> {
        let key = self
            .api_key
            .as_deref()
            .context("RAPIDAPI_KEY is not set")?;

        let body: serde_json::Value = self
            .http
            .get(format!("{}/exercises", self.base_url))
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", host_of(&self.base_url))
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await
            .context("exercisedb request")?
            .error_for_status()
            .context("exercisedb status")?
            .json()
            .await
            .context("exercisedb body")?;

        if !body.is_array() {
            anyhow::bail!("unexpected exercisedb response: {}", body);
        }
        let page: Vec<ExerciseRecord> =
            serde_json::from_value(body).context("decode exercisedb page")?;
        debug!(offset, limit, count = page.len(), "exercisedb page fetched");
        Ok(page)
    }
}
