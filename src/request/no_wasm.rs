//! Native HTTP client implementation using reqwest.

use log::debug;
use reqwest::Client;
use serde_json::Value;

use super::{
    read_reply, urls, ParticipantParams, RequestApi, SIGNUP_REJECTED_FALLBACK,
    UNREGISTER_REJECTED_FALLBACK,
};
use crate::error::{ErrorKind, Result};
use crate::model::{ApiOutcome, Roster};

/// HTTP client for native environments using reqwest.
#[derive(Debug, Clone)]
pub struct NoWasmClient {
    client: Client,
    base_url: String,
}

impl NoWasmClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl RequestApi for NoWasmClient {
    async fn fetch_activities(&self) -> Result<Roster> {
        let url = urls::activities(&self.base_url);
        debug!("fetching activities from {url}");
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ErrorKind::ParseError(format!(
                "activities request failed with status {}",
                resp.status()
            ))
            .into());
        }

        let value = resp.json::<Value>().await?;
        Roster::from_value(value)
    }

    async fn sign_up(&self, params: ParticipantParams<'_>) -> Result<ApiOutcome> {
        let url = urls::signup(&self.base_url, params.activity, params.email);
        debug!("signing up {} for {}", params.email, params.activity);
        let resp = self.client.post(&url).send().await?;

        let ok = resp.status().is_success();
        let body = resp.text().await?;
        read_reply(ok, &body, SIGNUP_REJECTED_FALLBACK)
    }

    async fn unregister(&self, params: ParticipantParams<'_>) -> Result<ApiOutcome> {
        let url = urls::unregister(&self.base_url, params.activity, params.email);
        debug!("unregistering {} from {}", params.email, params.activity);
        let resp = self.client.delete(&url).send().await?;

        let ok = resp.status().is_success();
        let body = resp.text().await?;
        read_reply(ok, &body, UNREGISTER_REJECTED_FALLBACK)
    }
}
