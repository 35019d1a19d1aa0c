//! Browser HTTP client implementation using gloo_net, which wraps the
//! page's own fetch API. Requests are same-origin relative unless a base
//! URL is supplied.

use gloo_net::http::Request;
use log::debug;
use serde_json::Value;

use super::{
    read_reply, urls, ParticipantParams, RequestApi, SIGNUP_REJECTED_FALLBACK,
    UNREGISTER_REJECTED_FALLBACK,
};
use crate::error::{ErrorKind, Result};
use crate::model::{ApiOutcome, Roster};

/// HTTP client for WASM environments using gloo_net.
#[derive(Debug, Clone, Default)]
pub struct WasmClient {
    base_url: String,
}

impl WasmClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl RequestApi for WasmClient {
    async fn fetch_activities(&self) -> Result<Roster> {
        let url = urls::activities(&self.base_url);
        let resp = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.ok() {
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
        let resp = Request::post(&url).send().await?;

        let ok = resp.ok();
        let body = resp.text().await?;
        read_reply(ok, &body, SIGNUP_REJECTED_FALLBACK)
    }

    async fn unregister(&self, params: ParticipantParams<'_>) -> Result<ApiOutcome> {
        let url = urls::unregister(&self.base_url, params.activity, params.email);
        debug!("unregistering {} from {}", params.email, params.activity);
        let resp = Request::delete(&url).send().await?;

        let ok = resp.ok();
        let body = resp.text().await?;
        read_reply(ok, &body, UNREGISTER_REJECTED_FALLBACK)
    }
}
