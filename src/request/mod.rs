//! Request layer for the activity board API.
//!
//! One trait, two transports: `gloo_net` in the browser (`wasm` feature) and
//! `reqwest` everywhere else (`no-wasm` feature). URL building and response
//! interpretation are shared so both transports behave identically.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::model::{ApiOutcome, ApiReply, Roster};

#[cfg(feature = "no-wasm")]
mod no_wasm;
#[cfg(feature = "no-wasm")]
pub use no_wasm::NoWasmClient;

#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::WasmClient;

/// Shown when a rejected sign-up carries no `detail` text.
pub const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
/// Shown when a rejected unregister carries no `detail` text.
pub const UNREGISTER_REJECTED_FALLBACK: &str = "An error occurred while unregistering";

/// Activity and email a mutation applies to.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantParams<'a> {
    pub activity: &'a str,
    pub email: &'a str,
}

/// The three server operations the board consumes.
pub trait RequestApi {
    /// `GET /activities` — full roster snapshot.
    async fn fetch_activities(&self) -> Result<Roster>;

    /// `POST /activities/{name}/signup?email=…`
    async fn sign_up(&self, params: ParticipantParams<'_>) -> Result<ApiOutcome>;

    /// `DELETE /activities/{name}/participant?email=…`
    async fn unregister(&self, params: ParticipantParams<'_>) -> Result<ApiOutcome>;
}

/// Endpoint construction with percent-encoded path and query components.
pub mod urls {
    use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

    // encodeURIComponent's unreserved set
    const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'_')
        .remove(b'.')
        .remove(b'!')
        .remove(b'~')
        .remove(b'*')
        .remove(b'\'')
        .remove(b'(')
        .remove(b')');

    pub fn activities(base: &str) -> String {
        format!("{}/activities", base.trim_end_matches('/'))
    }

    pub fn signup(base: &str, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/signup?email={}",
            base.trim_end_matches('/'),
            component(activity),
            component(email)
        )
    }

    pub fn unregister(base: &str, activity: &str, email: &str) -> String {
        format!(
            "{}/activities/{}/participant?email={}",
            base.trim_end_matches('/'),
            component(activity),
            component(email)
        )
    }

    fn component(raw: &str) -> String {
        utf8_percent_encode(raw, COMPONENT).to_string()
    }
}

/// Interpret a sign-up/unregister response body.
///
/// 2xx bodies surface their `message`; anything else surfaces `detail` or
/// the per-operation fallback. A body that is not JSON at all is a
/// transport-tier failure and propagates as `Err`.
pub(crate) fn read_reply(ok: bool, body: &str, rejected_fallback: &str) -> Result<ApiOutcome> {
    let reply: ApiReply = serde_json::from_str(body)?;
    if ok {
        Ok(ApiOutcome::Accepted(reply.message.unwrap_or_default()))
    } else {
        Ok(ApiOutcome::Rejected(
            reply
                .detail
                .unwrap_or_else(|| rejected_fallback.to_string()),
        ))
    }
}
