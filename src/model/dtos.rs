use serde::Deserialize;

/// Body of a sign-up or unregister response. The server sends `message` on
/// 2xx and `detail` on application errors; both are optional here so either
/// shape parses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Application-level result of a mutation, with fallback text already
/// applied. Transport and parse failures stay in `error::Error`; a rejected
/// request is an ordinary value because the page keeps running either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Accepted(String),
    Rejected(String),
}
