use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::RequestBuilder;

use crate::infra::config::ApiKey;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Correlation id attached to each upstream call and to its log lines.
/// Unique within the process: `nv-<pid>-<seq>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn next() -> Self {
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("nv-{:x}-{seq}", std::process::id()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Everything the vision endpoint expects besides the body: bearer credential,
/// correlation id and user agent. `Content-Type` comes from `.json()`.
pub fn upstream_headers(builder: RequestBuilder, key: &ApiKey, rid: &RequestId) -> RequestBuilder {
    builder
        .header(AUTHORIZATION, format!("Bearer {}", key.expose()))
        .header(REQUEST_ID_HEADER, rid.as_str())
        .header(USER_AGENT, user_agent())
}
