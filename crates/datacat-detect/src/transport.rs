// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const DEFAULT_USER_AGENT: &str = "datacat-registry/0.1 (catalog registry pipeline)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeError(pub String);

impl Display for ProbeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ProbeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ProbeResponse {
    #[must_use]
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_string()),
            body: body.into(),
        }
    }

    /// Media type with parameters stripped, lowercased.
    #[must_use]
    pub fn media_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
    }
}

/// Injection seam for probe HTTP. The pipeline uses `HttpTransport`; tests
/// use `StubTransport`.
pub trait ProbeTransport {
    fn fetch(&self, url: &str) -> Result<ProbeResponse, ProbeError>;
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Minimum gap between requests against the same origin.
    pub min_origin_delay: Duration,
    pub user_agent: String,
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            min_origin_delay: Duration::from_millis(500),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
    min_origin_delay: Duration,
    last_hit: Mutex<BTreeMap<String, Instant>>,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, ProbeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ProbeError(format!("http client build: {e}")))?;
        Ok(Self {
            client,
            min_origin_delay: config.min_origin_delay,
            last_hit: Mutex::new(BTreeMap::new()),
        })
    }

    fn respect_origin_delay(&self, url: &str) {
        let origin = origin_of(url);
        let wait = {
            let mut guard = match self.last_hit.lock() {
                Ok(g) => g,
                Err(_) => return,
            };
            let now = Instant::now();
            let wait = guard.get(&origin).and_then(|last| {
                self.min_origin_delay.checked_sub(now.duration_since(*last))
            });
            guard.insert(origin, now);
            wait
        };
        if let Some(dur) = wait {
            std::thread::sleep(dur);
        }
    }
}

impl ProbeTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        self.respect_origin_delay(url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProbeError(format!("GET {url}: {e}")))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .map_err(|e| ProbeError(format!("read body {url}: {e}")))?
            .to_vec();
        Ok(ProbeResponse {
            status,
            content_type,
            body,
        })
    }
}

fn origin_of(url: &str) -> String {
    let rest = url
        .split_once("://")
        .map_or(url, |(_, rest)| rest);
    rest.split('/').next().unwrap_or(rest).to_ascii_lowercase()
}

/// Canned responses keyed by exact URL; anything else is a connection error.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: BTreeMap<String, ProbeResponse>,
}

impl StubTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, url: &str, response: ProbeResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }
}

impl ProbeTransport for StubTransport {
    fn fetch(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ProbeError(format!("connection refused: {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{origin_of, ProbeResponse};

    #[test]
    fn media_type_strips_parameters() {
        let resp = ProbeResponse::ok("application/json; charset=utf-8", b"{}".to_vec());
        assert_eq!(resp.media_type().as_deref(), Some("application/json"));
    }

    #[test]
    fn origin_groups_by_host() {
        assert_eq!(origin_of("https://data.gov/api/x"), "data.gov");
        assert_eq!(origin_of("https://Data.gov"), "data.gov");
    }
}
