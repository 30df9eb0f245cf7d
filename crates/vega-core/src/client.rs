//! HTTP client for the vega scraper
//!
//! Thin wrapper over reqwest with a fixed per-request deadline and a
//! pinned header profile per extraction procedure. No retries, no rate
//! limiting and no cross-call state: a failed fetch surfaces immediately
//! and the caller owns retry policy. Non-2xx responses are returned with
//! their status code instead of being raised, so procedures can convert
//! them into distinguishable `Fail` outcomes.

use std::time::Duration;

use crate::error::Result;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

/// Fixed user-agent/referer pair pinned by one extraction procedure
///
/// Each procedure carries its own profile as configuration; nothing is
/// derived at runtime.
#[derive(Debug, Clone, Copy)]
pub struct HeaderProfile {
    /// User-Agent header value
    pub user_agent: &'static str,

    /// Referer header value, if the upstream requires one
    pub referer: Option<&'static str>,
}

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MOBILE_UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

impl HeaderProfile {
    /// Profile for aggregation-site content pages
    pub const CONTENT_PAGE: HeaderProfile = HeaderProfile {
        user_agent: DESKTOP_UA,
        referer: None,
    };

    /// Profile for link-locker and bypass intermediary pages
    pub const LOCKER: HeaderProfile = HeaderProfile {
        user_agent: DESKTOP_UA,
        referer: Some("https://google.com/"),
    };

    /// Profile for HubDrive file pages
    pub const HUBDRIVE: HeaderProfile = HeaderProfile {
        user_agent: MOBILE_UA,
        referer: Some("https://hubdrive.space/"),
    };
}

/// A fetched page: status code plus body text
///
/// The status is carried alongside the body rather than checked here;
/// only the procedures that validate status do so.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code as returned by the upstream
    pub status: u16,

    /// Response body decoded as text
    pub body: String,
}

impl PageResponse {
    /// Returns true for 2xx status codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client shared by the scraper facade
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a URL with the given header profile
    ///
    /// Returns the body and status code for any completed response,
    /// including non-2xx ones.
    ///
    /// # Errors
    /// `HttpError` on network failure or when the request deadline is
    /// exceeded.
    pub async fn fetch(&self, url: &str, profile: HeaderProfile) -> Result<PageResponse> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, profile.user_agent);

        if let Some(referer) = profile.referer {
            request = request.header(reqwest::header::REFERER, referer);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(PageResponse { status, body })
    }
}
