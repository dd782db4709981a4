//! Primary page fetching.
//!
//! The primary fetch is the only fatal I/O in an analysis. Transport
//! failures and non-success statuses are returned as errors, unlike the
//! auxiliary probes which degrade silently. [`FetchConfig`] and URL
//! validation are always available; the network calls need the `fetch`
//! feature.

#[cfg(feature = "fetch")]
use std::time::{Duration, Instant};

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use reqwest::header::HeaderMap;
use url::Url;

use crate::signals::ResponseHeaders;
use crate::{GeoLensError, Result};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; GeoLens/1.0)".to_string(),
        }
    }
}

/// A fetched page together with what the analysis needs from the response.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    /// Milliseconds from request start until the body was read.
    pub load_time_ms: u64,
    /// URL after redirects.
    pub final_url: String,
    pub headers: ResponseHeaders,
}

/// Validate that `url` is an absolute http(s) URL.
pub fn parse_page_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| GeoLensError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(GeoLensError::InvalidUrl(format!("unsupported scheme '{other}' in {url}"))),
    }
}

/// Collapse a header map into lowercase names, joining repeats with `", "`.
#[cfg(feature = "fetch")]
pub fn collect_headers(headers: &HeaderMap) -> ResponseHeaders {
    let mut collected = ResponseHeaders::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_lowercase())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    collected
}

/// Fetches a page, following redirects.
///
/// Uses a browser-like Accept header and the configured User-Agent. Elapsed
/// time covers the request and reading the body.
#[cfg(feature = "fetch")]
pub async fn fetch_page(url: &str, config: &FetchConfig) -> Result<FetchedPage> {
    let parsed_url = parse_page_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(GeoLensError::HttpError)?;

    let started = Instant::now();
    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { GeoLensError::Timeout { timeout: config.timeout } } else { GeoLensError::HttpError(e) }
        })?;

    let status = response.status();
    let final_url = response.url().to_string();
    if !status.is_success() {
        return Err(GeoLensError::HttpStatus { status: status.as_u16(), url: final_url });
    }

    let headers = collect_headers(response.headers());
    let html = response.text().await?;
    let load_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    Ok(FetchedPage { html, load_time_ms, final_url, headers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("GeoLens"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_page_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new().unwrap().block_on(fetch_page("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(GeoLensError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_validation() {
        assert!(parse_page_url("http://example.com").is_ok());
        assert!(parse_page_url("https://example.com/path?q=1").is_ok());
        assert!(parse_page_url("example.com").is_err());
        assert!(matches!(parse_page_url("ftp://example.com"), Err(GeoLensError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_collect_headers_joins_repeats() {
        use reqwest::header::{HeaderValue, SET_COOKIE};

        let mut map = HeaderMap::new();
        map.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        map.append(SET_COOKIE, HeaderValue::from_static("b=2"));
        map.insert("CF-Ray", HeaderValue::from_static("abc"));

        let headers = collect_headers(&map);
        assert_eq!(headers.get("set-cookie").map(String::as_str), Some("a=1, b=2"));
        assert_eq!(headers.get("cf-ray").map(String::as_str), Some("abc"));
    }
}
