//! Audit orchestration.
//!
//! [`Auditor`] sequences one analysis: fetch the page, run the four
//! auxiliary probes concurrently, then hand everything to the pure
//! pipeline in [`analyze_document`]. Only the page fetch can fail.
//!
//! # Example
//!
//! ```rust,no_run
//! use geolens_core::{AuditConfig, Auditor};
//!
//! # #[tokio::main]
//! # async fn main() -> geolens_core::Result<()> {
//! let config = AuditConfig::builder().probe_timeout(5).max_recommendations(5).build();
//! let result = Auditor::new(config).analyze("https://example.com").await?;
//! println!("{} scored {}", result.domain, result.overall_score);
//! # Ok(())
//! # }
//! ```
//!
//! Markup that is already in hand can be scored without any I/O:
//!
//! ```rust
//! use geolens_core::{ProbeResults, ResponseHeaders, analyze_document};
//!
//! let html = "<html><head><title>Hello</title></head><body><h1>Hi</h1></body></html>";
//! let headers = ResponseHeaders::new();
//! let result = analyze_document(html, "https://example.com/", &headers, 0, &ProbeResults::default());
//! assert_eq!(result.domain, "example.com");
//! assert!(result.overall_score <= 100);
//! ```

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

use crate::checks::{AuditChecks, evaluate};
use crate::fetch::FetchConfig;
use crate::probes::ProbeResults;
use crate::recommendations::{MAX_RECOMMENDATIONS, Recommendation, recommend_with_limit};
use crate::scoring::{CategoryScores, aggregate, overall_score};
use crate::signals::{ExtractedSignals, ResponseHeaders};

#[cfg(feature = "fetch")]
use crate::fetch::{FetchedPage, fetch_page};
#[cfg(feature = "fetch")]
use crate::probes::Prober;
#[cfg(feature = "fetch")]
use crate::Result;

/// Where auxiliary probes are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeScheme {
    /// Always `https://<domain>/...`, whatever scheme the page used.
    #[default]
    Https,
    /// The page's own scheme, host and port.
    PageOrigin,
}

/// Configuration for an [`Auditor`].
///
/// # Example
///
/// ```rust
/// use geolens_core::{AuditConfig, ProbeScheme};
///
/// let config = AuditConfig::builder()
///     .probe_timeout(3)
///     .probe_scheme(ProbeScheme::PageOrigin)
///     .build();
/// assert_eq!(config.max_recommendations, 10);
/// ```
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Primary page fetch settings.
    pub fetch: FetchConfig,

    /// Per-request timeout of each auxiliary probe in seconds (default: 10).
    pub probe_timeout: u64,

    /// User-Agent sent with probe requests (default: `GeoLensBot/<version>`).
    pub probe_user_agent: String,

    /// Probe target (default: [`ProbeScheme::Https`]).
    pub probe_scheme: ProbeScheme,

    /// Recommendation cap, clamped to [`MAX_RECOMMENDATIONS`] (default: 10).
    pub max_recommendations: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            probe_timeout: 10,
            probe_user_agent: format!("GeoLensBot/{}", env!("CARGO_PKG_VERSION")),
            probe_scheme: ProbeScheme::default(),
            max_recommendations: MAX_RECOMMENDATIONS,
        }
    }
}

impl AuditConfig {
    /// Creates a new builder for AuditConfig.
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }
}

/// Builder for AuditConfig.
pub struct AuditConfigBuilder {
    config: AuditConfig,
}

impl AuditConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AuditConfig::default() }
    }

    /// Sets the primary fetch configuration.
    pub fn fetch(mut self, value: FetchConfig) -> Self {
        self.config.fetch = value;
        self
    }

    /// Sets the primary fetch timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the primary fetch User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the probe timeout in seconds.
    pub fn probe_timeout(mut self, value: u64) -> Self {
        self.config.probe_timeout = value;
        self
    }

    /// Sets the probe User-Agent.
    pub fn probe_user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.probe_user_agent = value.into();
        self
    }

    /// Sets where probes are sent.
    pub fn probe_scheme(mut self, value: ProbeScheme) -> Self {
        self.config.probe_scheme = value;
        self
    }

    /// Sets the recommendation cap. Values above 10 are clamped.
    pub fn max_recommendations(mut self, value: usize) -> Self {
        self.config.max_recommendations = value.min(MAX_RECOMMENDATIONS);
        self
    }

    /// Builds the config.
    pub fn build(self) -> AuditConfig {
        self.config
    }
}

impl Default for AuditConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Root result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Final URL after redirects.
    pub url: String,
    pub domain: String,
    /// RFC 3339 UTC time the result was assembled.
    pub timestamp: String,
    pub overall_score: u32,
    pub categories: CategoryScores,
    pub recommendations: Vec<Recommendation>,
    pub raw_data: ExtractedSignals,
    pub checks: AuditChecks,
}

/// Run the pure pipeline over markup already in hand.
///
/// Extraction, checks, scoring and recommendations run in order with no I/O.
/// Two calls on identical input differ only in `timestamp`.
pub fn analyze_document(
    html: &str, final_url: &str, headers: &ResponseHeaders, load_time_ms: u64, probes: &ProbeResults,
) -> AnalysisResult {
    run_pipeline(html, final_url, headers, load_time_ms, probes, MAX_RECOMMENDATIONS)
}

fn run_pipeline(
    html: &str, final_url: &str, headers: &ResponseHeaders, load_time_ms: u64, probes: &ProbeResults, limit: usize,
) -> AnalysisResult {
    let mut raw_data = crate::extract::extract_signals(html, final_url, headers);
    raw_data.load_time = load_time_ms;

    let checks = evaluate(&raw_data, probes);
    let categories = aggregate(&raw_data, &checks);
    let overall_score = overall_score(&categories);
    let recommendations = recommend_with_limit(&categories, &checks, limit);

    AnalysisResult {
        url: final_url.to_string(),
        domain: host_of(final_url),
        timestamp: timestamp(),
        overall_score,
        categories,
        recommendations,
        raw_data,
        checks,
    }
}

fn host_of(url: &str) -> String {
    Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)).unwrap_or_default()
}

/// Current UTC time at millisecond precision.
fn timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    let now = now.replace_millisecond(now.millisecond()).unwrap_or(now);
    now.format(&Rfc3339).unwrap_or_default()
}

/// Runs full audits against live URLs.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Score markup already in hand with this auditor's recommendation cap.
    ///
    /// No probes run, so every auxiliary resource reports "not found".
    pub fn analyze_markup(&self, html: &str, final_url: &str) -> AnalysisResult {
        let probes = ProbeResults::default();
        run_pipeline(html, final_url, &ResponseHeaders::new(), 0, &probes, self.config.max_recommendations)
    }

    /// Fetch `url`, probe its site and score the page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GeoLensError::InvalidUrl`] for non-http(s) input, and
    /// `HttpStatus`, `Timeout` or `HttpError` when the page itself cannot be
    /// fetched.
    /// Probe failures are never errors.
    #[cfg(feature = "fetch")]
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        tracing::info!(url, "starting analysis");

        let page = fetch_page(url, &self.config.fetch).await.inspect_err(|err| {
            tracing::warn!(url, error = %err, "page fetch failed");
        })?;
        tracing::debug!(final_url = %page.final_url, load_time_ms = page.load_time_ms, "page fetched");

        let probes = self.probe(&page).await?;
        let FetchedPage { html, load_time_ms, final_url, headers } = page;

        let result =
            run_pipeline(&html, &final_url, &headers, load_time_ms, &probes, self.config.max_recommendations);
        tracing::info!(url = %result.url, score = result.overall_score, "analysis complete");
        Ok(result)
    }

    #[cfg(feature = "fetch")]
    async fn probe(&self, page: &FetchedPage) -> Result<ProbeResults> {
        let Some(base) = self.probe_base(&page.final_url) else {
            tracing::debug!(final_url = %page.final_url, "no probe base; skipping probes");
            return Ok(ProbeResults::default());
        };

        let prober = Prober::new(self.config.probe_timeout, &self.config.probe_user_agent)?;
        let probes = prober.probe_all(&base).await;
        tracing::debug!(
            base = %base,
            robots = probes.robots.exists,
            sitemap = probes.sitemap.exists,
            llms_txt = probes.llms_txt.exists,
            llms_full_txt = probes.llms_full_txt.exists,
            "probes finished"
        );
        Ok(probes)
    }

    /// Root URL the probes resolve their well-known paths against.
    pub fn probe_base(&self, final_url: &str) -> Option<Url> {
        let page = Url::parse(final_url).ok()?;
        match self.config.probe_scheme {
            ProbeScheme::Https => Url::parse(&format!("https://{}/", page.host_str()?)).ok(),
            ProbeScheme::PageOrigin => page.join("/").ok(),
        }
    }
}

/// Analyze `url` with the default configuration.
#[cfg(feature = "fetch")]
pub async fn analyze_url(url: &str) -> Result<AnalysisResult> {
    Auditor::default().analyze(url).await
}
