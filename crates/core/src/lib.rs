//! Page auditing for search engines and generative answer engines.
//!
//! The pipeline is extraction, rule evaluation, scoring and
//! recommendations, all pure. [`Auditor`] adds the page fetch and the
//! robots.txt, sitemap, llms.txt and llms-full.txt probes around it.
//!
//! ```rust
//! use geolens_core::{ProbeResults, ResponseHeaders, analyze_document};
//!
//! let html = r#"<html><head><title>Hello</title></head><body><p>Hi there.</p></body></html>"#;
//! let headers = ResponseHeaders::new();
//! let result = analyze_document(html, "https://example.com/", &headers, 0, &ProbeResults::default());
//! println!("{}: {}", result.domain, result.overall_score);
//! ```

pub mod audit;
pub mod cdn;
pub mod checks;
pub mod eeata;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod frameworks;
pub mod probes;
pub mod recommendations;
pub mod scoring;
pub mod signals;
pub mod text;

#[cfg(feature = "fetch")]
pub use audit::analyze_url;
pub use audit::{AnalysisResult, AuditConfig, AuditConfigBuilder, Auditor, ProbeScheme, analyze_document};
pub use checks::{AuditChecks, CheckResult, CheckStatus, CheckValue, evaluate};
pub use eeata::eeata_score;
pub use error::{GeoLensError, Result};
pub use extract::extract_signals;
#[cfg(feature = "fetch")]
pub use fetch::fetch_page;
pub use fetch::{FetchConfig, FetchedPage};
pub use formatters::{to_json, to_text};
#[cfg(feature = "fetch")]
pub use probes::Prober;
pub use probes::{ProbeResults, RobotsProbe, SitemapProbe, TextFileProbe};
pub use recommendations::{Impact, Priority, Recommendation, recommend};
pub use scoring::{Category, CategoryId, CategoryScores, Criterion, CriterionStatus, aggregate, overall_score};
pub use signals::{ExtractedSignals, JsRendering, RenderingType, ResponseHeaders};
