//! The flat signal record produced by the feature extractor.
//!
//! [`ExtractedSignals`] is grouped into sub-records for readability in Rust,
//! but every group is flattened when serialized so consumers see a single
//! camelCase object (`titleLength`, `hasFAQSchema`, `jsBlockingScore`, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Response headers keyed by lowercase header name.
///
/// Repeated headers are joined with `", "`. The map is ordered so header
/// scans (CDN detection) are deterministic.
pub type ResponseHeaders = BTreeMap<String, String>;

/// Every signal extracted from one page.
///
/// Created once per analysis by [`crate::extract_signals`]; the orchestrator
/// backfills [`ExtractedSignals::load_time`] afterwards and never touches it
/// again.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSignals {
    #[serde(flatten)]
    pub meta: PageMeta,

    #[serde(flatten)]
    pub structure: PageStructure,

    #[serde(flatten)]
    pub schema: SchemaSignals,

    #[serde(flatten)]
    pub trust: TrustSignals,

    #[serde(flatten)]
    pub content: ContentMetrics,

    #[serde(flatten)]
    pub tools: ThirdPartyTools,

    #[serde(flatten)]
    pub cdn: CdnDetection,

    #[serde(flatten)]
    pub js: JsRendering,

    /// `href` values containing `//` that are not absolute http(s) URLs.
    pub urls_with_multiple_slashes: usize,

    /// Elapsed time of the primary fetch in milliseconds.
    pub load_time: u64,
}

/// Identity text and meta/technical flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    /// Title length in characters.
    pub title_length: usize,
    pub meta_description: String,
    /// Description length in characters.
    pub meta_description_length: usize,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub has_canonical: bool,
    pub canonical_url: String,
    pub has_robots_meta: bool,
    pub robots_content: String,
    pub has_viewport: bool,
    pub has_charset: bool,
    pub has_favicon: bool,
    #[serde(rename = "hasSSL")]
    pub has_ssl: bool,
    pub has_hreflang: bool,
    pub hreflang_tags: Vec<String>,
}

/// Structural element counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub h4_count: usize,
    pub h5_count: usize,
    pub h6_count: usize,
    pub paragraph_count: usize,
    pub image_count: usize,
    /// Images with a non-empty `alt` attribute.
    pub images_with_alt: usize,
    pub link_count: usize,
    pub external_links: usize,
    pub internal_links: usize,
    /// `<ul>` plus `<ol>` elements.
    pub list_count: usize,
    /// `<li>` elements.
    pub bullet_points: usize,
    /// `<ol>` elements.
    pub numbered_lists: usize,
    pub table_count: usize,
    pub form_count: usize,
    /// `<video>` tags plus YouTube/Vimeo embeds.
    pub video_count: usize,
    pub iframe_count: usize,
    /// `<pre>` plus `<code>` elements.
    pub code_block_count: usize,
    pub blockquote_count: usize,

    #[serde(flatten)]
    pub landmarks: Landmarks,
}

/// HTML5 landmark elements present in the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmarks {
    pub has_header: bool,
    pub has_footer: bool,
    pub has_main: bool,
    pub has_article: bool,
    pub has_section: bool,
    pub has_aside: bool,
    pub has_navigation: bool,
}

/// JSON-LD structured data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSignals {
    pub has_schema: bool,
    /// Distinct `@type` values in discovery order.
    pub schema_types: Vec<String>,
    #[serde(rename = "hasFAQSchema")]
    pub has_faq_schema: bool,
    pub has_how_to_schema: bool,
    pub has_article_schema: bool,
    pub has_organization_schema: bool,
    pub has_local_business_schema: bool,
    pub has_breadcrumb_schema: bool,
}

/// Authorship and provenance signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSignals {
    pub has_author_info: bool,
    pub has_date_published: bool,
    pub has_date_modified: bool,
    pub has_breadcrumbs: bool,
    pub has_social_links: bool,
}

/// Lexical metrics computed over the stripped page text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub word_count: usize,
    /// Case-insensitive distinct tokens.
    pub unique_words: usize,
    pub question_count: usize,
    pub answer_patterns: usize,
    /// 0–100, higher is easier.
    pub readability_score: f64,
    pub avg_sentence_length: f64,
    pub avg_paragraph_length: f64,
    /// 0–100, stripped text length as a percentage of markup length.
    pub content_to_html_ratio: f64,
}

/// Third-party tooling spotted in the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyTools {
    #[serde(rename = "hasGA4")]
    pub has_ga4: bool,
    pub has_rank_math: bool,
    pub has_wordfence: bool,
    pub has_yoast: bool,
}

/// CDN provider detected from headers or markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CdnDetection {
    #[serde(rename = "hasCDN")]
    pub has_cdn: bool,
    /// Provider key (`cloudflare`, `fastly`, ...) or empty.
    pub cdn_provider: String,
}

/// How the page's content is produced relative to crawl time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingType {
    /// No framework markers at all.
    #[default]
    Static,
    /// Every detected framework renders on the server.
    Ssr,
    /// No detected framework renders on the server.
    Csr,
    /// Mixed.
    Hybrid,
}

impl RenderingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Ssr => "ssr",
            Self::Csr => "csr",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for RenderingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected JavaScript framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkDetail {
    pub name: String,
    #[serde(rename = "hasSSR")]
    pub has_ssr: bool,
    pub has_hydration: bool,
    pub rendering_method: String,
}

/// JavaScript rendering analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsRendering {
    pub js_frameworks: Vec<String>,
    pub js_framework_details: Vec<FrameworkDetail>,
    pub js_rendering_type: RenderingType,
    /// A `<noscript>` block with more than 50 characters of text.
    pub has_noscript_content: bool,
    pub inline_script_count: usize,
    pub external_script_count: usize,
    pub has_dynamic_content: bool,
    pub has_lazy_loading: bool,
    /// 0 (fully readable without JS) to 100 (blank without JS).
    pub js_blocking_score: u32,
}
