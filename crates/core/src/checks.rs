//! Rule engine: signals and probe results in, 23 named checks out.
//!
//! Every check is a pure function of its inputs. Only `eeata` and
//! `jsBlocksAI` lean on shared helpers ([`crate::eeata::eeata_score`] and the
//! JS accessibility formatters below).

use std::fmt;

use serde::Serialize;

use crate::eeata::eeata_score;
use crate::probes::{ProbeResults, RobotsProbe, SitemapProbe, TextFileProbe};
use crate::signals::{ExtractedSignals, JsRendering, RenderingType};

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
    /// Informational; absence is not counted against the page at check level.
    Info,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Fail => "fail",
            Self::Info => "info",
        }
    }

    fn from_bool(ok: bool, otherwise: CheckStatus) -> Self {
        if ok { Self::Pass } else { otherwise }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional measured value attached to a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CheckValue {
    Bool(bool),
    Number(u64),
    Text(String),
}

impl From<usize> for CheckValue {
    fn from(value: usize) -> Self {
        Self::Number(value as u64)
    }
}

impl From<u32> for CheckValue {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

impl From<String> for CheckValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CheckValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CheckValue>,
}

impl CheckResult {
    pub fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None, value: None }
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn value(mut self, value: impl Into<CheckValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Details text, or an empty string when absent.
    pub fn details_or_empty(&self) -> &str {
        self.details.as_deref().unwrap_or_default()
    }

    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

/// The fixed set of 23 checks, serialized under their camelCase identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditChecks {
    pub ssl: CheckResult,
    pub robots_txt: CheckResult,
    pub sitemap: CheckResult,
    pub canonical: CheckResult,
    pub hreflang: CheckResult,
    pub http_redirect: CheckResult,
    pub cdn_detected: CheckResult,

    pub meta_title: CheckResult,
    pub meta_description: CheckResult,
    pub structured_data: CheckResult,
    pub semantic_html: CheckResult,

    pub llm_bot_blocked: CheckResult,
    pub llms_txt: CheckResult,
    pub llms_full_txt: CheckResult,
    pub ai_content_ready: CheckResult,
    #[serde(rename = "jsBlocksAI")]
    pub js_blocks_ai: CheckResult,

    pub internal_linking: CheckResult,
    pub multiple_slashes: CheckResult,
    pub eeata: CheckResult,

    #[serde(rename = "ga4Detected")]
    pub ga4_detected: CheckResult,
    pub rank_math_detected: CheckResult,
    pub wordfence_detected: CheckResult,
    pub yoast_detected: CheckResult,
}

impl AuditChecks {
    /// Every check paired with its serialized identifier, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CheckResult)> {
        [
            ("ssl", &self.ssl),
            ("robotsTxt", &self.robots_txt),
            ("sitemap", &self.sitemap),
            ("canonical", &self.canonical),
            ("hreflang", &self.hreflang),
            ("httpRedirect", &self.http_redirect),
            ("cdnDetected", &self.cdn_detected),
            ("metaTitle", &self.meta_title),
            ("metaDescription", &self.meta_description),
            ("structuredData", &self.structured_data),
            ("semanticHtml", &self.semantic_html),
            ("llmBotBlocked", &self.llm_bot_blocked),
            ("llmsTxt", &self.llms_txt),
            ("llmsFullTxt", &self.llms_full_txt),
            ("aiContentReady", &self.ai_content_ready),
            ("jsBlocksAI", &self.js_blocks_ai),
            ("internalLinking", &self.internal_linking),
            ("multipleSlashes", &self.multiple_slashes),
            ("eeata", &self.eeata),
            ("ga4Detected", &self.ga4_detected),
            ("rankMathDetected", &self.rank_math_detected),
            ("wordfenceDetected", &self.wordfence_detected),
            ("yoastDetected", &self.yoast_detected),
        ]
        .into_iter()
    }
}

/// Evaluate every rule.
pub fn evaluate(signals: &ExtractedSignals, probes: &ProbeResults) -> AuditChecks {
    let meta = &signals.meta;
    let tools = &signals.tools;

    AuditChecks {
        ssl: ssl_check(meta.has_ssl),
        robots_txt: robots_check(&probes.robots),
        sitemap: sitemap_check(&probes.sitemap),
        canonical: if meta.has_canonical {
            CheckResult::new(CheckStatus::Pass, format!("Canonical tag present: {}", meta.canonical_url))
                .details("Canonical URL helps prevent duplicate content issues")
        } else {
            CheckResult::new(CheckStatus::Warning, "No canonical tag found")
                .details("Add canonical tags to prevent duplicate content")
        },
        hreflang: hreflang_check(signals),
        http_redirect: CheckResult::new(
            CheckStatus::from_bool(meta.has_ssl, CheckStatus::Fail),
            if meta.has_ssl { "HTTPS is enabled" } else { "HTTP to HTTPS redirect needed" },
        )
        .details("Ensure all HTTP requests redirect to HTTPS"),
        cdn_detected: if signals.cdn.has_cdn {
            CheckResult::new(CheckStatus::Pass, format!("CDN detected: {}", signals.cdn.cdn_provider))
                .details("Content Delivery Network improves load times")
        } else {
            CheckResult::new(CheckStatus::Warning, "No CDN detected").details("Consider using a CDN for better performance")
        },

        meta_title: meta_title_check(&meta.title, meta.title_length),
        meta_description: meta_description_check(meta.meta_description_length),
        structured_data: if signals.schema.has_schema {
            CheckResult::new(
                CheckStatus::Pass,
                format!("Structured data found: {}", signals.schema.schema_types.join(", ")),
            )
            .details("JSON-LD structured data helps AI understand content")
        } else {
            CheckResult::new(CheckStatus::Fail, "No structured data markup found")
                .details("Add Schema.org markup (FAQ, Article, Organization, etc.)")
        },
        semantic_html: semantic_html_check(signals),

        llm_bot_blocked: llm_bots_check(&probes.robots),
        llms_txt: text_file_check(
            &probes.llms_txt,
            "llms.txt",
            "LLM-specific instructions are provided",
            "Consider adding llms.txt for AI crawler guidance",
        ),
        llms_full_txt: text_file_check(
            &probes.llms_full_txt,
            "llms-full.txt",
            "Full LLM context is available",
            "Consider adding llms-full.txt for comprehensive AI context",
        ),
        ai_content_ready: ai_content_check(signals),
        js_blocks_ai: js_blocks_ai_check(signals),

        internal_linking: internal_linking_check(signals.structure.internal_links),
        multiple_slashes: multiple_slashes_check(signals.urls_with_multiple_slashes),
        eeata: eeata_check(eeata_score(signals)),

        ga4_detected: tool_check(
            tools.has_ga4,
            CheckStatus::Warning,
            ("Google Analytics 4 detected", "GA4 is properly installed"),
            ("Google Analytics 4 not detected", "Consider installing Google Analytics 4 for tracking"),
        ),
        rank_math_detected: tool_check(
            tools.has_rank_math,
            CheckStatus::Info,
            ("Rank Math SEO detected", "Rank Math is installed"),
            ("Rank Math SEO not detected", "Consider installing Rank Math for better SEO management"),
        ),
        wordfence_detected: tool_check(
            tools.has_wordfence,
            CheckStatus::Info,
            ("Wordfence Security detected", "Wordfence is protecting your site"),
            ("Wordfence Security not detected", "Consider installing Wordfence for security"),
        ),
        yoast_detected: tool_check(
            tools.has_yoast,
            CheckStatus::Info,
            ("Yoast SEO detected", "Yoast SEO is installed"),
            ("Yoast SEO not detected", "An SEO plugin such as Yoast helps manage on-page metadata"),
        ),
    }
}

fn ssl_check(has_ssl: bool) -> CheckResult {
    if has_ssl {
        CheckResult::new(CheckStatus::Pass, "SSL Certificate is active (HTTPS)").details("Site is secure with HTTPS")
    } else {
        CheckResult::new(CheckStatus::Fail, "No SSL Certificate detected").details("Site is using HTTP - security risk")
    }
}

fn robots_check(robots: &RobotsProbe) -> CheckResult {
    if robots.exists {
        CheckResult::new(CheckStatus::Pass, "robots.txt file found").details("Robots.txt is properly configured")
    } else {
        CheckResult::new(CheckStatus::Fail, "robots.txt file not found")
            .details("Create a robots.txt file to control crawler access")
    }
}

fn sitemap_check(sitemap: &SitemapProbe) -> CheckResult {
    match (sitemap.exists, &sitemap.url) {
        (true, url) => CheckResult::new(
            CheckStatus::Pass,
            format!("Sitemap found: {}", url.as_deref().unwrap_or_default()),
        )
        .details("XML sitemap helps search engines discover content"),
        (false, _) => {
            CheckResult::new(CheckStatus::Fail, "No sitemap found").details("Create an XML sitemap for better indexing")
        }
    }
}

fn hreflang_check(signals: &ExtractedSignals) -> CheckResult {
    let joined = signals.meta.hreflang_tags.join(", ");
    let check = if signals.meta.has_hreflang {
        CheckResult::new(CheckStatus::Pass, format!("Hreflang tags found: {joined}"))
            .details("Multi-language/region targeting is configured")
    } else {
        CheckResult::new(CheckStatus::Info, "No hreflang tags detected")
            .details("Add hreflang tags if targeting multiple countries/languages (e.g., en-sg)")
    };
    check.value(joined)
}

/// Pass for 30-60 characters, warning for any other non-empty title.
fn meta_title_check(title: &str, length: usize) -> CheckResult {
    let optimal = (30..=60).contains(&length);
    let status = match (optimal, length) {
        (true, _) => CheckStatus::Pass,
        (false, 0) => CheckStatus::Fail,
        (false, _) => CheckStatus::Warning,
    };

    let message = if length > 0 {
        let preview: String = title.chars().take(50).collect();
        let ellipsis = if title.chars().count() > 50 { "..." } else { "" };
        format!("Title: \"{preview}{ellipsis}\" ({length} chars)")
    } else {
        "No meta title found".to_string()
    };

    let details = match length {
        0 => "Add a meta title",
        l if l < 30 => "Title is too short (aim for 30-60 chars)",
        l if l > 60 => "Title is too long (aim for 30-60 chars)",
        _ => "Title length is optimal (30-60 chars)",
    };

    CheckResult::new(status, message).details(details).value(length)
}

/// Pass for 120-160 characters, warning for any other non-empty description.
fn meta_description_check(length: usize) -> CheckResult {
    let status = match ((120..=160).contains(&length), length) {
        (true, _) => CheckStatus::Pass,
        (false, 0) => CheckStatus::Fail,
        (false, _) => CheckStatus::Warning,
    };

    let message =
        if length > 0 { format!("Description: {length} chars") } else { "No meta description found".to_string() };

    let details = match length {
        0 => "Add a meta description",
        l if l < 120 => "Description is too short (aim for 120-160 chars)",
        l if l > 160 => "Description is too long (aim for 120-160 chars)",
        _ => "Description length is optimal (120-160 chars)",
    };

    CheckResult::new(status, message).details(details).value(length)
}

fn semantic_html_check(signals: &ExtractedSignals) -> CheckResult {
    let lm = &signals.structure.landmarks;

    let status = if lm.has_header && lm.has_main && lm.has_footer {
        CheckStatus::Pass
    } else if lm.has_header || lm.has_main || lm.has_footer || lm.has_article || lm.has_section {
        CheckStatus::Warning
    } else {
        CheckStatus::Fail
    };

    let found: Vec<&str> = [
        (lm.has_header, "header"),
        (lm.has_main, "main"),
        (lm.has_footer, "footer"),
        (lm.has_article, "article"),
        (lm.has_section, "section"),
        (lm.has_navigation, "nav"),
        (lm.has_aside, "aside"),
    ]
    .into_iter()
    .filter_map(|(present, name)| present.then_some(name))
    .collect();

    let listed = if found.is_empty() { "None found".to_string() } else { found.join(", ") };
    CheckResult::new(status, format!("Semantic elements: {listed}"))
        .details("Semantic HTML helps AI understand page structure")
}

fn llm_bots_check(robots: &RobotsProbe) -> CheckResult {
    if robots.llm_bots_blocked.is_empty() {
        CheckResult::new(CheckStatus::Pass, "No LLM bots are blocked").details("AI crawlers can access your content")
    } else {
        CheckResult::new(CheckStatus::Warning, format!("LLM bots blocked: {}", robots.llm_bots_blocked.join(", ")))
            .details("Consider allowing AI bots for GEO visibility")
    }
}

fn text_file_check(probe: &TextFileProbe, file: &str, found: &str, missing: &str) -> CheckResult {
    if probe.exists {
        CheckResult::new(CheckStatus::Pass, format!("{file} file found")).details(found)
    } else {
        CheckResult::new(CheckStatus::Info, format!("No {file} file found")).details(missing)
    }
}

fn tick(flag: bool) -> &'static str {
    if flag { "✓" } else { "✗" }
}

fn ai_content_check(signals: &ExtractedSignals) -> CheckResult {
    let author = signals.trust.has_author_info;
    let date = signals.trust.has_date_published;
    let words = signals.content.word_count;

    let status = if author && date && words >= 500 {
        CheckStatus::Pass
    } else if author || date || words >= 300 {
        CheckStatus::Warning
    } else {
        CheckStatus::Fail
    };

    CheckResult::new(
        status,
        format!("E-E-A-T-A signals: Author: {}, Date: {}, Content depth: {words} words", tick(author), tick(date)),
    )
    .details("Experience, Expertise, Authoritativeness, Trustworthiness, AI-readiness")
}

fn js_blocks_ai_check(signals: &ExtractedSignals) -> CheckResult {
    let score = signals.js.js_blocking_score;
    let status = match score {
        0..=10 => CheckStatus::Pass,
        11..=30 => CheckStatus::Warning,
        _ => CheckStatus::Fail,
    };

    CheckResult::new(status, js_accessibility_message(&signals.js))
        .details(js_accessibility_details(&signals.js, signals.content.content_to_html_ratio))
        .value(score)
}

fn internal_linking_check(internal: usize) -> CheckResult {
    let status = match internal {
        n if n >= 10 => CheckStatus::Pass,
        n if n >= 3 => CheckStatus::Warning,
        _ => CheckStatus::Fail,
    };
    let details = if internal >= 10 {
        "Good internal linking structure"
    } else {
        "Add more internal links to improve site structure"
    };
    CheckResult::new(status, format!("{internal} internal links found")).details(details).value(internal)
}

fn multiple_slashes_check(count: usize) -> CheckResult {
    let check = if count == 0 {
        CheckResult::new(CheckStatus::Pass, "No URLs with multiple slashes")
    } else {
        CheckResult::new(CheckStatus::Warning, format!("{count} URLs with multiple slashes found"))
    };
    check.details("Multiple slashes in URLs can cause crawling issues")
}

fn eeata_check(score: u32) -> CheckResult {
    let status = match score {
        s if s >= 70 => CheckStatus::Pass,
        s if s >= 40 => CheckStatus::Warning,
        _ => CheckStatus::Fail,
    };
    CheckResult::new(status, format!("E-E-A-T-A Score: {score}/100"))
        .details("Experience, Expertise, Authoritativeness, Trustworthiness, AI-driven content")
        .value(score)
}

fn tool_check(detected: bool, otherwise: CheckStatus, found: (&str, &str), missing: (&str, &str)) -> CheckResult {
    let (message, details) = if detected { found } else { missing };
    CheckResult::new(CheckStatus::from_bool(detected, otherwise), message).details(details)
}

/// One-line summary of how accessible the page is to crawlers that do not
/// execute JavaScript, tiered on the blocking score.
pub fn js_accessibility_message(js: &JsRendering) -> String {
    if js.js_frameworks.is_empty() {
        return "✅ No JavaScript frameworks detected - content is fully accessible to AI crawlers (GPTBot, ClaudeBot, PerplexityBot)"
            .to_string();
    }

    let frameworks = js.js_frameworks.join(", ");
    let rendering = js.js_rendering_type.as_str().to_uppercase();
    let score = js.js_blocking_score;
    let accessibility = 100u32.saturating_sub(score);

    match score {
        0..=10 => format!("✅ {frameworks} with {rendering} - Excellent AI accessibility ({accessibility}/100)"),
        11..=25 => format!("✅ {frameworks} ({rendering}) - Good AI accessibility ({accessibility}/100)"),
        26..=45 => format!(
            "⚠️ {frameworks} ({rendering}) - Partial AI accessibility ({accessibility}/100) - Optimization needed"
        ),
        46..=65 => format!(
            "❌ {frameworks} ({rendering}) - Poor AI accessibility ({accessibility}/100) - AI crawlers may miss content"
        ),
        _ => format!("🚨 {frameworks} ({rendering}) - Critical: AI crawlers likely see blank page ({accessibility}/100)"),
    }
}

/// Multi-section breakdown joined with `" || "`.
pub fn js_accessibility_details(js: &JsRendering, content_ratio: f64) -> String {
    let ratio = content_ratio.round() as i64;

    if js.js_frameworks.is_empty() {
        return [
            "✅ OPTIMAL: Static HTML content - fully accessible to GPTBot, ClaudeBot, PerplexityBot".to_string(),
            format!("✅ Content-to-HTML ratio: {ratio}% (AI can read all content)"),
            "✅ No JavaScript execution required".to_string(),
        ]
        .join(" || ");
    }

    let mut lines: Vec<String> = vec!["🔍 RENDERING ANALYSIS:".to_string()];
    lines.push(
        match js.js_rendering_type {
            RenderingType::Static => "✅ Static/Pre-rendered - AI crawlers see full content",
            RenderingType::Ssr => "✅ Server-Side Rendered (SSR) - Content available in initial HTML",
            RenderingType::Csr => "🚨 CLIENT-SIDE RENDERED (CSR) - CRITICAL: AI crawlers see blank/minimal content!",
            RenderingType::Hybrid => "⚠️ Hybrid rendering - Some content may be invisible to AI",
        }
        .to_string(),
    );

    lines.push(String::new());
    lines.push("🛠️ FRAMEWORK ANALYSIS:".to_string());
    for framework in &js.js_framework_details {
        if framework.has_ssr {
            lines.push(format!("✅ {}: {} - GEO Friendly", framework.name, framework.rendering_method));
        } else {
            lines.push(format!(
                "❌ {}: {} - GEO PROBLEM: Not accessible to AI crawlers",
                framework.name, framework.rendering_method
            ));
        }
    }

    lines.push(String::new());
    lines.push("📝 FALLBACK CONTENT:".to_string());
    lines.push(if js.has_noscript_content {
        "✅ Noscript fallback present - AI has alternative content".to_string()
    } else {
        "❌ NO noscript fallback - AI crawlers see nothing if JS fails".to_string()
    });

    lines.push(String::new());
    lines.push("📊 CONTENT VISIBILITY:".to_string());
    lines.push(if content_ratio >= 25.0 {
        format!("✅ Excellent content ratio: {ratio}% - Most content visible without JS")
    } else if content_ratio >= 15.0 {
        format!("✅ Good content ratio: {ratio}%")
    } else if content_ratio >= 8.0 {
        format!("⚠️ Low content ratio: {ratio}% - Much content requires JS")
    } else {
        format!("🚨 CRITICAL: Very low content ratio: {ratio}% - Almost all content requires JS execution")
    });

    let (external, inline) = (js.external_script_count, js.inline_script_count);
    lines.push(String::new());
    lines.push("💻 SCRIPT LOAD:".to_string());
    lines.push(if external <= 5 && inline <= 3 {
        format!("✅ Light script load: {external} external, {inline} inline")
    } else if external <= 12 {
        format!("⚠️ Moderate script load: {external} external, {inline} inline")
    } else {
        format!("❌ Heavy script load: {external} external, {inline} inline - May slow AI crawling")
    });

    if js.has_dynamic_content {
        lines.push(String::new());
        lines.push("⚠️ Dynamic content indicators detected - Some content loaded via JavaScript".to_string());
    }
    if js.has_lazy_loading {
        lines.push("⚠️ Lazy loading detected - Below-fold content may not be indexed by AI".to_string());
    }

    lines.join(" || ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::FrameworkDetail;
    use rstest::rstest;

    fn signals() -> ExtractedSignals {
        ExtractedSignals::default()
    }

    #[rstest]
    #[case(0, CheckStatus::Fail)]
    #[case(29, CheckStatus::Warning)]
    #[case(30, CheckStatus::Pass)]
    #[case(60, CheckStatus::Pass)]
    #[case(61, CheckStatus::Warning)]
    fn test_meta_title_thresholds(#[case] length: usize, #[case] expected: CheckStatus) {
        let title = "x".repeat(length);
        assert_eq!(meta_title_check(&title, length).status, expected);
    }

    #[test]
    fn test_meta_title_message_truncates() {
        let title = "a".repeat(70);
        let check = meta_title_check(&title, 70);
        assert_eq!(check.message, format!("Title: \"{}...\" (70 chars)", "a".repeat(50)));
        assert_eq!(check.details.as_deref(), Some("Title is too long (aim for 30-60 chars)"));
        assert_eq!(check.value, Some(CheckValue::Number(70)));
    }

    #[rstest]
    #[case(0, CheckStatus::Fail)]
    #[case(119, CheckStatus::Warning)]
    #[case(120, CheckStatus::Pass)]
    #[case(160, CheckStatus::Pass)]
    #[case(161, CheckStatus::Warning)]
    fn test_meta_description_thresholds(#[case] length: usize, #[case] expected: CheckStatus) {
        assert_eq!(meta_description_check(length).status, expected);
    }

    #[test]
    fn test_semantic_html() {
        let mut s = signals();
        assert_eq!(semantic_html_check(&s).status, CheckStatus::Fail);
        assert_eq!(semantic_html_check(&s).message, "Semantic elements: None found");

        s.structure.landmarks.has_section = true;
        s.structure.landmarks.has_navigation = true;
        let check = semantic_html_check(&s);
        assert_eq!(check.status, CheckStatus::Warning);
        assert_eq!(check.message, "Semantic elements: section, nav");

        s.structure.landmarks.has_header = true;
        s.structure.landmarks.has_main = true;
        s.structure.landmarks.has_footer = true;
        assert_eq!(semantic_html_check(&s).status, CheckStatus::Pass);
    }

    #[test]
    fn test_nav_alone_is_not_semantic() {
        let mut s = signals();
        s.structure.landmarks.has_navigation = true;
        assert_eq!(semantic_html_check(&s).status, CheckStatus::Fail);
    }

    #[rstest]
    #[case(true, true, 500, CheckStatus::Pass)]
    #[case(true, true, 499, CheckStatus::Warning)]
    #[case(false, false, 300, CheckStatus::Warning)]
    #[case(false, true, 0, CheckStatus::Warning)]
    #[case(false, false, 299, CheckStatus::Fail)]
    fn test_ai_content_ready(
        #[case] author: bool, #[case] date: bool, #[case] words: usize, #[case] expected: CheckStatus,
    ) {
        let mut s = signals();
        s.trust.has_author_info = author;
        s.trust.has_date_published = date;
        s.content.word_count = words;
        assert_eq!(ai_content_check(&s).status, expected);
    }

    #[rstest]
    #[case(10, CheckStatus::Pass)]
    #[case(11, CheckStatus::Warning)]
    #[case(30, CheckStatus::Warning)]
    #[case(31, CheckStatus::Fail)]
    fn test_js_blocks_ai_status(#[case] score: u32, #[case] expected: CheckStatus) {
        let mut s = signals();
        s.js.js_blocking_score = score;
        s.js.js_frameworks = vec!["React".to_string()];
        let check = js_blocks_ai_check(&s);
        assert_eq!(check.status, expected);
        assert_eq!(check.value, Some(CheckValue::Number(u64::from(score))));
    }

    #[rstest]
    #[case(10, "Excellent AI accessibility (90/100)")]
    #[case(25, "Good AI accessibility (75/100)")]
    #[case(45, "Partial AI accessibility (55/100)")]
    #[case(65, "Poor AI accessibility (35/100)")]
    #[case(66, "Critical: AI crawlers likely see blank page (34/100)")]
    fn test_js_message_tiers(#[case] score: u32, #[case] expected: &str) {
        let js = JsRendering {
            js_frameworks: vec!["React".to_string()],
            js_rendering_type: RenderingType::Csr,
            js_blocking_score: score,
            ..JsRendering::default()
        };
        assert!(js_accessibility_message(&js).contains(expected));
    }

    #[test]
    fn test_js_details_without_frameworks() {
        let details = js_accessibility_details(&JsRendering::default(), 42.4);
        let parts: Vec<&str> = details.split(" || ").collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].contains("42%"));
    }

    #[test]
    fn test_js_details_with_csr_framework() {
        let js = JsRendering {
            js_frameworks: vec!["React".to_string()],
            js_framework_details: vec![FrameworkDetail {
                name: "React".to_string(),
                has_ssr: false,
                has_hydration: true,
                rendering_method: "CSR".to_string(),
            }],
            js_rendering_type: RenderingType::Csr,
            has_lazy_loading: true,
            external_script_count: 14,
            ..JsRendering::default()
        };
        let details = js_accessibility_details(&js, 3.0);
        assert!(details.starts_with("🔍 RENDERING ANALYSIS: || 🚨 CLIENT-SIDE RENDERED (CSR)"));
        assert!(details.contains("❌ React: CSR - GEO PROBLEM"));
        assert!(details.contains("❌ NO noscript fallback"));
        assert!(details.contains("🚨 CRITICAL: Very low content ratio: 3%"));
        assert!(details.contains("❌ Heavy script load: 14 external, 0 inline"));
        assert!(details.ends_with("⚠️ Lazy loading detected - Below-fold content may not be indexed by AI"));
    }

    #[test]
    fn test_llm_bots_and_text_files() {
        let mut probes = ProbeResults::default();
        let checks = evaluate(&signals(), &probes);
        assert_eq!(checks.llm_bot_blocked.status, CheckStatus::Pass);
        assert_eq!(checks.llms_txt.status, CheckStatus::Info);
        assert_eq!(checks.llms_full_txt.status, CheckStatus::Info);
        assert_eq!(checks.robots_txt.status, CheckStatus::Fail);

        probes.robots = RobotsProbe::from_content("User-agent: GPTBot\nDisallow: /".to_string());
        probes.llms_txt = TextFileProbe { exists: true, content: Some("# Site".to_string()) };
        let checks = evaluate(&signals(), &probes);
        assert_eq!(checks.llm_bot_blocked.status, CheckStatus::Warning);
        assert_eq!(checks.llm_bot_blocked.message, "LLM bots blocked: GPTBot");
        assert_eq!(checks.llms_txt.status, CheckStatus::Pass);
        assert_eq!(checks.robots_txt.status, CheckStatus::Pass);
    }

    #[test]
    fn test_sitemap_message_includes_url() {
        let probes = ProbeResults {
            sitemap: SitemapProbe { exists: true, url: Some("https://example.com/sitemap.xml".to_string()) },
            ..ProbeResults::default()
        };
        let checks = evaluate(&signals(), &probes);
        assert_eq!(checks.sitemap.message, "Sitemap found: https://example.com/sitemap.xml");
    }

    #[test]
    fn test_tool_checks() {
        let mut s = signals();
        let checks = evaluate(&s, &ProbeResults::default());
        assert_eq!(checks.ga4_detected.status, CheckStatus::Warning);
        assert_eq!(checks.rank_math_detected.status, CheckStatus::Info);
        assert_eq!(checks.wordfence_detected.status, CheckStatus::Info);
        assert_eq!(checks.yoast_detected.status, CheckStatus::Info);

        s.tools.has_ga4 = true;
        s.tools.has_yoast = true;
        let checks = evaluate(&s, &ProbeResults::default());
        assert!(checks.ga4_detected.is_pass());
        assert!(checks.yoast_detected.is_pass());
    }

    #[test]
    fn test_checks_serialize_with_fixed_keys() {
        let checks = evaluate(&signals(), &ProbeResults::default());
        let value = serde_json::to_value(&checks).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 23);
        for (key, _) in checks.iter() {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(value["jsBlocksAI"]["status"], "pass");
        assert_eq!(value["hreflang"]["value"], "");
        assert!(value["ssl"].get("value").is_none());
    }

    #[test]
    fn test_internal_linking_thresholds() {
        assert_eq!(internal_linking_check(10).status, CheckStatus::Pass);
        assert_eq!(internal_linking_check(3).status, CheckStatus::Warning);
        assert_eq!(internal_linking_check(2).status, CheckStatus::Fail);
    }
}
