//! Scoring aggregator: checks and signals in, five weighted categories out.
//!
//! Each category is a fixed list of criteria. Most criteria map a check
//! status onto a score step (pass 100, warning some partial value, fail a
//! floor); a handful compute their score straight from raw signal values.
//! Category scores are weight-averaged and rounded, and the overall score is
//! a second weighted average over the categories.

use std::fmt;

use serde::Serialize;

use crate::checks::{AuditChecks, CheckResult, CheckStatus, CheckValue};
use crate::signals::ExtractedSignals;

/// Criterion status. Unlike [`CheckStatus`] there is no `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Pass,
    Warning,
    Fail,
}

impl CriterionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warning => "warning",
            Self::Fail => "fail",
        }
    }

    /// Translate a check status, mapping `info` onto `info_as`.
    pub fn from_check(status: CheckStatus, info_as: CriterionStatus) -> Self {
        match status {
            CheckStatus::Pass => Self::Pass,
            CheckStatus::Warning => Self::Warning,
            CheckStatus::Fail => Self::Fail,
            CheckStatus::Info => info_as,
        }
    }

    fn from_bool(ok: bool, otherwise: CriterionStatus) -> Self {
        if ok { Self::Pass } else { otherwise }
    }
}

impl fmt::Display for CriterionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weighted, scored criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub id: &'static str,
    pub name: &'static str,
    pub description: String,
    pub weight: u32,
    /// 0-100.
    pub score: u32,
    pub status: CriterionStatus,
    pub details: String,
}

/// The five scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    TechnicalSeo,
    ContentQuality,
    AiReadiness,
    SecurityTrust,
    UserExperience,
}

impl CategoryId {
    pub const ALL: [CategoryId; 5] =
        [Self::TechnicalSeo, Self::ContentQuality, Self::AiReadiness, Self::SecurityTrust, Self::UserExperience];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TechnicalSeo => "technical_seo",
            Self::ContentQuality => "content_quality",
            Self::AiReadiness => "ai_readiness",
            Self::SecurityTrust => "security_trust",
            Self::UserExperience => "user_experience",
        }
    }

    /// Human-readable name used in recommendations and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TechnicalSeo => "Technical SEO",
            Self::ContentQuality => "Content Quality",
            Self::AiReadiness => "AI Readiness",
            Self::SecurityTrust => "Security & Trust",
            Self::UserExperience => "User Experience",
        }
    }

    /// Weight in the overall score. AI readiness dominates.
    pub fn weight(&self) -> u32 {
        match self {
            Self::TechnicalSeo => 18,
            Self::ContentQuality => 22,
            Self::AiReadiness => 30,
            Self::SecurityTrust => 15,
            Self::UserExperience => 15,
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    #[serde(skip)]
    pub id: CategoryId,
    pub name: &'static str,
    /// Weight-averaged criterion score, rounded; 0 with no criteria.
    pub score: u32,
    pub criteria: Vec<Criterion>,
}

impl Category {
    pub fn new(id: CategoryId, criteria: Vec<Criterion>) -> Self {
        Self { id, name: id.display_name(), score: weighted_average(&criteria), criteria }
    }
}

/// All five categories, serialized as an object keyed by category id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScores {
    pub technical_seo: Category,
    pub content_quality: Category,
    pub ai_readiness: Category,
    pub security_trust: Category,
    pub user_experience: Category,
}

impl CategoryScores {
    /// Categories in fixed order: technical, content, AI, security, UX.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        [&self.technical_seo, &self.content_quality, &self.ai_readiness, &self.security_trust, &self.user_experience]
            .into_iter()
    }

    pub fn get(&self, id: CategoryId) -> &Category {
        match id {
            CategoryId::TechnicalSeo => &self.technical_seo,
            CategoryId::ContentQuality => &self.content_quality,
            CategoryId::AiReadiness => &self.ai_readiness,
            CategoryId::SecurityTrust => &self.security_trust,
            CategoryId::UserExperience => &self.user_experience,
        }
    }
}

fn weighted_average(criteria: &[Criterion]) -> u32 {
    let total_weight: u32 = criteria.iter().map(|c| c.weight).sum();
    if total_weight == 0 {
        return 0;
    }
    let weighted: u32 = criteria.iter().map(|c| c.score * c.weight).sum();
    (f64::from(weighted) / f64::from(total_weight)).round() as u32
}

/// Overall 0-100 score: category scores averaged with [`CategoryId::weight`].
pub fn overall_score(categories: &CategoryScores) -> u32 {
    let (weighted, total) = categories
        .iter()
        .fold((0u32, 0u32), |(weighted, total), category| {
            let w = category.id.weight();
            (weighted + category.score * w, total + w)
        });
    if total == 0 {
        return 0;
    }
    (f64::from(weighted) / f64::from(total)).round() as u32
}

/// Step scores for a check-derived criterion.
#[derive(Debug, Clone, Copy)]
struct Steps {
    warning: u32,
    otherwise: u32,
}

impl Steps {
    const fn new(warning: u32, otherwise: u32) -> Self {
        Self { warning, otherwise }
    }

    fn score(&self, status: CheckStatus) -> u32 {
        match status {
            CheckStatus::Pass => 100,
            CheckStatus::Warning => self.warning,
            CheckStatus::Fail | CheckStatus::Info => self.otherwise,
        }
    }
}

/// Criterion whose description/details come from the check's details/message.
fn from_check(
    id: &'static str, name: &'static str, weight: u32, check: &CheckResult, steps: Steps, info_as: CriterionStatus,
) -> Criterion {
    Criterion {
        id,
        name,
        description: check.details_or_empty().to_string(),
        weight,
        score: steps.score(check.status),
        status: CriterionStatus::from_check(check.status, info_as),
        details: check.message.clone(),
    }
}

fn tick(flag: bool) -> &'static str {
    if flag { "✓" } else { "✗" }
}

/// Build every category from the signals and checks.
pub fn aggregate(signals: &ExtractedSignals, checks: &AuditChecks) -> CategoryScores {
    CategoryScores {
        technical_seo: Category::new(CategoryId::TechnicalSeo, technical_seo(checks)),
        content_quality: Category::new(CategoryId::ContentQuality, content_quality(signals, checks)),
        ai_readiness: Category::new(CategoryId::AiReadiness, ai_readiness(signals, checks)),
        security_trust: Category::new(CategoryId::SecurityTrust, security_trust(signals, checks)),
        user_experience: Category::new(CategoryId::UserExperience, user_experience(signals)),
    }
}

fn technical_seo(checks: &AuditChecks) -> Vec<Criterion> {
    use CriterionStatus::{Fail, Warning};

    vec![
        from_check("ssl", "SSL Certificate", 15, &checks.ssl, Steps::new(0, 0), Fail),
        from_check("robots_txt", "robots.txt", 10, &checks.robots_txt, Steps::new(0, 0), Fail),
        from_check("sitemap", "XML Sitemap", 10, &checks.sitemap, Steps::new(0, 0), Fail),
        from_check("canonical", "Canonical Tag", 12, &checks.canonical, Steps::new(30, 0), Fail),
        from_check("meta_title", "Meta Title Optimization", 12, &checks.meta_title, Steps::new(40, 0), Fail),
        from_check(
            "meta_description",
            "Meta Description Optimization",
            12,
            &checks.meta_description,
            Steps::new(40, 0),
            Fail,
        ),
        // Missing hreflang is an `info` check and earns partial credit.
        from_check("hreflang", "Hreflang Tags", 8, &checks.hreflang, Steps::new(0, 30), Warning),
        from_check("cdn", "Content Delivery Network", 8, &checks.cdn_detected, Steps::new(20, 20), Fail),
        from_check(
            "multiple_slashes",
            "URL Structure (Multiple Slashes)",
            5,
            &checks.multiple_slashes,
            Steps::new(50, 50),
            Fail,
        ),
    ]
}

fn content_quality(signals: &ExtractedSignals, checks: &AuditChecks) -> Vec<Criterion> {
    use CriterionStatus::Fail;

    let words = signals.content.word_count;
    let s = &signals.structure;

    let depth_score = match words {
        w if w >= 2000 => 100,
        w if w >= 1500 => 80,
        w if w >= 1000 => 60,
        w if w >= 500 => 40,
        w if w >= 300 => 20,
        _ => 5,
    };
    let depth_status = match words {
        w if w >= 1000 => CriterionStatus::Pass,
        w if w >= 500 => CriterionStatus::Warning,
        _ => CriterionStatus::Fail,
    };

    let (image_score, image_status) = if s.image_count == 0 {
        (50, CriterionStatus::Warning)
    } else {
        let ratio = s.images_with_alt as f64 / s.image_count as f64;
        let status = if ratio >= 0.8 { CriterionStatus::Pass } else { CriterionStatus::Warning };
        ((ratio * 100.0).round() as u32, status)
    };

    let eeata_score = match checks.eeata.value {
        Some(CheckValue::Number(n)) => n as u32,
        _ => 0,
    };

    vec![
        from_check("structured_data", "Structured Data Markup", 18, &checks.structured_data, Steps::new(0, 0), Fail),
        from_check("semantic_html", "Semantic HTML", 15, &checks.semantic_html, Steps::new(40, 10), Fail),
        Criterion {
            id: "content_depth",
            name: "Content Depth",
            description: format!("{words} words, {} H2 headings, {} paragraphs", s.h2_count, s.paragraph_count),
            weight: 15,
            score: depth_score,
            status: depth_status,
            details: format!(
                "Word count: {words}, Headings: H1({}) H2({}) H3({})",
                s.h1_count, s.h2_count, s.h3_count
            ),
        },
        from_check("internal_linking", "Internal Linking", 12, &checks.internal_linking, Steps::new(50, 20), Fail),
        Criterion {
            id: "eeata",
            name: "E-E-A-T-A Signals",
            description: checks.eeata.details_or_empty().to_string(),
            weight: 20,
            score: eeata_score,
            status: CriterionStatus::from_check(checks.eeata.status, Fail),
            details: checks.eeata.message.clone(),
        },
        Criterion {
            id: "images",
            name: "Image Optimization",
            description: format!("{}/{} images have alt text", s.images_with_alt, s.image_count),
            weight: 10,
            score: image_score,
            status: image_status,
            details: format!("{} of {} images have alt attributes", s.images_with_alt, s.image_count),
        },
    ]
}

fn ai_readiness(signals: &ExtractedSignals, checks: &AuditChecks) -> Vec<Criterion> {
    use CriterionStatus::Fail;

    let faq = signals.schema.has_faq_schema;

    vec![
        from_check("llm_bots", "LLM Bot Access", 20, &checks.llm_bot_blocked, Steps::new(0, 0), Fail),
        // A missing llms.txt is only `info` as a check but scores as a failure here.
        from_check("llms_txt", "llms.txt File", 20, &checks.llms_txt, Steps::new(0, 0), Fail),
        from_check("llms_full_txt", "llms-full.txt File", 15, &checks.llms_full_txt, Steps::new(0, 0), Fail),
        from_check("js_blocks_ai", "JavaScript AI Accessibility", 20, &checks.js_blocks_ai, Steps::new(30, 0), Fail),
        Criterion {
            id: "faq_schema",
            name: "FAQ Schema for AI",
            description: if faq { "FAQ schema helps AI understand Q&A content" } else { "No FAQ schema found" }
                .to_string(),
            weight: 10,
            score: if faq { 100 } else { 0 },
            status: CriterionStatus::from_bool(faq, Fail),
            details: if faq { "FAQ structured data is present" } else { "Add FAQ schema for better AI visibility" }
                .to_string(),
        },
        from_check("ai_content", "AI-Driven Content Structure", 15, &checks.ai_content_ready, Steps::new(25, 0), Fail),
    ]
}

fn security_trust(signals: &ExtractedSignals, checks: &AuditChecks) -> Vec<Criterion> {
    use CriterionStatus::{Fail, Warning};

    let ssl = signals.meta.has_ssl;
    let trust = &signals.trust;

    let trust_score = (if trust.has_social_links { 33 } else { 0 })
        + (if trust.has_author_info { 33 } else { 0 })
        + (if trust.has_date_published { 34 } else { 0 });
    let trust_status = if trust.has_social_links && trust.has_author_info {
        CriterionStatus::Pass
    } else if trust.has_social_links || trust.has_author_info {
        CriterionStatus::Warning
    } else {
        CriterionStatus::Fail
    };

    vec![
        Criterion {
            id: "ssl_security",
            name: "SSL/HTTPS Security",
            description: "Secure connection protects user data".to_string(),
            weight: 25,
            score: if ssl { 100 } else { 0 },
            status: CriterionStatus::from_bool(ssl, Fail),
            details: if ssl { "Site is secured with HTTPS" } else { "Enable HTTPS for security" }.to_string(),
        },
        from_check("wordfence", "Wordfence Security", 15, &checks.wordfence_detected, Steps::new(40, 40), Warning),
        Criterion {
            id: "http_redirect",
            name: "HTTP to HTTPS Redirect",
            description: "All HTTP traffic should redirect to HTTPS".to_string(),
            weight: 20,
            score: if ssl { 80 } else { 0 },
            status: CriterionStatus::from_bool(ssl, Fail),
            details: if ssl { "HTTPS is enabled" } else { "Enable HTTPS and redirect HTTP traffic" }.to_string(),
        },
        Criterion {
            id: "trust_signals",
            name: "Trust Signals",
            description: "Social links, author info, and dates build trust".to_string(),
            weight: 20,
            score: trust_score,
            status: trust_status,
            details: format!(
                "Social: {}, Author: {}, Date: {}",
                tick(trust.has_social_links),
                tick(trust.has_author_info),
                tick(trust.has_date_published)
            ),
        },
        from_check("ga4", "Google Analytics 4", 10, &checks.ga4_detected, Steps::new(40, 40), Fail),
        from_check("rank_math", "Rank Math SEO Plugin", 10, &checks.rank_math_detected, Steps::new(40, 40), Warning),
    ]
}

fn user_experience(signals: &ExtractedSignals) -> Vec<Criterion> {
    let s = &signals.structure;
    let viewport = signals.meta.has_viewport;
    let nav = s.landmarks.has_navigation;
    let breadcrumbs = signals.trust.has_breadcrumbs;
    let readability = signals.content.readability_score;
    let load_time = signals.load_time;

    let readability_status = if readability >= 70.0 {
        CriterionStatus::Pass
    } else if readability >= 50.0 {
        CriterionStatus::Warning
    } else {
        CriterionStatus::Fail
    };

    let h2_points = match s.h2_count {
        0 => 0,
        1 => 15,
        _ => 30,
    };
    let structure_score = (if s.h1_count == 1 { 40 } else { 0 }) + h2_points + (if s.list_count >= 1 { 30 } else { 0 });
    let structure_status = if s.h1_count == 1 && s.h2_count >= 2 {
        CriterionStatus::Pass
    } else if s.h1_count >= 1 {
        CriterionStatus::Warning
    } else {
        CriterionStatus::Fail
    };

    let media_score = (s.image_count * 10 + s.video_count * 20).min(100) as u32;
    let media_status = if s.image_count >= 3 || s.video_count >= 1 {
        CriterionStatus::Pass
    } else if s.image_count >= 1 {
        CriterionStatus::Warning
    } else {
        CriterionStatus::Fail
    };

    let (load_score, load_status) = match load_time {
        t if t < 2000 => (100, CriterionStatus::Pass),
        t if t < 4000 => (70, CriterionStatus::Warning),
        t if t < 6000 => (40, CriterionStatus::Fail),
        _ => (20, CriterionStatus::Fail),
    };

    vec![
        Criterion {
            id: "mobile_viewport",
            name: "Mobile Viewport",
            description: "Viewport meta tag for responsive design".to_string(),
            weight: 20,
            score: if viewport { 100 } else { 0 },
            status: CriterionStatus::from_bool(viewport, CriterionStatus::Fail),
            details: if viewport { "Mobile viewport is configured" } else { "Add viewport meta tag for mobile" }
                .to_string(),
        },
        Criterion {
            id: "navigation",
            name: "Site Navigation",
            description: "Clear navigation structure".to_string(),
            weight: 15,
            score: (if nav { 50 } else { 0 }) + (if breadcrumbs { 50 } else { 0 }),
            status: CriterionStatus::from_bool(nav, CriterionStatus::Warning),
            details: format!("Navigation: {}, Breadcrumbs: {}", tick(nav), tick(breadcrumbs)),
        },
        Criterion {
            id: "readability",
            name: "Content Readability",
            description: "Easy to read content structure".to_string(),
            weight: 20,
            score: readability.round() as u32,
            status: readability_status,
            details: format!("Readability score: {}/100", readability.round() as u32),
        },
        Criterion {
            id: "page_structure",
            name: "Page Structure",
            description: "Proper heading hierarchy and content organization".to_string(),
            weight: 15,
            score: structure_score,
            status: structure_status,
            details: format!("H1: {}, H2: {}, H3: {}, Lists: {}", s.h1_count, s.h2_count, s.h3_count, s.list_count),
        },
        Criterion {
            id: "media_elements",
            name: "Media & Engagement",
            description: "Images, videos, and interactive elements".to_string(),
            weight: 15,
            score: media_score,
            status: media_status,
            details: format!("Images: {}, Videos: {}", s.image_count, s.video_count),
        },
        Criterion {
            id: "load_performance",
            name: "Load Performance",
            description: "Page response time and content ratio".to_string(),
            weight: 15,
            score: load_score,
            status: load_status,
            details: format!(
                "Response time: {load_time}ms, Content ratio: {}%",
                signals.content.content_to_html_ratio.round() as i64
            ),
        },
    ]
}
