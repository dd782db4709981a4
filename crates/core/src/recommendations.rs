//! Recommendation generator.
//!
//! Every warning or failing criterion yields one recommendation. The list is
//! stable-partitioned so `high` priority items come first, then truncated.

use serde::Serialize;

use crate::checks::AuditChecks;
use crate::scoring::{CategoryScores, Criterion, CriterionStatus};

/// Upper bound on the number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    /// Never produced by the generator; kept for consumers that rank manually.
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Expected impact, derived from the criterion weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn from_weight(weight: u32) -> Self {
        match weight {
            w if w >= 15 => Self::High,
            w if w >= 10 => Self::Medium,
            _ => Self::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub text: String,
    pub priority: Priority,
    /// Display name of the owning category.
    pub category: String,
    pub impact: Impact,
}

/// Fixed advice for known criterion ids.
fn template(id: &str) -> Option<&'static str> {
    let text = match id {
        "ssl" => "Enable SSL certificate and switch to HTTPS for security and SEO benefits",
        "robots_txt" => "Create a robots.txt file to control search engine crawler access",
        "sitemap" => "Create an XML sitemap and submit to Google Search Console",
        "canonical" => "Add canonical tags to prevent duplicate content issues",
        "meta_title" => "Optimize meta title to 30-60 characters with primary keyword",
        "meta_description" => "Write compelling meta description (120-160 chars) with call-to-action",
        "hreflang" => "Add hreflang tags if targeting multiple countries (e.g., en-sg for Singapore)",
        "cdn" => "Implement a CDN (like Cloudflare) for faster global page loads",
        "structured_data" => "Add JSON-LD structured data markup (FAQ, Article, Organization schemas)",
        "semantic_html" => "Use semantic HTML5 elements (header, main, article, section, footer)",
        "content_depth" => "Expand content to at least 800-1500 words with proper heading structure",
        "internal_linking" => "Add more internal links to improve site structure and user navigation",
        "eeata" => "Improve E-E-A-T-A: Add author info, publish dates, and expert credentials",
        "llm_bots" => "Review robots.txt to allow AI crawlers (GPTBot, anthropic-ai, etc.)",
        "llms_txt" => "Create llms.txt file with AI-specific content guidelines",
        "llms_full_txt" => "Create llms-full.txt with comprehensive content for AI context",
        "js_blocks_ai" => "Ensure content is server-rendered and accessible without JavaScript",
        "faq_schema" => "Add FAQ schema markup for better visibility in AI search results",
        "wordfence" => "Install Wordfence security plugin for WordPress protection",
        "ga4" => "Install Google Analytics 4 for traffic tracking and insights",
        "rank_math" => "Install Rank Math SEO plugin for better on-page optimization",
        "mobile_viewport" => "Add viewport meta tag for proper mobile rendering",
        "readability" => "Improve content readability with shorter sentences and clear formatting",
        _ => return None,
    };
    Some(text)
}

fn recommendation_for(criterion: &Criterion, category: &str) -> Recommendation {
    let text = template(criterion.id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Improve {}: {}", criterion.name, criterion.details));

    Recommendation {
        text,
        priority: if criterion.status == CriterionStatus::Fail { Priority::High } else { Priority::Medium },
        category: category.to_string(),
        impact: Impact::from_weight(criterion.weight),
    }
}

/// Build at most `limit` recommendations (never more than [`MAX_RECOMMENDATIONS`]).
///
/// Discovery order follows the categories and their criteria; sorting only
/// moves `high` priority items ahead and keeps relative order otherwise.
/// `_checks` is not consulted; criteria already carry their outcome.
pub fn recommend_with_limit(categories: &CategoryScores, _checks: &AuditChecks, limit: usize) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = categories
        .iter()
        .flat_map(|category| {
            category
                .criteria
                .iter()
                .filter(|c| matches!(c.status, CriterionStatus::Fail | CriterionStatus::Warning))
                .map(move |c| recommendation_for(c, category.name))
        })
        .collect();

    recommendations.sort_by_key(|r| r.priority != Priority::High);
    recommendations.truncate(limit.min(MAX_RECOMMENDATIONS));
    recommendations
}

/// Build the default-length recommendation list.
pub fn recommend(categories: &CategoryScores, checks: &AuditChecks) -> Vec<Recommendation> {
    recommend_with_limit(categories, checks, MAX_RECOMMENDATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::evaluate;
    use crate::probes::ProbeResults;
    use crate::scoring::aggregate;
    use crate::signals::ExtractedSignals;
    use rstest::rstest;

    fn pipeline(signals: &ExtractedSignals) -> (CategoryScores, AuditChecks) {
        let checks = evaluate(signals, &ProbeResults::default());
        (aggregate(signals, &checks), checks)
    }

    #[rstest]
    #[case(20, Impact::High)]
    #[case(15, Impact::High)]
    #[case(12, Impact::Medium)]
    #[case(10, Impact::Medium)]
    #[case(8, Impact::Low)]
    fn test_impact_from_weight(#[case] weight: u32, #[case] expected: Impact) {
        assert_eq!(Impact::from_weight(weight), expected);
    }

    #[test]
    fn test_empty_page_caps_at_ten_high_first() {
        let (categories, checks) = pipeline(&ExtractedSignals::default());
        let recs = recommend(&categories, &checks);
        assert_eq!(recs.len(), 10);
        assert!(recs.iter().all(|r| r.priority == Priority::High));
        assert_eq!(recs[0].text, "Enable SSL certificate and switch to HTTPS for security and SEO benefits");
        assert_eq!(recs[0].category, "Technical SEO");
    }

    #[test]
    fn test_high_priority_partition_is_stable() {
        let mut signals = ExtractedSignals::default();
        signals.meta.has_ssl = true;
        signals.meta.title = "t".repeat(10);
        signals.meta.title_length = 10;
        let (categories, checks) = pipeline(&signals);

        let all = recommend(&categories, &checks);
        assert!(all.windows(2).all(|pair| pair[0].priority <= pair[1].priority));

        let highs: Vec<&str> = all.iter().filter(|r| r.priority == Priority::High).map(|r| r.text.as_str()).collect();
        assert_eq!(highs[0], "Create a robots.txt file to control search engine crawler access");
        assert_eq!(highs[1], "Create an XML sitemap and submit to Google Search Console");
    }

    #[test]
    fn test_limit_is_clamped() {
        let (categories, checks) = pipeline(&ExtractedSignals::default());
        assert_eq!(recommend_with_limit(&categories, &checks, 50).len(), MAX_RECOMMENDATIONS);
        assert_eq!(recommend_with_limit(&categories, &checks, 3).len(), 3);
    }

    #[test]
    fn test_fallback_text_for_unmapped_criterion() {
        let criterion = Criterion {
            id: "trust_signals",
            name: "Trust Signals",
            description: String::new(),
            weight: 20,
            score: 0,
            status: CriterionStatus::Fail,
            details: "Social: ✗, Author: ✗, Date: ✗".to_string(),
        };
        let rec = recommendation_for(&criterion, "Security & Trust");
        assert_eq!(rec.text, "Improve Trust Signals: Social: ✗, Author: ✗, Date: ✗");
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.impact, Impact::High);
    }

    #[test]
    fn test_serialization() {
        let rec = Recommendation {
            text: "x".to_string(),
            priority: Priority::Medium,
            category: "AI Readiness".to_string(),
            impact: Impact::Low,
        };
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["impact"], "Low");
    }
}
