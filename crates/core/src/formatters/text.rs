//! Plain-text report of an [`AnalysisResult`].

use crate::audit::AnalysisResult;
use crate::scoring::{Category, CriterionStatus};

fn marker(status: CriterionStatus) -> &'static str {
    match status {
        CriterionStatus::Pass => "[PASS]",
        CriterionStatus::Warning => "[WARN]",
        CriterionStatus::Fail => "[FAIL]",
    }
}

fn push_category(output: &mut String, category: &Category) {
    output.push_str(&format!("{} ({}/100)\n", category.name, category.score));
    for criterion in &category.criteria {
        output.push_str(&format!("  {} {}: {}\n", marker(criterion.status), criterion.name, criterion.details));
    }
}

/// Render a human-readable report.
///
/// Layout: header with URL and overall score, each category with its
/// criteria, then numbered recommendations.
pub fn to_text(result: &AnalysisResult) -> String {
    let title = format!("GEO Audit: {}", result.url);
    let mut output = String::new();

    output.push_str(&title);
    output.push('\n');
    output.push_str(&"=".repeat(title.chars().count()));
    output.push('\n');
    output.push_str(&format!("Domain: {} | Analyzed: {}\n", result.domain, result.timestamp));
    output.push_str(&format!("Overall score: {}/100\n", result.overall_score));

    for category in result.categories.iter() {
        output.push('\n');
        push_category(&mut output, category);
    }

    output.push_str("\nRecommendations\n---------------\n");
    if result.recommendations.is_empty() {
        output.push_str("None. Every criterion passes.\n");
    }
    for (index, rec) in result.recommendations.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}] {} ({}, impact: {:?})\n",
            index + 1,
            rec.priority.as_str(),
            rec.text,
            rec.category,
            rec.impact
        ));
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::analyze_document;
    use crate::probes::ProbeResults;
    use crate::signals::ResponseHeaders;

    #[test]
    fn test_report_layout() {
        let result = analyze_document("", "http://example.com/", &ResponseHeaders::new(), 0, &ProbeResults::default());
        let text = to_text(&result);

        assert!(text.starts_with("GEO Audit: http://example.com/\n===="));
        assert!(text.contains(&format!("Overall score: {}/100", result.overall_score)));
        assert!(text.contains("Technical SEO ("));
        assert!(text.contains("User Experience ("));
        assert!(text.contains("[FAIL] robots.txt"));
        assert!(text.contains("1. [high] Enable SSL certificate"));
        assert!(text.contains("10. [high]"));
        assert!(!text.contains("11. ["));
    }

    #[test]
    fn test_category_order() {
        let result = analyze_document("", "http://example.com/", &ResponseHeaders::new(), 0, &ProbeResults::default());
        let text = to_text(&result);

        let technical = text.find("Technical SEO (").unwrap();
        let content = text.find("Content Quality (").unwrap();
        let ai = text.find("AI Readiness (").unwrap();
        assert!(technical < content && content < ai);
    }
}
