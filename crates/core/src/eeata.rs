//! E-E-A-T-A score: Experience, Expertise, Authoritativeness,
//! Trustworthiness and AI-driven content, 20 points each.

use crate::signals::ExtractedSignals;

fn points(condition: bool, value: u32) -> u32 {
    if condition { value } else { 0 }
}

/// Additive 0-100 score. The buckets sum to at most 100 so no clamping is applied.
pub fn eeata_score(signals: &ExtractedSignals) -> u32 {
    let trust = &signals.trust;
    let schema = &signals.schema;
    let words = signals.content.word_count;

    let experience =
        points(trust.has_author_info, 10) + points(trust.has_date_published, 5) + points(trust.has_date_modified, 5);

    let expertise = (if words >= 1000 {
        10
    } else if words >= 500 {
        5
    } else {
        0
    }) + points(signals.structure.h2_count >= 3, 5)
        + points(signals.structure.external_links >= 3, 5);

    let authoritativeness = points(schema.has_schema, 10)
        + points(schema.has_organization_schema || schema.has_local_business_schema, 5)
        + points(schema.has_breadcrumb_schema, 5);

    let trustworthiness = points(signals.meta.has_ssl, 10)
        + points(signals.meta.has_canonical, 5)
        + points(trust.has_social_links, 5);

    let ai_content = points(schema.has_faq_schema, 5)
        + points(schema.has_how_to_schema, 5)
        + points(signals.content.question_count >= 5, 5)
        + points(signals.structure.list_count >= 2, 5);

    experience + expertise + authoritativeness + trustworthiness + ai_content
}
