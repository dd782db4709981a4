//! CDN provider detection.

use crate::signals::{CdnDetection, ResponseHeaders};

/// Providers in priority order, each with the markers that identify it.
pub const CDN_SIGNATURES: &[(&str, &[&str])] = &[
    ("cloudflare", &["cf-ray", "cf-cache-status", "__cfduid", "cloudflare"]),
    ("fastly", &["fastly", "x-served-by", "x-cache"]),
    ("akamai", &["akamai", "x-akamai"]),
    ("cloudfront", &["cloudfront", "x-amz-cf"]),
    ("sucuri", &["sucuri", "x-sucuri"]),
    ("stackpath", &["stackpath"]),
    ("bunny", &["bunnycdn"]),
    ("keycdn", &["keycdn"]),
];

/// First provider whose signature appears in a header name, a header value
/// or the markup. Headers are checked before markup for each signature.
pub fn detect_cdn(headers: &ResponseHeaders, html: &str) -> CdnDetection {
    let html_lower = html.to_lowercase();

    for (provider, signatures) in CDN_SIGNATURES {
        for signature in *signatures {
            let in_headers = headers
                .iter()
                .any(|(name, value)| name.to_lowercase().contains(signature) || value.to_lowercase().contains(signature));

            if in_headers || html_lower.contains(signature) {
                return CdnDetection { has_cdn: true, cdn_provider: (*provider).to_string() };
            }
        }
    }

    CdnDetection::default()
}
