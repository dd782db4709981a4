//! Feature extraction: raw markup in, [`ExtractedSignals`] out.
//!
//! Extraction is deliberately pattern based and tolerant. It never fails:
//! malformed or empty markup simply yields zero counts and `false` flags.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::cdn::detect_cdn;
use crate::frameworks::analyze_rendering;
use crate::signals::{
    ExtractedSignals, Landmarks, PageMeta, PageStructure, ResponseHeaders, SchemaSignals, ThirdPartyTools,
    TrustSignals,
};
use crate::text::{content_metrics, remove_tags, strip_markup};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

static RE_TITLE: Lazy<Regex> = Lazy::new(|| re(r"(?is)<title[^>]*>(.*?)</title>"));
static RE_DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["']"#));
static RE_DESCRIPTION_REVERSED: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*name=["']description["']"#));
static RE_HEADINGS: Lazy<[Regex; 6]> = Lazy::new(|| {
    [
        re(r"(?i)<h1[^>]*>"),
        re(r"(?i)<h2[^>]*>"),
        re(r"(?i)<h3[^>]*>"),
        re(r"(?i)<h4[^>]*>"),
        re(r"(?i)<h5[^>]*>"),
        re(r"(?i)<h6[^>]*>"),
    ]
});
static RE_PARAGRAPH: Lazy<Regex> = Lazy::new(|| re(r"(?i)<p[^>]*>"));
static RE_IMG: Lazy<Regex> = Lazy::new(|| re(r"(?i)<img[^>]*>"));
static RE_ALT: Lazy<Regex> = Lazy::new(|| re(r#"(?i)alt=["'][^"']+["']"#));
static RE_ANCHOR: Lazy<Regex> = Lazy::new(|| re(r#"(?i)<a[^>]*href=["']([^"']+)["'][^>]*>"#));
static RE_HREF: Lazy<Regex> = Lazy::new(|| re(r#"(?i)href=["']([^"']+)["']"#));

static RE_LD_JSON: Lazy<Regex> =
    Lazy::new(|| re(r#"(?is)<script[^>]*type=["']application/ld\+json["'][^>]*>(.*?)</script>"#));
static RE_SCHEMA_TYPE: Lazy<Regex> = Lazy::new(|| re(r#""@type"\s*:\s*"([^"]+)""#));

static RE_OPEN_GRAPH: Lazy<Regex> = Lazy::new(|| re(r#"(?i)<meta[^>]*property=["']og:"#));
static RE_TWITTER: Lazy<Regex> = Lazy::new(|| re(r#"(?i)<meta[^>]*name=["']twitter:"#));
static RE_CANONICAL: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)<link[^>]*rel=["']canonical["'][^>]*href=["']([^"']+)["']"#));
static RE_ROBOTS_META: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)<meta[^>]*name=["']robots["'][^>]*content=["']([^"']+)["']"#));
static RE_VIEWPORT: Lazy<Regex> = Lazy::new(|| re(r#"(?i)<meta[^>]*name=["']viewport["']"#));
static RE_CHARSET: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)<meta[^>]*charset=|<meta[^>]*http-equiv=["']Content-Type["']"#));
static RE_FAVICON: Lazy<Regex> =
    Lazy::new(|| re(r#"(?i)<link[^>]*rel=["'](icon|shortcut icon|apple-touch-icon)["']"#));
static RE_HREFLANG_LINK: Lazy<Regex> = Lazy::new(|| re(r#"(?i)<link[^>]*hreflang=["']([^"']+)["'][^>]*>"#));
static RE_HREFLANG: Lazy<Regex> = Lazy::new(|| re(r#"(?i)hreflang=["']([^"']+)["']"#));

static RE_LIST: Lazy<Regex> = Lazy::new(|| re(r"(?i)<[uo]l[^>]*>"));
static RE_LIST_ITEM: Lazy<Regex> = Lazy::new(|| re(r"(?i)<li[^>]*>"));
static RE_ORDERED_LIST: Lazy<Regex> = Lazy::new(|| re(r"(?i)<ol[^>]*>"));
static RE_TABLE: Lazy<Regex> = Lazy::new(|| re(r"(?i)<table[^>]*>"));
static RE_FORM: Lazy<Regex> = Lazy::new(|| re(r"(?i)<form[^>]*>"));
static RE_VIDEO: Lazy<Regex> = Lazy::new(|| re(r"(?i)<video[^>]*>"));
static RE_YOUTUBE_EMBED: Lazy<Regex> = Lazy::new(|| re(r"(?i)youtube\.com/embed"));
static RE_VIMEO: Lazy<Regex> = Lazy::new(|| re(r"(?i)vimeo\.com"));
static RE_IFRAME: Lazy<Regex> = Lazy::new(|| re(r"(?i)<iframe[^>]*>"));
static RE_PRE: Lazy<Regex> = Lazy::new(|| re(r"(?i)<pre[^>]*>"));
static RE_CODE: Lazy<Regex> = Lazy::new(|| re(r"(?i)<code[^>]*>"));
static RE_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| re(r"(?i)<blockquote[^>]*>"));

static RE_HEADER: Lazy<Regex> = Lazy::new(|| re(r"(?i)<header[^>]*>"));
static RE_FOOTER: Lazy<Regex> = Lazy::new(|| re(r"(?i)<footer[^>]*>"));
static RE_MAIN: Lazy<Regex> = Lazy::new(|| re(r"(?i)<main[^>]*>"));
static RE_ARTICLE: Lazy<Regex> = Lazy::new(|| re(r"(?i)<article[^>]*>"));
static RE_SECTION: Lazy<Regex> = Lazy::new(|| re(r"(?i)<section[^>]*>"));
static RE_ASIDE: Lazy<Regex> = Lazy::new(|| re(r"(?i)<aside[^>]*>"));
static RE_NAV: Lazy<Regex> = Lazy::new(|| re(r"(?i)<nav[^>]*>"));

static RE_AUTHOR_WORD: Lazy<Regex> = Lazy::new(|| re(r"(?i)author"));
static RE_AUTHOR_MARKUP: Lazy<Regex> = Lazy::new(|| {
    re(r#"(?i)<[^>]*class=["'][^"']*author[^"']*["']|<meta[^>]*name=["']author["']|"author""#)
});
static RE_DATE_PUBLISHED: Lazy<Regex> = Lazy::new(|| re(r"(?i)datePublished|<time[^>]*datetime="));
static RE_DATE_MODIFIED: Lazy<Regex> = Lazy::new(|| re(r"(?i)dateModified"));
static RE_BREADCRUMB: Lazy<Regex> = Lazy::new(|| re(r"(?i)breadcrumb"));
static RE_SOCIAL: Lazy<Regex> = Lazy::new(|| {
    re(r"(?i)facebook\.com|twitter\.com|linkedin\.com|instagram\.com|youtube\.com|tiktok\.com")
});

static RE_GA4: Lazy<Regex> = Lazy::new(|| {
    re(r#"(?i)gtag\s*\(\s*['"]config['"]\s*,\s*['"]G-|googletagmanager\.com/gtag|GA4"#)
});
static RE_RANK_MATH: Lazy<Regex> = Lazy::new(|| re(r"(?i)rank-math|rankmath"));
static RE_WORDFENCE: Lazy<Regex> = Lazy::new(|| re(r"(?i)wordfence"));
static RE_YOAST: Lazy<Regex> = Lazy::new(|| re(r"(?i)yoast"));

static RE_HREF_DOUBLE_SLASH: Lazy<Regex> = Lazy::new(|| re(r#"(?i)href=["'][^"']*//[^"']*["']"#));

fn count(re: &Regex, haystack: &str) -> usize {
    re.find_iter(haystack).count()
}

fn first_capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Extract every signal from one fetched page.
///
/// `final_url` is the URL after redirects; it decides `hasSSL` and which
/// links count as external. `headers` feed CDN detection only. The returned
/// record has `load_time == 0`; the caller fills it in.
pub fn extract_signals(html: &str, final_url: &str, headers: &ResponseHeaders) -> ExtractedSignals {
    let text = strip_markup(html);
    let domain = Url::parse(final_url).ok().and_then(|u| u.host_str().map(str::to_string)).unwrap_or_default();

    let structure = extract_structure(html, &domain);
    let content = content_metrics(&text, html, structure.paragraph_count);
    let js = analyze_rendering(html, content.word_count, content.content_to_html_ratio);

    ExtractedSignals {
        meta: extract_meta(html, final_url),
        structure,
        schema: extract_schema(html),
        trust: extract_trust(html),
        content,
        tools: extract_tools(html),
        cdn: detect_cdn(headers, html),
        js,
        urls_with_multiple_slashes: count_multiple_slash_urls(html),
        load_time: 0,
    }
}

fn extract_meta(html: &str, final_url: &str) -> PageMeta {
    let title = first_capture(&RE_TITLE, html).map(|t| t.trim().to_string()).unwrap_or_default();
    let meta_description = first_capture(&RE_DESCRIPTION, html)
        .or_else(|| first_capture(&RE_DESCRIPTION_REVERSED, html))
        .map(|d| d.trim().to_string())
        .unwrap_or_default();
    let canonical = first_capture(&RE_CANONICAL, html);
    let robots = first_capture(&RE_ROBOTS_META, html);
    let hreflang_tags: Vec<String> = RE_HREFLANG_LINK
        .find_iter(html)
        .filter_map(|tag| first_capture(&RE_HREFLANG, tag.as_str()))
        .filter(|lang| !lang.is_empty())
        .collect();

    PageMeta {
        title_length: title.chars().count(),
        title,
        meta_description_length: meta_description.chars().count(),
        meta_description,
        has_open_graph: RE_OPEN_GRAPH.is_match(html),
        has_twitter_card: RE_TWITTER.is_match(html),
        has_canonical: canonical.is_some(),
        canonical_url: canonical.unwrap_or_default(),
        has_robots_meta: robots.is_some(),
        robots_content: robots.unwrap_or_default(),
        has_viewport: RE_VIEWPORT.is_match(html),
        has_charset: RE_CHARSET.is_match(html),
        has_favicon: RE_FAVICON.is_match(html),
        has_ssl: final_url.starts_with("https://"),
        has_hreflang: RE_HREFLANG_LINK.is_match(html),
        hreflang_tags,
    }
}

fn extract_structure(html: &str, domain: &str) -> PageStructure {
    let [h1, h2, h3, h4, h5, h6] = &*RE_HEADINGS;

    let images: Vec<&str> = RE_IMG.find_iter(html).map(|m| m.as_str()).collect();
    let images_with_alt = images.iter().filter(|img| RE_ALT.is_match(img)).count();

    let anchors: Vec<&str> = RE_ANCHOR.find_iter(html).map(|m| m.as_str()).collect();
    let (external_links, internal_links) = classify_links(&anchors, domain);

    PageStructure {
        h1_count: count(h1, html),
        h2_count: count(h2, html),
        h3_count: count(h3, html),
        h4_count: count(h4, html),
        h5_count: count(h5, html),
        h6_count: count(h6, html),
        paragraph_count: count(&RE_PARAGRAPH, html),
        image_count: images.len(),
        images_with_alt,
        link_count: anchors.len(),
        external_links,
        internal_links,
        list_count: count(&RE_LIST, html),
        bullet_points: count(&RE_LIST_ITEM, html),
        numbered_lists: count(&RE_ORDERED_LIST, html),
        table_count: count(&RE_TABLE, html),
        form_count: count(&RE_FORM, html),
        video_count: count(&RE_VIDEO, html) + count(&RE_YOUTUBE_EMBED, html) + count(&RE_VIMEO, html),
        iframe_count: count(&RE_IFRAME, html),
        code_block_count: count(&RE_PRE, html) + count(&RE_CODE, html),
        blockquote_count: count(&RE_BLOCKQUOTE, html),
        landmarks: Landmarks {
            has_header: RE_HEADER.is_match(html),
            has_footer: RE_FOOTER.is_match(html),
            has_main: RE_MAIN.is_match(html),
            has_article: RE_ARTICLE.is_match(html),
            has_section: RE_SECTION.is_match(html),
            has_aside: RE_ASIDE.is_match(html),
            has_navigation: RE_NAV.is_match(html),
        },
    }
}

/// Split anchors into `(external, internal)` counts.
///
/// External: absolute `http*` href not containing the page host. Internal:
/// anything else except `mailto:`, `tel:`, `javascript:` and fragments.
fn classify_links(anchors: &[&str], domain: &str) -> (usize, usize) {
    let mut external = 0;
    let mut internal = 0;

    for href in anchors.iter().filter_map(|tag| first_capture(&RE_HREF, tag)) {
        if href.starts_with("http") && !href.contains(domain) {
            external += 1;
        } else if !["mailto:", "tel:", "javascript:", "#"].iter().any(|p| href.starts_with(p)) {
            internal += 1;
        }
    }

    (external, internal)
}

fn extract_schema(html: &str) -> SchemaSignals {
    let mut schema = SchemaSignals::default();

    for block in RE_LD_JSON.captures_iter(html) {
        schema.has_schema = true;
        let Some(body) = block.get(1) else { continue };
        let body = remove_tags(body.as_str());

        for caps in RE_SCHEMA_TYPE.captures_iter(&body) {
            let Some(ty) = caps.get(1).map(|m| m.as_str()) else { continue };
            if schema.schema_types.iter().any(|seen| seen == ty) {
                continue;
            }
            schema.schema_types.push(ty.to_string());

            match ty {
                "FAQPage" | "Question" => schema.has_faq_schema = true,
                "HowTo" => schema.has_how_to_schema = true,
                "Article" | "NewsArticle" | "BlogPosting" => schema.has_article_schema = true,
                "Organization" => schema.has_organization_schema = true,
                "BreadcrumbList" => schema.has_breadcrumb_schema = true,
                _ => {}
            }
            if ty.contains("Business") {
                schema.has_local_business_schema = true;
            }
        }
    }

    schema
}

fn extract_trust(html: &str) -> TrustSignals {
    TrustSignals {
        has_author_info: RE_AUTHOR_WORD.is_match(html) && RE_AUTHOR_MARKUP.is_match(html),
        has_date_published: RE_DATE_PUBLISHED.is_match(html),
        has_date_modified: RE_DATE_MODIFIED.is_match(html),
        has_breadcrumbs: RE_BREADCRUMB.is_match(html),
        has_social_links: RE_SOCIAL.is_match(html),
    }
}

fn extract_tools(html: &str) -> ThirdPartyTools {
    ThirdPartyTools {
        has_ga4: RE_GA4.is_match(html),
        has_rank_math: RE_RANK_MATH.is_match(html),
        has_wordfence: RE_WORDFENCE.is_match(html),
        has_yoast: RE_YOAST.is_match(html),
    }
}

/// `href` values containing `//` that are not absolute http(s) URLs.
fn count_multiple_slash_urls(html: &str) -> usize {
    RE_HREF_DOUBLE_SLASH
        .find_iter(html)
        .filter(|m| !m.as_str().contains("http://") && !m.as_str().contains("https://"))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn extract(html: &str) -> ExtractedSignals {
        extract_signals(html, "https://example.com/page", &ResponseHeaders::new())
    }

    #[test]
    fn test_title_and_description() {
        let html = r#"<html><head><title>  My Page Title  </title>
            <meta name="description" content="A short description"></head></html>"#;
        let signals = extract(html);
        assert_eq!(signals.meta.title, "My Page Title");
        assert_eq!(signals.meta.title_length, 13);
        assert_eq!(signals.meta.meta_description, "A short description");
        assert_eq!(signals.meta.meta_description_length, 19);
    }

    #[test]
    fn test_description_attribute_order_reversed() {
        let html = r#"<meta content="Reversed order works" name="description">"#;
        assert_eq!(extract(html).meta.meta_description, "Reversed order works");
    }

    #[test]
    fn test_empty_markup_yields_defaults() {
        let signals = extract("");
        assert_eq!(signals.meta.title, "");
        assert_eq!(signals.content.word_count, 0);
        assert_eq!(signals.structure.h1_count, 0);
        assert!(!signals.schema.has_schema);
        assert!(signals.js.js_frameworks.is_empty());
        assert!(signals.meta.has_ssl);
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let html = "<h1>A</h1><h2>B</h2><h2 class='x'>C</h2><h3>D</h3><p>one</p><p>two</p>";
        let signals = extract(html);
        assert_eq!(signals.structure.h1_count, 1);
        assert_eq!(signals.structure.h2_count, 2);
        assert_eq!(signals.structure.h3_count, 1);
        assert_eq!(signals.structure.paragraph_count, 2);
    }

    #[test]
    fn test_image_alt_counting() {
        let html = r#"<img src="a.png" alt="A"><img src="b.png" alt=""><img src="c.png">"#;
        let signals = extract(html);
        assert_eq!(signals.structure.image_count, 3);
        assert_eq!(signals.structure.images_with_alt, 1);
    }

    #[test]
    fn test_link_classification() {
        let html = r##"
            <a href="https://example.com/about">About</a>
            <a href="/contact">Contact</a>
            <a href="https://other.org/">Other</a>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="#top">Top</a>
        "##;
        let signals = extract(html);
        assert_eq!(signals.structure.link_count, 5);
        assert_eq!(signals.structure.external_links, 1);
        assert_eq!(signals.structure.internal_links, 2);
    }

    #[test]
    fn test_schema_types_deduplicated() {
        let html = r#"<script type="application/ld+json">
            {"@context":"https://schema.org","@type":"FAQPage","mainEntity":[
              {"@type":"Question","name":"Q1"},{"@type":"Question","name":"Q2"}]}
            </script>
            <script type="application/ld+json">{"@type": "LocalBusiness"}</script>"#;
        let schema = extract(html).schema;
        assert!(schema.has_schema);
        assert_eq!(schema.schema_types, vec!["FAQPage", "Question", "LocalBusiness"]);
        assert!(schema.has_faq_schema);
        assert!(schema.has_local_business_schema);
        assert!(!schema.has_article_schema);
    }

    #[rstest]
    #[case("BlogPosting", true, false)]
    #[case("Organization", false, true)]
    #[case("Person", false, false)]
    fn test_schema_flags(#[case] ty: &str, #[case] article: bool, #[case] organization: bool) {
        let html = format!(r#"<script type="application/ld+json">{{"@type":"{ty}"}}</script>"#);
        let schema = extract(&html).schema;
        assert_eq!(schema.has_article_schema, article);
        assert_eq!(schema.has_organization_schema, organization);
    }

    #[test]
    fn test_meta_flags() {
        let html = r#"<meta charset="utf-8"><meta name="viewport" content="width=device-width">
            <meta property="og:title" content="x"><meta name="twitter:card" content="summary">
            <link rel="canonical" href="https://example.com/page">
            <meta name="robots" content="index, follow">
            <link rel="icon" href="/favicon.ico">
            <link rel="alternate" hreflang="en-sg" href="https://example.com/sg">
            <link rel="alternate" hreflang="en-us" href="https://example.com/us">"#;
        let meta = extract(html).meta;
        assert!(meta.has_charset && meta.has_viewport && meta.has_favicon);
        assert!(meta.has_open_graph && meta.has_twitter_card);
        assert_eq!(meta.canonical_url, "https://example.com/page");
        assert_eq!(meta.robots_content, "index, follow");
        assert_eq!(meta.hreflang_tags, vec!["en-sg", "en-us"]);
    }

    #[test]
    fn test_ssl_follows_final_url() {
        let signals = extract_signals("", "http://example.com/", &ResponseHeaders::new());
        assert!(!signals.meta.has_ssl);
    }

    #[test]
    fn test_lists_media_and_landmarks() {
        let html = r#"<header></header><main><ul><li>a</li><li>b</li></ul><ol><li>c</li></ol>
            <iframe src="https://www.youtube.com/embed/xyz"></iframe><video src="v.mp4"></video>
            <pre><code>x</code></pre><table></table><blockquote>q</blockquote></main><nav></nav>"#;
        let s = extract(html).structure;
        assert_eq!(s.list_count, 2);
        assert_eq!(s.bullet_points, 3);
        assert_eq!(s.numbered_lists, 1);
        assert_eq!(s.video_count, 2);
        assert_eq!(s.iframe_count, 1);
        assert_eq!(s.code_block_count, 2);
        assert_eq!(s.table_count, 1);
        assert_eq!(s.blockquote_count, 1);
        assert!(s.landmarks.has_header && s.landmarks.has_main && s.landmarks.has_navigation);
        assert!(!s.landmarks.has_footer);
    }

    #[test]
    fn test_trust_signals() {
        let html = r#"<span class="author-name">Jane</span><time datetime="2024-01-01">Jan</time>
            <a href="https://www.linkedin.com/in/jane">LinkedIn</a>"#;
        let trust = extract(html).trust;
        assert!(trust.has_author_info);
        assert!(trust.has_date_published);
        assert!(!trust.has_date_modified);
        assert!(trust.has_social_links);
    }

    #[test]
    fn test_third_party_tools() {
        let html = r#"<script>gtag('config', 'G-ABC123');</script><!-- This site is optimized with the Yoast SEO plugin -->"#;
        let tools = extract(html).tools;
        assert!(tools.has_ga4);
        assert!(tools.has_yoast);
        assert!(!tools.has_rank_math);
        assert!(!tools.has_wordfence);
    }

    #[test]
    fn test_multiple_slashes() {
        let html = r#"<a href="/blog//post">x</a><a href="https://example.com/a">y</a><a href="//cdn.example.com/x">z</a>"#;
        assert_eq!(extract(html).urls_with_multiple_slashes, 2);
    }
}
