//! JavaScript framework detection and AI-crawler blocking estimate.
//!
//! Detection is marker based: each framework is recognised by substrings or
//! globals its build output leaves in the served markup. The blocking score
//! estimates how much of the page a crawler that never executes JavaScript
//! would miss.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::signals::{FrameworkDetail, JsRendering, RenderingType};
use crate::text::remove_tags;

static RE_REACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)react|data-reactroot|data-reactid").unwrap());
static RE_NEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)__NEXT_DATA__|_next/static").unwrap());
static RE_VUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)vue|__VUE__|data-v-").unwrap());
static RE_NUXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)__NUXT__|nuxt").unwrap());
static RE_ANGULAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)angular|ng-version|ng-app").unwrap());
static RE_ANGULAR_UNIVERSAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ng-state|serverApp").unwrap());
static RE_GATSBY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)gatsby|___gatsby").unwrap());
static RE_SVELTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)svelte|__SVELTEKIT").unwrap());
static RE_SVELTEKIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)__SVELTEKIT").unwrap());
static RE_ASTRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)astro").unwrap());
static RE_REMIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)remix").unwrap());

static RE_NOSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<noscript[^>]*>(.*?)</noscript>").unwrap());
static RE_SCRIPT_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script[^>]*>(.*?)</script>").unwrap());
static RE_EXTERNAL_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<script[^>]*src=["'][^"']+["'][^>]*>"#).unwrap());
static RE_DYNAMIC_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)data-loading|skeleton|placeholder|lazy").unwrap());
static RE_TEMPLATE_SYNTAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{.*\}\}|\{%.*%\}").unwrap());
static RE_TEMPLATE_DIRECTIVES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)v-if|v-for|ng-repeat|\*ngFor").unwrap());
static RE_LAZY_LOADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)loading=["']lazy["']|data-src|lazyload"#).unwrap());

/// React pages with more words than this in their initial HTML count as SSR.
const SSR_WORD_THRESHOLD: usize = 100;

/// Noscript text must exceed this many characters to count as a fallback.
const NOSCRIPT_MIN_CHARS: usize = 50;

fn detail(name: &str, has_ssr: bool, has_hydration: bool, rendering_method: &str) -> FrameworkDetail {
    FrameworkDetail {
        name: name.to_string(),
        has_ssr,
        has_hydration,
        rendering_method: rendering_method.to_string(),
    }
}

/// Detect frameworks in fixed order: React/Next, Vue/Nuxt, Angular, Gatsby,
/// Svelte/SvelteKit, Astro, Remix.
pub fn detect_frameworks(html: &str, word_count: usize) -> Vec<FrameworkDetail> {
    let mut found = Vec::new();
    let has_text = word_count > SSR_WORD_THRESHOLD;

    let react = RE_REACT.is_match(html);
    let next = RE_NEXT.is_match(html);
    if react || next {
        let ssr = next || (react && has_text);
        let method = if next {
            "SSR/SSG"
        } else if ssr {
            "SSR"
        } else {
            "CSR"
        };
        found.push(detail(if next { "Next.js" } else { "React" }, ssr, react, method));
    }

    let vue = RE_VUE.is_match(html);
    let nuxt = RE_NUXT.is_match(html);
    if vue || nuxt {
        let ssr = nuxt || (vue && has_text);
        let method = if nuxt {
            "SSR/SSG"
        } else if ssr {
            "SSR"
        } else {
            "CSR"
        };
        found.push(detail(if nuxt { "Nuxt" } else { "Vue.js" }, ssr, vue, method));
    }

    if RE_ANGULAR.is_match(html) {
        let universal = RE_ANGULAR_UNIVERSAL.is_match(html);
        let method = if universal { "Angular Universal (SSR)" } else { "CSR" };
        found.push(detail("Angular", universal, true, method));
    }

    if RE_GATSBY.is_match(html) {
        found.push(detail("Gatsby", true, true, "SSG (Static)"));
    }

    if RE_SVELTE.is_match(html) {
        if RE_SVELTEKIT.is_match(html) {
            found.push(detail("SvelteKit", true, true, "SSR/SSG"));
        } else {
            found.push(detail("Svelte", false, true, "CSR"));
        }
    }

    if RE_ASTRO.is_match(html) {
        found.push(detail("Astro", true, false, "SSG (Static)"));
    }

    if RE_REMIX.is_match(html) {
        found.push(detail("Remix", true, true, "SSR"));
    }

    found
}

/// Classify the page from its detected frameworks.
pub fn rendering_type(details: &[FrameworkDetail]) -> RenderingType {
    if details.is_empty() {
        return RenderingType::Static;
    }
    let ssr = details.iter().filter(|d| d.has_ssr).count();
    if ssr == details.len() {
        RenderingType::Ssr
    } else if ssr == 0 {
        RenderingType::Csr
    } else {
        RenderingType::Hybrid
    }
}

/// True when some `<noscript>` block carries real fallback text.
pub fn has_noscript_content(html: &str) -> bool {
    RE_NOSCRIPT
        .captures_iter(html)
        .any(|caps| caps.get(1).is_some_and(|m| remove_tags(m.as_str()).trim().chars().count() > NOSCRIPT_MIN_CHARS))
}

/// Script elements whose body contains non-whitespace.
pub fn inline_script_count(html: &str) -> usize {
    RE_SCRIPT_BODY
        .captures_iter(html)
        .filter(|caps| caps.get(1).is_some_and(|m| !m.as_str().trim().is_empty()))
        .count()
}

/// Script elements with a non-empty `src` attribute.
pub fn external_script_count(html: &str) -> usize {
    RE_EXTERNAL_SCRIPT.find_iter(html).count()
}

pub fn has_dynamic_content(html: &str) -> bool {
    RE_DYNAMIC_MARKERS.is_match(html) || RE_TEMPLATE_SYNTAX.is_match(html) || RE_TEMPLATE_DIRECTIVES.is_match(html)
}

pub fn has_lazy_loading(html: &str) -> bool {
    RE_LAZY_LOADING.is_match(html)
}

/// Blocking score in `[0, 100]`.
///
/// Pages without detected frameworks always score 0.
pub fn blocking_score(
    framework_count: usize, rendering: RenderingType, content_ratio: f64, has_noscript: bool, external_scripts: usize,
) -> u32 {
    if framework_count == 0 {
        return 0;
    }

    let mut score = 20;
    score += match rendering {
        RenderingType::Csr => 40,
        RenderingType::Hybrid => 15,
        RenderingType::Ssr | RenderingType::Static => 0,
    };
    if content_ratio < 10.0 {
        score += 25;
    } else if content_ratio < 20.0 {
        score += 10;
    }
    if !has_noscript {
        score += 10;
    }
    if external_scripts > 15 {
        score += 10;
    } else if external_scripts > 10 {
        score += 5;
    }
    score.min(100)
}

/// Run every JavaScript rendering detector over the raw markup.
pub fn analyze_rendering(html: &str, word_count: usize, content_ratio: f64) -> JsRendering {
    let details = detect_frameworks(html, word_count);
    let rendering = rendering_type(&details);
    let noscript = has_noscript_content(html);
    let external = external_script_count(html);
    let score = blocking_score(details.len(), rendering, content_ratio, noscript, external);

    JsRendering {
        js_frameworks: details.iter().map(|d| d.name.clone()).collect(),
        js_framework_details: details,
        js_rendering_type: rendering,
        has_noscript_content: noscript,
        inline_script_count: inline_script_count(html),
        external_script_count: external,
        has_dynamic_content: has_dynamic_content(html),
        has_lazy_loading: has_lazy_loading(html),
        js_blocking_score: score,
    }
}
