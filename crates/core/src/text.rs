//! Markup-to-text stripping and lexical metrics.
//!
//! Everything here works on plain text produced by [`strip_markup`]:
//! script and style blocks removed, every tag replaced by a single space,
//! whitespace collapsed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::signals::ContentMetrics;

static RE_SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static RE_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static QUESTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)what is",
        r"(?i)how to",
        r"(?i)why does",
        r"(?i)when should",
        r"(?i)where can",
        r"(?i)who is",
        r"(?i)which is",
        r"(?i)can i",
        r"\?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static ANSWER_PATTERNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)the answer is|in short|to summarize|in conclusion|the solution|here's how|follow these steps")
        .unwrap()
});

/// Words longer than this many characters count as complex.
const COMPLEX_WORD_CHARS: usize = 10;

/// Remove script/style blocks and tags, collapsing whitespace.
pub fn strip_markup(html: &str) -> String {
    let without_scripts = RE_SCRIPT.replace_all(html, "");
    let without_styles = RE_STYLE.replace_all(&without_scripts, "");
    let without_tags = RE_TAG.replace_all(&without_styles, " ");
    RE_WHITESPACE.replace_all(&without_tags, " ").trim().to_string()
}

/// Remove every tag, keeping the text between them untouched.
pub fn remove_tags(html: &str) -> String {
    RE_TAG.replace_all(html, "").into_owned()
}

/// Whitespace-separated tokens of already stripped text.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Count of case-insensitively distinct tokens.
pub fn unique_word_count(words: &[&str]) -> usize {
    let mut seen: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Sentences delimited by runs of `.`, `!` or `?`; blank ones discarded.
pub fn sentence_count(text: &str) -> usize {
    RE_SENTENCE_END.split(text).filter(|s| !s.trim().is_empty()).count()
}

/// Matches of the fixed question phrases plus every `?`.
pub fn question_count(text: &str) -> usize {
    QUESTION_PATTERNS.iter().map(|re| re.find_iter(text).count()).sum()
}

/// Matches of summary/answer phrases ("in short", "here's how", ...).
pub fn answer_pattern_count(text: &str) -> usize {
    ANSWER_PATTERNS.find_iter(text).count()
}

/// `clamp(0, 100, 100 - (avg_sentence_length - 15) * 2 - complex_fraction * 100)`.
///
/// Text without words scores 0.
pub fn readability_score(word_count: usize, avg_sentence_length: f64, complex_words: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let complex_fraction = complex_words as f64 / word_count as f64;
    (100.0 - (avg_sentence_length - 15.0) * 2.0 - complex_fraction * 100.0).clamp(0.0, 100.0)
}

/// Stripped text length as a percentage of markup length, in `[0, 100]`.
pub fn content_ratio(text: &str, html: &str) -> f64 {
    let html_len = html.chars().count();
    if html_len == 0 {
        return 0.0;
    }
    (text.chars().count() as f64 / html_len as f64 * 100.0).clamp(0.0, 100.0)
}

/// Compute every lexical metric for a page.
pub fn content_metrics(text: &str, html: &str, paragraph_count: usize) -> ContentMetrics {
    let words = words(text);
    let word_count = words.len();
    let sentences = sentence_count(text);

    let avg_sentence_length = if sentences > 0 { word_count as f64 / sentences as f64 } else { 0.0 };
    let avg_paragraph_length =
        if paragraph_count > 0 { word_count as f64 / paragraph_count as f64 } else { word_count as f64 };
    let complex_words = words.iter().filter(|w| w.chars().count() > COMPLEX_WORD_CHARS).count();

    ContentMetrics {
        word_count,
        unique_words: unique_word_count(&words),
        question_count: question_count(text),
        answer_patterns: answer_pattern_count(text),
        readability_score: readability_score(word_count, avg_sentence_length, complex_words),
        avg_sentence_length,
        avg_paragraph_length,
        content_to_html_ratio: content_ratio(text, html),
    }
}
