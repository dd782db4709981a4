//! Auxiliary resource probes: robots.txt, sitemap, llms.txt, llms-full.txt.
//!
//! Every probe is fault tolerant. Transport errors, timeouts and non-success
//! statuses all degrade to the probe's "not found" value and are only
//! logged. The result types and the pure helpers are always available; the
//! network side needs the `fetch` feature.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// AI crawler user agents checked against robots.txt, in reporting order.
pub const LLM_BOTS: &[&str] = &[
    "GPTBot",
    "ChatGPT-User",
    "CCBot",
    "anthropic-ai",
    "Claude-Web",
    "Google-Extended",
    "Bytespider",
    "Amazonbot",
    "FacebookBot",
    "PerplexityBot",
    "YouBot",
    "Applebot-Extended",
    "cohere-ai",
];

/// Synthetic entry reported when `User-agent: *` disallows everything.
pub const WILDCARD_BLOCK: &str = "All bots (wildcard)";

/// Sitemap locations tried in order.
pub const SITEMAP_PATHS: &[&str] = &["/sitemap.xml", "/sitemap_index.xml", "/sitemap/sitemap.xml", "/wp-sitemap.xml"];

/// llms.txt bodies are truncated to this many characters.
pub const LLMS_CONTENT_CAP: usize = 5000;

static BOT_RULES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    LLM_BOTS
        .iter()
        .map(|bot| {
            let pattern = format!(r"(?i)User-agent:\s*{}[\s\S]*?Disallow:\s*/", regex::escape(bot));
            (*bot, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static RE_WILDCARD_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)User-agent:\s*\*[\s\S]*?Disallow:\s*/\s*$").unwrap());

/// robots.txt lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsProbe {
    pub exists: bool,
    /// Raw robots.txt body.
    pub content: Option<String>,
    /// Blocked AI crawlers in [`LLM_BOTS`] order, possibly followed by [`WILDCARD_BLOCK`].
    pub llm_bots_blocked: Vec<String>,
}

impl RobotsProbe {
    /// Build a found result from a robots.txt body.
    pub fn from_content(content: String) -> Self {
        let llm_bots_blocked = blocked_llm_bots(&content);
        Self { exists: true, content: Some(content), llm_bots_blocked }
    }
}

/// Sitemap lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapProbe {
    pub exists: bool,
    /// The first candidate URL that answered with success.
    pub url: Option<String>,
}

/// llms.txt or llms-full.txt lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFileProbe {
    pub exists: bool,
    /// At most [`LLMS_CONTENT_CAP`] characters.
    pub content: Option<String>,
}

impl TextFileProbe {
    /// Validate a successful response. HTML payloads and redirects to the
    /// site root are catch-all pages, not the requested file.
    pub fn from_response(content_type: &str, final_path: &str, body: &str) -> Self {
        if content_type.contains("text/html") || looks_like_html(body) || final_path == "/" {
            return Self::default();
        }
        Self { exists: true, content: Some(cap_content(body)) }
    }
}

/// Results of the four probes for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResults {
    pub robots: RobotsProbe,
    pub sitemap: SitemapProbe,
    pub llms_txt: TextFileProbe,
    pub llms_full_txt: TextFileProbe,
}

/// AI crawlers disallowed by a robots.txt body.
pub fn blocked_llm_bots(robots: &str) -> Vec<String> {
    let mut blocked: Vec<String> =
        BOT_RULES.iter().filter(|(_, rule)| rule.is_match(robots)).map(|(bot, _)| bot.to_string()).collect();

    if RE_WILDCARD_BLOCK.is_match(robots) {
        blocked.push(WILDCARD_BLOCK.to_string());
    }
    blocked
}

/// Trimmed, lowercased body starts like an HTML document.
pub fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(16).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

fn cap_content(body: &str) -> String {
    body.chars().take(LLMS_CONTENT_CAP).collect()
}

#[cfg(feature = "fetch")]
pub use client::Prober;

#[cfg(feature = "fetch")]
mod client {
    use std::time::Duration;

    use reqwest::Client;
    use reqwest::header::{CONTENT_TYPE, USER_AGENT};
    use url::Url;

    use super::{ProbeResults, RobotsProbe, SITEMAP_PATHS, SitemapProbe, TextFileProbe};
    use crate::Result;

    /// Runs the auxiliary probes against one site origin.
    #[derive(Debug, Clone)]
    pub struct Prober {
        client: Client,
        user_agent: String,
    }

    impl Prober {
        pub fn new(timeout: u64, user_agent: &str) -> Result<Self> {
            let client = Client::builder().timeout(Duration::from_secs(timeout)).build()?;
            Ok(Self { client, user_agent: user_agent.to_string() })
        }

        /// Run all four probes concurrently against `base` and wait for all.
        pub async fn probe_all(&self, base: &Url) -> ProbeResults {
            let (robots, sitemap, llms_txt, llms_full_txt) = tokio::join!(
                self.robots(base),
                self.sitemap(base),
                self.text_file(base, "/llms.txt"),
                self.text_file(base, "/llms-full.txt"),
            );
            ProbeResults { robots, sitemap, llms_txt, llms_full_txt }
        }

        async fn get(&self, url: Url) -> Option<reqwest::Response> {
            match self.client.get(url.clone()).header(USER_AGENT, &self.user_agent).send().await {
                Ok(response) if response.status().is_success() => Some(response),
                Ok(response) => {
                    tracing::debug!(url = %url, status = response.status().as_u16(), "probe not found");
                    None
                }
                Err(err) => {
                    tracing::debug!(url = %url, error = %err, "probe failed");
                    None
                }
            }
        }

        pub async fn robots(&self, base: &Url) -> RobotsProbe {
            let Ok(url) = base.join("/robots.txt") else { return RobotsProbe::default() };
            let Some(response) = self.get(url).await else { return RobotsProbe::default() };

            match response.text().await {
                Ok(body) => {
                    let probe = RobotsProbe::from_content(body);
                    tracing::debug!(blocked = ?probe.llm_bots_blocked, "robots.txt found");
                    probe
                }
                Err(err) => {
                    tracing::debug!(error = %err, "robots.txt body unreadable");
                    RobotsProbe::default()
                }
            }
        }

        pub async fn sitemap(&self, base: &Url) -> SitemapProbe {
            for path in SITEMAP_PATHS {
                let Ok(url) = base.join(path) else { continue };
                if self.get(url.clone()).await.is_some() {
                    tracing::debug!(url = %url, "sitemap found");
                    return SitemapProbe { exists: true, url: Some(url.to_string()) };
                }
            }
            SitemapProbe::default()
        }

        /// Probe a plain-text well-known file such as `/llms.txt`.
        pub async fn text_file(&self, base: &Url, path: &str) -> TextFileProbe {
            let Ok(url) = base.join(path) else { return TextFileProbe::default() };
            let Some(response) = self.get(url).await else { return TextFileProbe::default() };

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let final_path = response.url().path().to_string();

            match response.text().await {
                Ok(body) => {
                    let probe = TextFileProbe::from_response(&content_type, &final_path, &body);
                    tracing::debug!(path, exists = probe.exists, "text file probe");
                    probe
                }
                Err(err) => {
                    tracing::debug!(path, error = %err, "text file body unreadable");
                    TextFileProbe::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_gptbot_blocked() {
        let blocked = blocked_llm_bots("User-agent: GPTBot\nDisallow: /");
        assert_eq!(blocked, vec!["GPTBot"]);
    }

    #[test]
    fn test_bot_match_is_case_insensitive() {
        let blocked = blocked_llm_bots("user-agent: ccbot\ndisallow: /private");
        assert_eq!(blocked, vec!["CCBot"]);
    }

    #[test]
    fn test_wildcard_block() {
        let blocked = blocked_llm_bots("User-agent: *\nDisallow: /\n");
        assert_eq!(blocked, vec![WILDCARD_BLOCK]);
    }

    #[test]
    fn test_wildcard_with_path_is_not_blanket() {
        assert!(blocked_llm_bots("User-agent: *\nDisallow: /admin\n").is_empty());
    }

    #[test]
    fn test_allow_all_blocks_nothing() {
        assert!(blocked_llm_bots("User-agent: *\nAllow: /\n").is_empty());
    }

    #[test]
    fn test_bots_reported_in_fixed_order() {
        let robots = "User-agent: PerplexityBot\nDisallow: /\n\nUser-agent: GPTBot\nDisallow: /\n";
        assert_eq!(blocked_llm_bots(robots), vec!["GPTBot", "PerplexityBot"]);
    }

    #[rstest]
    #[case("<!DOCTYPE html><html></html>", true)]
    #[case("   \n<html lang=\"en\">", true)]
    #[case("# Example\n\n> Site summary", false)]
    #[case("", false)]
    fn test_looks_like_html(#[case] body: &str, #[case] expected: bool) {
        assert_eq!(looks_like_html(body), expected);
    }

    #[test]
    fn test_text_file_rejects_html_content_type() {
        let probe = TextFileProbe::from_response("text/html; charset=utf-8", "/llms.txt", "# Title");
        assert!(!probe.exists);
        assert!(probe.content.is_none());
    }

    #[test]
    fn test_text_file_rejects_root_redirect() {
        let probe = TextFileProbe::from_response("text/plain", "/", "# Title");
        assert!(!probe.exists);
    }

    #[test]
    fn test_text_file_content_capped() {
        let body = "a".repeat(LLMS_CONTENT_CAP + 100);
        let probe = TextFileProbe::from_response("text/plain", "/llms.txt", &body);
        assert!(probe.exists);
        assert_eq!(probe.content.map(|c| c.chars().count()), Some(LLMS_CONTENT_CAP));
    }

    #[test]
    fn test_robots_from_content() {
        let probe = RobotsProbe::from_content("User-agent: *\nAllow: /".to_string());
        assert!(probe.exists);
        assert!(probe.llm_bots_blocked.is_empty());
        assert!(probe.content.is_some());
    }
}
