mod echo;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use geolens_core::fetch::parse_page_url;
use geolens_core::{AnalysisResult, AuditConfig, Auditor, ProbeScheme, to_json, to_text};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Audit a web page for SEO and AI answer-engine visibility
#[derive(Parser, Debug)]
#[command(name = "geolens")]
#[command(author = "GeoLens Contributors")]
#[command(version)]
#[command(about = "Audit web pages for SEO and generative-engine visibility", long_about = None)]
struct Args {
    /// URL to audit, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// HTTP timeout in seconds for the page fetch
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for the page fetch
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Page URL to attribute to file or stdin input
    #[arg(long, default_value = "https://localhost/", value_name = "URL")]
    url: String,

    /// Probe robots.txt, sitemaps and llms.txt on the page's own origin instead of https://<domain>
    #[arg(long)]
    probe_origin: bool,

    /// Maximum number of recommendations (at most 10)
    #[arg(short = 'n', long, default_value = "10", value_name = "NUM")]
    max_recommendations: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn is_url(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }

    fn audit_config(&self) -> AuditConfig {
        let mut builder = AuditConfig::builder()
            .timeout(self.timeout)
            .max_recommendations(self.max_recommendations)
            .probe_scheme(if self.probe_origin { ProbeScheme::PageOrigin } else { ProbeScheme::Https });
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build()
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "geolens_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

async fn run_audit(args: &Args) -> anyhow::Result<AnalysisResult> {
    let auditor = Auditor::new(args.audit_config());

    if args.is_url() {
        if args.verbose {
            echo::print_step(1, 3, &format!("Fetching {}", args.input.bright_white().underline()));
            echo::print_step(2, 3, "Probing robots.txt, sitemap, llms.txt and llms-full.txt");
        }
        return auditor.analyze(&args.input).await.with_context(|| format!("Failed to analyze {}", args.input));
    }

    let page_url = parse_page_url(&args.url).context("Invalid --url")?;
    if args.verbose {
        let source = if args.input == "-" { "stdin" } else { args.input.as_str() };
        echo::print_step(1, 3, &format!("Reading from {}", source.bright_white()));
    }
    let html = read_input(&args.input)?;

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_warning("Offline input: auxiliary probes are skipped and reported as not found");
        echo::print_step(2, 3, &format!("Scoring as {}", page_url.as_str().bright_white()));
    }

    Ok(auditor.analyze_markup(&html, page_url.as_str()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let started = Instant::now();
    let result = run_audit(&args).await?;
    let elapsed = started.elapsed();

    if args.verbose {
        echo::print_audit_summary(&result);
        echo::print_timing("Audit", elapsed);
        eprintln!();
        echo::print_step(3, 3, "Writing report");
    }

    let output = match args.format {
        OutputFormat::Text => to_text(&result),
        OutputFormat::Json => to_json(&result, args.pretty).context("Failed to render JSON")?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", output))
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Report written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
