use geolens_core::{AnalysisResult, Priority};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "GeoLens".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "SEO and generative-engine page audits\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 2000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 6000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Colored `score/100`: green from 70, yellow from 40, red below.
fn colored_score(score: u32) -> String {
    let text = format!("{:>3}/100", score);
    match score {
        70.. => text.bright_green().to_string(),
        40..=69 => text.bright_yellow().to_string(),
        _ => text.bright_red().to_string(),
    }
}

/// Print the score card
pub fn print_audit_summary(result: &AnalysisResult) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Audit Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Domain:".dimmed(), result.domain.bright_white());
    eprintln!("  {} {}", "Overall:".dimmed(), colored_score(result.overall_score));

    for category in result.categories.iter() {
        eprintln!("  {:<18} {}", format!("{}:", category.name).dimmed(), colored_score(category.score));
    }

    let high = result.recommendations.iter().filter(|r| r.priority == Priority::High).count();
    eprintln!(
        "  {} {} ({} high priority)\n",
        "Recommendations:".dimmed(),
        result.recommendations.len().to_string().bright_white(),
        high
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
