// Colored terminal output for URL verdicts.
//
// This module handles all terminal-specific formatting: colors, tables,
// summaries. The main.rs commands delegate here.

use colored::{ColoredString, Colorize};

use crate::output::truncate_chars;
use crate::verdict::{RiskTier, Verdict};

/// Display a ranked verdict list in the terminal, worst first.
pub fn display_verdict_list(verdicts: &[Verdict]) {
    if verdicts.is_empty() {
        println!("No URLs scored.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Scan Results ({} URLs) ===", verdicts.len()).bold()
    );
    println!();

    // Header
    println!(
        "  {:>4}  {:<60} {:>6}  {:<10}",
        "Rank".dimmed(),
        "URL".dimmed(),
        "Score".dimmed(),
        "Tier".dimmed(),
    );
    println!("  {}", "-".repeat(86).dimmed());

    for (i, verdict) in verdicts.iter().enumerate() {
        println!(
            "  {:>4}. {:<60} {:>6.3}  {:<10}",
            i + 1,
            truncate_chars(&verdict.url, 58),
            verdict.score,
            colorize_tier(verdict.tier),
        );
    }

    println!();

    // Summary
    let high = verdicts.iter().filter(|v| v.tier == RiskTier::High).count();
    let suspicious = verdicts
        .iter()
        .filter(|v| v.tier == RiskTier::Suspicious)
        .count();

    if high > 0 {
        println!("  {} {} high-risk URLs", "!!".red().bold(), high);
    }
    if suspicious > 0 {
        println!("  {} {} suspicious URLs", "~".yellow(), suspicious);
    }
    if high == 0 && suspicious == 0 {
        println!("  {} all URLs look benign", "ok".green());
    }
}

/// Display a single URL's verdict in detail.
pub fn display_verdict(verdict: &Verdict) {
    println!("\n{}", format!("=== {} ===", verdict.url).bold());
    println!(
        "  Phishing score: {:.3}  ({})",
        verdict.score,
        colorize_tier(verdict.tier)
    );

    if verdict.indicators.is_empty() {
        println!("  Indicators: none");
    } else {
        println!("  Indicators:");
        for reason in &verdict.indicators {
            println!("    - {reason}");
        }
    }
}

fn colorize_tier(tier: RiskTier) -> ColoredString {
    match tier {
        RiskTier::High => tier.as_str().red().bold(),
        RiskTier::Suspicious => tier.as_str().yellow(),
        RiskTier::Low => tier.as_str().green(),
    }
}
