// ██████╗ ██████╗  █████╗ ██╗██████╗ ██╗███████╗
// ██╔══██╗██╔══██╗██╔══██╗██║██╔══██╗██║██╔════╝
// ██████╔╝██████╔╝███████║██║██████╔╝██║█████╗
// ██╔═══╝ ██╔══██╗██╔══██║██║██╔══██╗██║██╔══╝
// ██║     ██║  ██║██║  ██║██║██║  ██║██║███████╗
// ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝╚═╝  ╚═╝╚═╝╚══════╝
//
// ██╗     ███████╗ █████╗ ██████╗
// ██║     ██╔════╝██╔══██╗██╔══██╗
// ██║     █████╗  ███████║██║  ██║
// ██║     ██╔══╝  ██╔══██║██║  ██║
// ███████╗███████╗██║  ██║██████╔╝
// ╚══════╝╚══════╝╚═╝  ╚═╝╚═════╝
//
// E N G I N E
//
// The most overkill lead harvester the Prairie State has ever seen.
// Rust + Tokio + selector cascades + an exact dedup gate,
// all to find dental offices that don't have websites yet.

mod collector;
mod config;
mod dedup;
mod export;
mod extract;
mod manual;
mod models;
mod sources;
mod throttle;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use crate::collector::LeadCollector;
use crate::config::Config;
use crate::export::ExportOutcome;

fn print_banner() {
    let banner = r#"
    ╔══════════════════════════════════════════════════════════════╗
    ║                                                              ║
    ║              PRAIRIE LEAD ENGINE                             ║
    ║                                                              ║
    ║   Sources:  YellowPages | Manta | Superpages | Yelp          ║
    ║   Dedup:    exact, order-preserving, (name, phone) keyed     ║
    ║   Output:   one CSV, eight columns, zero excuses             ║
    ║   Manners:  randomized courtesy delays on every request      ║
    ║                                                              ║
    ║   "Somewhere in Illinois, a business has no website.         ║
    ║    We will find it."                                         ║
    ║                                                              ║
    ╚══════════════════════════════════════════════════════════════╝
    "#;
    println!("{}", banner);
}

/// What the operator asked for at the menu.
enum RunMode {
    Search(Vec<String>),
    Manual,
}

/// Show the menu and read the operator's choice: Enter for the default
/// categories, a comma-separated list for custom ones, or "manual" to
/// become the source adapter yourself.
fn prompt_run_mode<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<RunMode> {
    let defaults = Config::default_categories();

    writeln!(output, "\n🎯 Target categories:")?;
    for (i, cat) in defaults.iter().enumerate() {
        writeln!(output, "   {}. {}", i + 1, cat)?;
    }

    writeln!(output, "\n{}", "=".repeat(60))?;
    writeln!(output, "Options:")?;
    writeln!(output, "1. Press Enter to search the default categories")?;
    writeln!(output, "2. Type custom categories (comma-separated)")?;
    writeln!(output, "3. Type 'manual' to add leads by hand")?;
    write!(output, "\nYour choice: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    if answer.eq_ignore_ascii_case("manual") {
        return Ok(RunMode::Manual);
    }
    if answer.is_empty() {
        return Ok(RunMode::Search(defaults));
    }
    let custom: Vec<String> = answer
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    Ok(RunMode::Search(if custom.is_empty() { defaults } else { custom }))
}

/// The headers we send alongside every search request. Fixed and honest;
/// see config for the User-Agent itself.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    print_banner();

    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "🌽 PRAIRIE LEAD ENGINE initializing");

    let config = Config::from_env();
    info!(
        state = config.state_name.as_str(),
        timeout_secs = config.request_timeout.as_secs(),
        "configuration loaded"
    );

    let mode = {
        let stdin = io::stdin();
        let mut locked = stdin.lock();
        prompt_run_mode(&mut locked, &mut io::stdout())?
    };

    let (tx, lead_collector) = LeadCollector::new();

    match mode {
        RunMode::Manual => {
            let stdin = io::stdin();
            let entered = manual::run_session(
                stdin.lock(),
                io::stdout(),
                &tx,
                &config.state_name,
            )?;
            info!(entered = entered, "manual entry session complete");
        }
        RunMode::Search(categories) => {
            // The only fatal error in the whole run: no HTTP client, no tool.
            // Everything past this point degrades instead of dying.
            let client = reqwest::Client::builder()
                .timeout(config.request_timeout)
                .user_agent(&config.user_agent)
                .default_headers(default_headers())
                .build()
                .context("constructing the HTTP client")?;

            info!(categories = categories.len(), "starting directory sweep");

            // Strictly sequential: one category, one directory, one request
            // in flight at a time. We could parallelize this. The
            // directories would ban us by lunch.
            for category in &categories {
                info!(category = category.as_str(), "══════ searching category ══════");
                for profile in sources::all_profiles() {
                    match sources::harvest(&client, &config, &profile, category, &tx).await {
                        Ok(found) if found == 0 => {
                            info!(
                                source = %profile.source,
                                category = category.as_str(),
                                "no listings found — markup may have drifted"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => {
                            // Recoverable by definition: this (site, category)
                            // pair contributes nothing and the sweep moves on.
                            warn!(
                                source = %profile.source,
                                category = category.as_str(),
                                error = %e,
                                "adapter call failed — zero leads from this pair"
                            );
                        }
                    }
                }
            }
        }
    }

    // Producers done; hang up our end so the drain below sees the close.
    drop(tx);
    let leads = lead_collector.drain();

    info!("🔄 removing cross-source duplicates...");
    let (unique, dedup_snapshot) = dedup::dedupe(leads);

    match export::export_leads(&unique, &config.state_name, None) {
        Ok(ExportOutcome::Written { path, stats }) => {
            println!("\n✅ Exported {} leads to {}", stats.total, path.display());
            println!("\n📊 Statistics:");
            println!("   Total leads: {}", stats.total);
            println!(
                "   Without website: {} ({:.1}%)",
                stats.without_website, stats.percent_without
            );
            println!("   With website: {}", stats.with_website);
        }
        Ok(ExportOutcome::NothingToExport) => {
            // Not an error. But somebody should hear about it.
            warn!("no leads survived the pipeline — nothing exported");
            println!("\n⚠️  No leads found");
            println!("\nPossible reasons:");
            println!("- Directory markup has drifted away from our selector cascades");
            println!("- Anti-automation defenses are active");
            println!("- Network connectivity issues");
            println!("\nSuggestion: run again and type 'manual' to enter leads by hand.");
        }
        Err(e) => {
            // Export failed at the last mile. The run itself still
            // happened; report and exit cleanly.
            warn!(error = %e, "export failed");
        }
    }

    info!(
        run_id = %run_id,
        dedup = %serde_json::to_string(&dedup_snapshot).unwrap_or_else(|_| "{}".to_string()),
        "🌾 PRAIRIE LEAD ENGINE: run complete"
    );
    Ok(())
}
