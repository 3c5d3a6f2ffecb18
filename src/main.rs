use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use newbie_feed::api::{build_http_client, ApiClient};
use newbie_feed::config::Config;
use newbie_feed::content::{ContentDetail, FeedEntry};
use newbie_feed::day::{display_date_label, FeedDay};
use newbie_feed::feed::{CancelToken, FeedAggregator, FeedError, FeedState};
use newbie_feed::util::{display_width, single_line, truncate_to_width};

/// Column budget for one-line body previews.
const PREVIEW_WIDTH: usize = 76;

/// Get the config file path (~/.config/newbie/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("newbie")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "newbie", about = "Politically-balanced news summaries, one day at a time")]
struct Args {
    /// Day to load (YYYY-MM-DD). Defaults to today in the reference time zone.
    #[arg(long, value_name = "DAY")]
    date: Option<FeedDay>,

    /// Show the full detail for one content id instead of the day's feed
    #[arg(long, value_name = "ID", conflicts_with = "date")]
    id: Option<String>,

    /// Config file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?
        .with_env_overrides();

    let http = build_http_client(&config).context("Failed to create HTTP client")?;
    let client = ApiClient::from_config(http, &config).context("Invalid configuration")?;

    if let Some(id) = args.id {
        let detail = client
            .fetch_detail(&id)
            .await
            .with_context(|| format!("Failed to load content {}", id.trim()))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&detail)?);
        } else {
            print_detail(&detail);
        }
        return Ok(());
    }

    let offset = config.reference_offset().context("Invalid configuration")?;
    let day = args.date.unwrap_or_else(|| FeedDay::today(offset));

    let aggregator = FeedAggregator::new(client.clone(), client)
        .with_concurrency_limit(config.concurrency_limit())
        .with_detail_timeout(config.request_timeout());

    // Ctrl-C abandons the in-flight load
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling feed load");
            on_interrupt.cancel();
        }
    });

    let mut state = FeedState::new(day);
    state.begin(day);
    let result = aggregator.load_feed(day, &cancel).await;
    let cancelled = matches!(result, Err(FeedError::Cancelled));
    state.apply(result);

    if let Some(error) = &state.error {
        anyhow::bail!("{} (try again)", error);
    }
    if cancelled {
        eprintln!("Cancelled.");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.entries)?);
    } else {
        print_feed(&state);
    }
    Ok(())
}

fn print_feed(state: &FeedState) {
    println!("{}", state.day.display_korean());
    println!();

    if state.is_empty() {
        println!("No articles for this day.");
        return;
    }

    for entry in &state.entries {
        print_entry(entry);
    }
}

fn print_entry(entry: &FeedEntry) {
    let title = single_line(&entry.title);
    let body = single_line(&entry.body);
    println!("[{}] {}", entry.id, title);
    println!("    {}", truncate_to_width(&body, PREVIEW_WIDTH));
    if !entry.progressive_sources.is_empty() {
        println!("    진보: {}", entry.progressive_sources.join(", "));
    }
    if !entry.conservative_sources.is_empty() {
        println!("    보수: {}", entry.conservative_sources.join(", "));
    }
    println!();
}

fn print_detail(detail: &ContentDetail) {
    let title = single_line(&detail.content_title);
    println!("{}", title);
    println!("{}", "=".repeat(display_width(&title)));
    println!(
        "{} · {}",
        display_date_label(&detail.date),
        single_line(&detail.topic)
    );
    println!("{}", detail.reporting_volume_compare.volume_label());
    println!();

    println!("{}", detail.full_article_summary);
    println!();

    if !detail.glossary.is_empty() {
        println!("Glossary");
        for item in &detail.glossary {
            println!("  {}: {}", single_line(&item.term), single_line(&item.definition));
        }
        println!();
    }

    if !detail.source_articles.is_empty() {
        println!("Sources");
        for source in detail.classified_sources() {
            println!(
                "  [{}] {} - {}",
                source.leaning,
                single_line(&source.press),
                single_line(&source.title)
            );
            println!("      {}", source.url);
        }
    }
}
