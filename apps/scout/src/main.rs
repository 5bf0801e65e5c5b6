mod cache;
mod config;
mod email;
mod errors;
mod listing_source;
mod models;
mod oracle;
mod report;
mod resolver;
mod retry;
mod scoring;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::RedisCache;
use crate::config::Config;
use crate::listing_source::ScrapingDogClient;
use crate::oracle::OllamaClient;
use crate::resolver::pool::ResolutionPool;
use crate::retry::RetryPolicy;
use crate::scoring::ScoringPool;

#[derive(Parser, Debug)]
#[command(
    name = "scout",
    about = "Fetch job listings, score them against your profile, and rank the results",
    version
)]
struct Args {
    /// Search field for the listing source
    #[arg(long, default_value = "Software Engineer")]
    field: String,
    /// LinkedIn geo id to search within
    #[arg(long, default_value_t = 106142749)]
    geo_id: u64,
    /// Listing search page to fetch
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Path of the rendered HTML report
    #[arg(long, default_value = "JobEvaluations.html")]
    output: PathBuf,
    /// Skip email dispatch even when SMTP is configured
    #[arg(long)]
    no_email: bool,
    /// Also print the ranked evaluations to stdout as plain text
    #[arg(long)]
    print: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first: missing credentials must surface before any
    // work is scheduled.
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Scout v{}", env!("CARGO_PKG_VERSION"));

    let profile = tokio::fs::read_to_string(&config.profile_path)
        .await
        .with_context(|| format!("failed to read profile document '{}'", config.profile_path))?;

    // Unreachable cache is a fatal setup error, verified up front.
    let redis = RedisCache::connect(&config.redis_url)
        .await
        .context("failed to reach the Redis description cache")?;

    let listing_client = ScrapingDogClient::new(config.scrapingdog_api_key.clone());
    let retry = RetryPolicy::new(
        config.pipeline.max_retries,
        config.pipeline.retry_base_delay,
    );

    let listings = listing_client
        .search_listings(&args.field, args.geo_id, args.page)
        .await
        .context("listing search failed")?;
    if listings.is_empty() {
        warn!(field = %args.field, "listing search returned no results");
        return Ok(());
    }
    info!(count = listings.len(), field = %args.field, "listings fetched");

    let resolution_pool = ResolutionPool::new(
        Arc::new(listing_client),
        Arc::new(redis),
        config.pipeline.max_concurrent_resolutions,
        config.pipeline.rate_gate_interval,
        retry,
        config.pipeline.cache_ttl,
    );
    let descriptions = resolution_pool.resolve_all(listings).await;
    if descriptions.is_empty() {
        warn!("no listings could be resolved, nothing to score");
        return Ok(());
    }

    let oracle = OllamaClient::new(
        config.ollama_url.clone(),
        config.ollama_model.clone(),
        config.ollama_temperature,
        retry,
    );
    info!(model = %config.ollama_model, temperature = config.ollama_temperature, "oracle client initialized");

    let scoring_pool = ScoringPool::new(
        Arc::new(oracle),
        config.pipeline.max_concurrent_evaluations,
    );
    let ranked = scoring_pool.evaluate_all(&profile, descriptions).await;

    let html = report::render_html(&ranked);
    tokio::fs::write(&args.output, &html)
        .await
        .with_context(|| format!("failed to write report to {}", args.output.display()))?;
    info!(path = %args.output.display(), records = ranked.len(), "evaluation report written");

    if args.print {
        println!("{}", report::render_text(&ranked));
    }

    if args.no_email {
        info!("email dispatch disabled by --no-email");
    } else if let Some(email_config) = &config.email {
        // The report is already on disk; a send failure should not fail the run.
        if let Err(e) = email::send_report(email_config, &html).await {
            warn!(error = %e, "email dispatch failed");
        }
    } else {
        info!("no SMTP configuration present, skipping email dispatch");
    }

    Ok(())
}
