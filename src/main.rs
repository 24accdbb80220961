//! # HN Daily Digest
//!
//! A Hacker News digest pipeline that collects the day's trending stories,
//! classifies and summarizes them through the Anthropic Messages API, and
//! posts the result to Slack.
//!
//! ## Features
//!
//! - Fetches the ranked top-story list from the public HN Firebase API
//! - Filters to real stories scoring at least 50, keeps the top 20 by score
//! - Asks the model for detailed top-3 summaries plus a four-way
//!   categorization of the rest (dev, security, bigtech, misc)
//! - Renders Slack Block Kit messages and delivers them via incoming
//!   webhook, or via bot token with threaded per-story deep dives
//!
//! ## Usage
//!
//! ```sh
//! hn_daily_digest                 # categorized digest -> webhook
//! hn_daily_digest --mode brief    # top list + overview -> webhook
//! hn_daily_digest --mode thread   # digest + threaded deep dives -> bot API
//! ```
//!
//! ## Architecture
//!
//! The pipeline is strictly sequential:
//! 1. **Collect**: Fetch candidate ids, then each item in turn
//! 2. **Rank**: Filter, sort descending by score, truncate
//! 3. **Summarize**: One categorization call; in thread mode, one analysis
//!    call per top-3 story fed by its comments
//! 4. **Deliver**: One webhook POST, or a parent post plus threaded replies

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod error;
mod hn;
mod models;
mod outputs;
mod prompts;
mod summarize;
mod utils;

use api::AnthropicClient;
use cli::{Cli, Mode};
use config::Config;
use hn::{FetchPolicy, HnClient};
use models::Story;
use outputs::{blocks, bot::BotClient, webhook};

/// Request timeout for the HN and Slack clients.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Request timeout for model calls, which run much longer.
const LLM_TIMEOUT: Duration = Duration::from_secs(120);
/// Delay between successive threaded replies.
const REPLY_PACING: Duration = Duration::from_secs(1);
/// How many top stories get a threaded deep dive.
const DEEP_DIVE_COUNT: usize = 3;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hn_daily_digest starting up");

    let _ = dotenv::dotenv();

    let args = Cli::parse();
    debug!(?args.mode, %args.model, %args.language, "Parsed CLI arguments");

    let config = Config::from_env()?;

    // Fail on missing delivery credentials before any network call.
    match args.mode {
        Mode::Digest | Mode::Brief => {
            config.webhook_url()?;
        }
        Mode::Thread => {
            config.bot_credentials()?;
        }
    }

    // --- Construct clients once, pass everywhere ---
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    let llm_http = reqwest::Client::builder().timeout(LLM_TIMEOUT).build()?;
    let hn = HnClient::new(http.clone(), config.hn_api_base.clone());
    let llm = AnthropicClient::new(llm_http, config.anthropic_api_key.clone(), args.model);
    let policy = FetchPolicy::default();
    info!(model = %llm.model(), "Clients ready");

    info!("Collecting HN stories");
    let stories = hn.fetch_top_stories(&policy).await?;
    if stories.is_empty() {
        info!("No stories passed the filter; nothing to post");
        return Ok(());
    }

    let local_date = Local::now().date_naive().to_string();

    match args.mode {
        Mode::Digest => {
            run_digest(&llm, &http, &config, &stories, &args.language, &local_date).await?
        }
        Mode::Brief => {
            run_brief(&llm, &http, &config, &stories, &args.language, &local_date).await?
        }
        Mode::Thread => {
            run_thread(
                &hn,
                &llm,
                &http,
                &config,
                &policy,
                &stories,
                &args.language,
                &local_date,
            )
            .await?
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Digest mode: categorized digest as a single webhook message.
async fn run_digest(
    llm: &AnthropicClient,
    http: &reqwest::Client,
    config: &Config,
    stories: &[Story],
    language: &str,
    date: &str,
) -> error::Result<()> {
    info!("Requesting categorization and summaries");
    let summary = summarize::categorize(llm, stories, language).await?;

    info!("Formatting Slack message");
    let message = blocks::digest_message(&summary, stories, date);

    info!("Delivering via webhook");
    webhook::send(http, config.webhook_url()?, &message).await
}

/// Brief mode: top list plus free-text overview as a single webhook message.
async fn run_brief(
    llm: &AnthropicClient,
    http: &reqwest::Client,
    config: &Config,
    stories: &[Story],
    language: &str,
    date: &str,
) -> error::Result<()> {
    info!("Requesting overview summary");
    let summary = summarize::brief(llm, stories, language).await?;

    info!("Formatting Slack message");
    let message = blocks::brief_message(&summary, stories, date);

    info!("Delivering via webhook");
    webhook::send(http, config.webhook_url()?, &message).await
}

/// Thread mode: digest as a bot-posted parent message, then one threaded
/// deep-dive reply per top-3 story, paced a second apart.
#[allow(clippy::too_many_arguments)]
async fn run_thread(
    hn: &HnClient,
    llm: &AnthropicClient,
    http: &reqwest::Client,
    config: &Config,
    policy: &FetchPolicy,
    stories: &[Story],
    language: &str,
    date: &str,
) -> error::Result<()> {
    let (token, channel) = config.bot_credentials()?;
    let bot = BotClient::new(http.clone(), token, channel);

    info!("Requesting categorization and summaries");
    let summary = summarize::categorize(llm, stories, language).await?;

    info!("Posting parent digest");
    let parent = blocks::digest_message(&summary, stories, date);
    let parent_ts = bot.post_message(&parent, None).await?;
    info!(ts = %parent_ts, "Parent digest posted");

    for (i, story) in stories.iter().take(DEEP_DIVE_COUNT).enumerate() {
        if i > 0 {
            sleep(REPLY_PACING).await;
        }
        let rank = i + 1;
        info!(story_id = story.id, rank, "Collecting comments for deep dive");
        let comments = hn.fetch_comments(story, policy).await?;

        info!(story_id = story.id, rank, "Requesting story analysis");
        let analysis = summarize::analyze(llm, story, &comments, language).await?;

        let reply = blocks::analysis_reply(rank, &analysis, story);
        bot.post_message(&reply, Some(&parent_ts)).await?;
        info!(story_id = story.id, rank, "Posted threaded deep dive");
    }

    Ok(())
}
