//! aniscope: fetch public reviews for an anime title, classify their
//! sentiment, and print per-polarity summaries with a model reflection.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use aniscope_core::ProviderKind;
use aniscope_jikan::JikanClient;
use aniscope_models::{
    ChatCompletionsProvider, HostedInferenceProvider, HostedModels, LexiconProvider,
};
use aniscope_pipeline::{run_review_digest, LabelDigest, PipelineError, ReviewDigest};

#[derive(Debug, Parser)]
#[command(name = "aniscope")]
#[command(about = "Anime review sentiment digest", long_about = None)]
struct Cli {
    /// Anime title to look up, e.g. "Naruto"
    title: String,

    /// Review pages to fetch (1-5); defaults to ANISCOPE_REVIEW_PAGES
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=5))]
    pages: Option<u32>,

    /// Keep spoiler-flagged reviews instead of dropping them
    #[arg(long)]
    include_spoilers: bool,

    /// Model provider override; defaults to ANISCOPE_PROVIDER
    #[arg(long, value_enum)]
    provider: Option<ProviderArg>,

    /// Emit the digest as JSON instead of text panels
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    Openai,
    Hf,
    Lexicon,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Hf => ProviderKind::HostedInference,
            ProviderArg::Lexicon => ProviderKind::Lexicon,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = aniscope_core::load_app_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = JikanClient::with_base_url(
        config.request_timeout_secs,
        config.page_delay_ms,
        &config.jikan_base_url,
    )?;

    let pages = cli.pages.unwrap_or(config.review_pages);
    let filter_spoilers = !cli.include_spoilers;
    let provider_kind = cli.provider.map_or(config.provider, ProviderKind::from);
    tracing::info!(title = %cli.title, pages, provider = %provider_kind, "starting digest run");

    let outcome = match provider_kind {
        ProviderKind::OpenAi => {
            let api_key = config
                .openai_api_key
                .as_deref()
                .context("OPENAI_API_KEY must be set for the openai provider")?;
            let provider = ChatCompletionsProvider::with_base_url(
                api_key,
                &config.chat_model,
                config.request_timeout_secs,
                &config.openai_base_url,
            )?;
            run_review_digest(&client, &provider, &cli.title, pages, filter_spoilers).await
        }
        ProviderKind::HostedInference => {
            let token = config
                .hf_api_token
                .as_deref()
                .context("HF_API_TOKEN must be set for the hf provider")?;
            let models = HostedModels {
                sentiment: config.hf_sentiment_model.clone(),
                summary: config.hf_summary_model.clone(),
                generation: config.hf_generation_model.clone(),
            };
            let provider = HostedInferenceProvider::with_base_url(
                token,
                models,
                config.request_timeout_secs,
                &config.hf_base_url,
            )?;
            run_review_digest(&client, &provider, &cli.title, pages, filter_spoilers).await
        }
        ProviderKind::Lexicon => {
            let provider = LexiconProvider::new();
            run_review_digest(&client, &provider, &cli.title, pages, filter_spoilers).await
        }
    };

    match outcome {
        Ok(digest) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&digest)?);
            } else {
                render(&digest);
            }
            Ok(())
        }
        // Zero qualifying reviews is a warning, not a failure.
        Err(PipelineError::NoReviews { title }) => {
            println!("No reviews found for \"{title}\".");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn render(digest: &ReviewDigest) {
    println!("{} (mal id {})", digest.title, digest.anime_id);
    println!(
        "{} reviews collected, {} labeled",
        digest.collected_reviews, digest.labeled_reviews
    );
    render_panel(&digest.positive);
    render_panel(&digest.negative);
}

fn render_panel(panel: &LabelDigest) {
    println!();
    match panel.mean_score {
        Some(mean) => println!(
            "== {} ({} reviews, mean score {mean:.1}) ==",
            panel.label, panel.review_count
        ),
        None => println!("== {} ({} reviews) ==", panel.label, panel.review_count),
    }
    match panel.summary.as_deref() {
        Some(summary) => println!("summary:\n{summary}"),
        None => println!("summary: no data"),
    }
    println!("reflection:\n{}", panel.reflection);
}
