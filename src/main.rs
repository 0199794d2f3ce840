use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use devprofile::github::validate_username;
use devprofile::models::{sort_repositories, RepoSort};
use devprofile::output::{format_json, format_markdown, format_text};
use devprofile::{
    CommitTimelineBuilder, Config, GitHubApi, GitHubClient, PipelineConfig, ProfileAggregator,
    Report,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "devprofile")]
#[command(version = "0.1.0")]
#[command(about = "Summarize a GitHub developer profile: stats, languages, frameworks and commits")]
struct Args {
    /// GitHub username to summarize
    #[arg(short, long)]
    username: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Repository order: stars, updated, name or created
    #[arg(long, default_value = "stars")]
    sort: RepoSort,

    /// Include the 30-day commit timeline
    #[arg(long)]
    timeline: bool,

    /// Maximum concurrent repository listing requests
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("devprofile=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(e) = validate_username(&args.username) {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(2);
    }

    let mut config = Config::from_env()?;
    if let Some(limit) = args.concurrency {
        config.concurrency_limit = limit.max(1);
    }
    if config.github_token.is_none() {
        tracing::info!("GITHUB_TOKEN not set, using unauthenticated rate limits");
    }

    let github: Arc<dyn GitHubApi> = Arc::new(GitHubClient::new(&config)?);
    let aggregator = ProfileAggregator::with_shared(github.clone(), PipelineConfig::from(&config));

    let report = match build_report(&aggregator, github, &args).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    let now = Utc::now();
    let output = match args.format {
        Format::Json => format_json(&report)?,
        Format::Markdown => format_markdown(&report, now),
        Format::Text => format_text(&report, now),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn build_report(
    aggregator: &ProfileAggregator,
    github: Arc<dyn GitHubApi>,
    args: &Args,
) -> devprofile::Result<Report> {
    let mut profile = aggregator.build_profile(&args.username).await?;
    sort_repositories(&mut profile.repositories, args.sort);

    let commit_timeline = if args.timeline {
        let builder = CommitTimelineBuilder::with_shared(github);
        Some(builder.build_commit_timeline(&args.username).await?)
    } else {
        None
    };

    Ok(Report {
        profile,
        commit_timeline,
    })
}
