//! Foresight CLI
//!
//! Command-line interface for Foresight:
//! - Render current headlines or projections without a browser
//! - Probe the news backend
//! - Generate a default config file

use clap::{Parser, Subcommand, ValueEnum};
use foresight::config::{generate_default_config, Config};
use foresight::gateway::{GatewayConfig, HttpGateway, NewsGateway};
use foresight::logging::init_logging;
use foresight::news::{Feed, GenerationRequest, Timeframe};
use foresight::pipeline::{Outcome, RetrievalPipeline};
use foresight::render::{markup, MemorySurface, Region, Renderer, Surface};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "foresight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Current and projected headlines, with an offline fallback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// News backend URL (default: from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Html,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show current headlines
    Current {
        /// Number of headlines to request (default: from config)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Also show the detail view of this card
        #[arg(long)]
        detail: Option<i64>,
    },

    /// Generate projected headlines
    Generate {
        /// Projection horizon: day, week or month
        #[arg(short, long, default_value = "week")]
        timeframe: Timeframe,
        /// Narrative style (neutral, optimistic, pessimistic, sensational, analytical)
        #[arg(short, long, default_value = "neutral")]
        style: String,
        /// Number of projections to request (default: from config)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Also show the detail view of this card
        #[arg(long)]
        detail: Option<i64>,
    },

    /// Check whether the news backend is healthy
    Health,

    /// List news categories known to the backend
    Categories,

    /// List news sources known to the backend
    Sources,

    /// List generation models available to the backend
    Models,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut config, source) = Config::load_default()?;
    init_logging(&config.logging)?;

    match source {
        Some(path) => tracing::debug!("Loaded config from {:?}", path),
        None => tracing::debug!("No config file found, using defaults"),
    }

    if let Some(url) = cli.api_url.clone() {
        config.gateway = GatewayConfig {
            base_url: url,
            ..config.gateway
        };
    }

    let gateway = Arc::new(HttpGateway::new(config.gateway.clone())?);

    match cli.command {
        Commands::Current { limit, detail } => {
            let pipeline = headless_pipeline(&gateway, &config);

            let limit = limit.unwrap_or(config.pipeline.current_limit);
            let outcome = pipeline.fetch_current_news(limit).await;
            report(&outcome, &pipeline, Feed::Current, cli.format);
            show_detail(&pipeline, Feed::Current, detail, cli.format);

            if matches!(outcome, Outcome::Failed(_)) {
                std::process::exit(1);
            }
        }

        Commands::Generate {
            timeframe,
            style,
            limit,
            detail,
        } => {
            let pipeline = headless_pipeline(&gateway, &config);

            let limit = limit.unwrap_or(config.pipeline.future_limit);
            let request = GenerationRequest::new(timeframe, style).limit(limit);
            let outcome = pipeline.generate_future_news(request).await;
            report(&outcome, &pipeline, Feed::Future, cli.format);
            show_detail(&pipeline, Feed::Future, detail, cli.format);

            if matches!(outcome, Outcome::Failed(_)) {
                std::process::exit(1);
            }
        }

        Commands::Health => {
            if gateway.check_health().await {
                println!("News backend at {} is healthy", gateway.config().base_url);
            } else {
                println!("News backend at {} is offline", gateway.config().base_url);
                std::process::exit(1);
            }
        }

        Commands::Categories => print_list(gateway.list_categories().await?),
        Commands::Sources => print_list(gateway.list_sources().await?),
        Commands::Models => print_list(gateway.list_models().await?),

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn headless_pipeline(gateway: &Arc<HttpGateway>, config: &Config) -> RetrievalPipeline {
    RetrievalPipeline::new(
        gateway.clone(),
        Arc::new(MemorySurface::new()),
        Arc::new(Renderer::new()),
        config.pipeline.clone(),
    )
}

fn report(outcome: &Outcome, pipeline: &RetrievalPipeline, feed: Feed, format: Format) {
    match outcome {
        Outcome::Mock(_) => eprintln!("(news backend offline, showing mock data)"),
        Outcome::Failed(_) => eprintln!("Request failed. Run the same command again to retry."),
        Outcome::Live(_) => {}
    }

    let panel = pipeline.rendered(feed);

    match format {
        Format::Html => println!("{}", panel.markup),
        Format::Text if panel.cards.is_empty() => match (outcome, feed) {
            (Outcome::Failed(_), _) => {}
            (_, Feed::Current) => println!("{}", markup::NO_CURRENT),
            (_, Feed::Future) => println!("{}", markup::NO_FUTURE),
        },
        Format::Text => {
            for card in &panel.cards {
                println!("[{}] {}", card.id, card.title);
                println!("    {} | {}", card.label, card.stamp);
                println!("    {}", card.body);
                if let Some(p) = card.probability {
                    println!("    Probability: {}%", p);
                }
                println!();
            }
        }
    }
}

fn show_detail(pipeline: &RetrievalPipeline, feed: Feed, id: Option<i64>, format: Format) {
    let Some(id) = id else {
        return;
    };

    match pipeline.show_detail(feed, id) {
        Some(html) => match format {
            Format::Html => println!("{}", html),
            Format::Text => {
                let panel = pipeline
                    .surface()
                    .panel(Region::Detail)
                    .unwrap_or_default();
                if let Some(card) = panel.cards.first() {
                    println!("=== {} ===", card.title);
                    println!("{} | {}", card.label, card.stamp);
                    if let Some(p) = card.probability {
                        println!("Probability: {}%", p);
                    }
                    println!("{}", card.body);
                }
            }
        },
        None => eprintln!("No {} card with id {}", feed, id),
    }
}

fn print_list(items: Vec<String>) {
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("{}", item);
    }
}
