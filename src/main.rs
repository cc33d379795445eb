mod api;
mod gateway;

use clap::{Parser, Subcommand};
use parrot_channels::{DryRunPoster, TwitterChannel};
use parrot_core::{
    config::{self, Config},
    message::WebhookPayload,
    secrets, shellexpand,
    traits::{CredentialsProvider, ReplyPoster, Translator},
};
use parrot_memory::Store;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "parrot",
    version,
    about = "Parrot — replies to mentions with a translation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server.
    Start,
    /// Show configuration and check translator availability.
    Status,
    /// Run one mention through the pipeline.
    Translate {
        /// Account that mentioned the bot.
        #[arg(long)]
        screen_name: String,
        /// Post to reply under.
        #[arg(long)]
        status_id: String,
        /// Log replies instead of posting them.
        #[arg(long)]
        dry_run: bool,
        /// The mention text.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Print recent interactions.
    History {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
        /// Only show interactions from this account.
        #[arg(long)]
        screen_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_tracing(&cfg);

    match cli.command {
        Commands::Start => {
            cfg.require_bot_handle()?;

            let translator = build_translator(&cfg)?;
            if !translator.is_available().await {
                tracing::warn!(
                    "translator '{}' did not answer its availability check; starting anyway",
                    translator.name()
                );
            }

            let gw = build_gateway(&cfg, translator, build_poster(&cfg, false)?).await?;

            println!("{} — listening for mentions as @{}", cfg.parrot.name, gw.bot_handle());
            api::serve(cfg.api.clone(), Arc::new(gw)).await;
        }
        Commands::Status => {
            println!("{} — Status Check\n", cfg.parrot.name);
            println!("Config: {}", cli.config);
            println!(
                "Bot handle: {}",
                if cfg.bot.handle.is_empty() {
                    "(not set)"
                } else {
                    cfg.bot.handle.as_str()
                }
            );
            println!("Source language: {}", cfg.bot.source_language);
            println!(
                "Supported: {}",
                parrot_core::language::hashtag_list(&cfg.bot.supported_languages)
            );
            println!("Secrets backend: {}", cfg.secrets.backend);
            println!();

            let translator = build_translator(&cfg)?;
            println!(
                "  {}: {}",
                translator.name(),
                if translator.is_available().await {
                    "available"
                } else {
                    "unreachable"
                }
            );

            match Store::new(&cfg.memory).await {
                Ok(store) => println!(
                    "  store: {} interactions in {}",
                    store.count().await?,
                    shellexpand(&cfg.memory.db_path)
                ),
                Err(e) => println!("  store: error ({e})"),
            }
        }
        Commands::Translate {
            screen_name,
            status_id,
            dry_run,
            text,
        } => {
            if text.is_empty() {
                anyhow::bail!(
                    "no text provided. Usage: parrot translate --screen-name <s> --status-id <id> <text>"
                );
            }

            let payload = WebhookPayload {
                screen_name: Some(screen_name),
                tweet: Some(text.join(" ")),
                status_id: Some(serde_json::Value::String(status_id)),
            };
            let Some(request) = payload.validate() else {
                anyhow::bail!("screen name, text and status id must all be non-empty");
            };

            let translator = build_translator(&cfg)?;
            let gw = build_gateway(&cfg, translator, build_poster(&cfg, dry_run)?).await?;
            let outcome = gw.process(&request).await;

            println!("Target: {}", outcome.target);
            for (i, segment) in outcome.segments.as_slice().iter().enumerate() {
                println!("[{}] {segment}", i + 1);
            }
            println!(
                "Persisted: {} | posted {}/{}",
                outcome.persisted,
                outcome.posted,
                outcome.segments.len()
            );
        }
        Commands::History { limit, screen_name } => {
            let store = Store::new(&cfg.memory).await?;
            let records = store.recent(screen_name.as_deref(), limit).await?;
            if records.is_empty() {
                println!("No interactions recorded.");
            }
            for r in records {
                println!(
                    "{} @{} [{}]\n  > {}\n  < {}",
                    r.date_tweeted, r.screen_name, r.target_language, r.tweet, r.translated_tweet
                );
            }
        }
    }

    Ok(())
}

/// Install the global subscriber. The returned guard flushes the log file on drop.
fn init_tracing(cfg: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.parrot.log_level));

    let (file_layer, guard) = if cfg.parrot.log_file {
        let dir = format!("{}/logs", shellexpand(&cfg.parrot.data_dir));
        let appender = tracing_appender::rolling::daily(dir, "parrot.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

/// Build the configured translator.
fn build_translator(cfg: &Config) -> anyhow::Result<Arc<dyn Translator>> {
    Ok(Arc::from(parrot_providers::from_config(&cfg.translate)?))
}

/// Build the reply poster. Dry runs never touch the network.
fn build_poster(cfg: &Config, dry_run: bool) -> anyhow::Result<Arc<dyn ReplyPoster>> {
    if dry_run {
        return Ok(Arc::new(DryRunPoster));
    }
    Ok(Arc::new(TwitterChannel::new(&cfg.twitter)?))
}

/// Wire the store and credentials around a translator and poster.
async fn build_gateway(
    cfg: &Config,
    translator: Arc<dyn Translator>,
    poster: Arc<dyn ReplyPoster>,
) -> anyhow::Result<gateway::Gateway> {
    let credentials: Arc<dyn CredentialsProvider> = Arc::from(secrets::from_config(&cfg.secrets)?);
    let store = Store::new(&cfg.memory).await?;

    Ok(gateway::Gateway::new(
        translator,
        Arc::new(store),
        credentials,
        poster,
        &cfg.bot,
    ))
}
