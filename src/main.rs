//! Deck Render - exports every deck in a directory to HTML
//!
//! Run without arguments from the project root: decks are read from ./decks,
//! responses cached in ./tmp and pages written to ./dist.

use clap::Parser;
use deck_render::{
    run_batch, AbsentPolicy, BatchConfig, CacheOptions, CardSchema, DeckError, DeckLoader,
    NotionClient, ObjectCache, WriteFailurePolicy,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Render printable deck sheets from the Notion card database
#[derive(Parser, Debug)]
#[command(name = "deck_render")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding one JSON file per deck
    #[arg(long, default_value = "./decks")]
    decks: PathBuf,

    /// Directory the HTML pages are written to
    #[arg(long, default_value = "./dist")]
    out: PathBuf,

    /// Directory for cached Notion responses
    #[arg(long, default_value = "./tmp")]
    cache: PathBuf,

    /// Mustache template used for every deck
    #[arg(long, default_value = "./templates/deck.mustache")]
    template: PathBuf,

    /// Maximum number of cards looked up at the same time
    #[arg(long, default_value_t = 64)]
    concurrency: usize,

    /// Notion API base URL
    #[arg(long, default_value = deck_render::notion::DEFAULT_BASE_URL)]
    notion_url: String,

    /// Notion integration token
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Notion database holding the cards
    #[arg(long, env = "NOTION_DATABASE_ID")]
    database_id: Option<String>,

    /// Also cache lookups that produced no value
    #[arg(long, default_value_t = false)]
    persist_absent: bool,

    /// Fail when a response cannot be written to the cache
    #[arg(long, default_value_t = false)]
    strict_cache: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("Export failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), DeckError> {
    let api_key = args
        .api_key
        .ok_or_else(|| DeckError::Config("NOTION_API_KEY is not set".to_string()))?;
    let database_id = args
        .database_id
        .ok_or_else(|| DeckError::Config("NOTION_DATABASE_ID is not set".to_string()))?;

    let options = CacheOptions {
        on_write_failure: if args.strict_cache {
            WriteFailurePolicy::Propagate
        } else {
            WriteFailurePolicy::Log
        },
        absent: if args.persist_absent {
            AbsentPolicy::Persist
        } else {
            AbsentPolicy::Skip
        },
    };

    let client = NotionClient::new(api_key, database_id).with_base_url(args.notion_url);
    let cache = ObjectCache::new(&args.cache, options);
    log::info!("Cache directory: {}", cache.dir().display());
    let loader = Arc::new(DeckLoader::new(
        client,
        cache,
        CardSchema::default(),
        args.concurrency,
    ));

    let config = BatchConfig {
        decks_dir: args.decks,
        out_dir: args.out,
        template_path: args.template,
    };
    run_batch(&config, loader).await?;
    Ok(())
}
