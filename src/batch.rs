//! Batch export: every deck file in a directory becomes one HTML page

use crate::deck::DeckLoader;
use crate::error::{DeckError, Result};
use crate::render::render_deck;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Where decks come from and where pages go
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub decks_dir: PathBuf,
    pub out_dir: PathBuf,
    pub template_path: PathBuf,
}

/// Outcome of a successful batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Written HTML files, sorted by path
    pub written: Vec<PathBuf>,
}

/// List every entry of the deck directory, sorted by name.
///
/// Nothing is filtered out: a stray file that is not a deck fails the batch.
pub async fn list_decks(decks_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(decks_dir)
        .await
        .map_err(|e| DeckError::io(decks_dir, e))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DeckError::io(decks_dir, e))?
    {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Load and render every deck concurrently.
///
/// The first failing deck aborts the whole batch; pages already written by
/// other decks are left in place.
pub async fn run_batch(config: &BatchConfig, loader: Arc<DeckLoader>) -> Result<BatchReport> {
    let decks = list_decks(&config.decks_dir).await?;
    log::info!(
        "Exporting {} deck(s) from {}",
        decks.len(),
        config.decks_dir.display()
    );

    tokio::fs::create_dir_all(&config.out_dir)
        .await
        .map_err(|e| DeckError::io(&config.out_dir, e))?;

    let mut tasks = JoinSet::new();
    for deck_path in decks {
        let loader = Arc::clone(&loader);
        let template_path = config.template_path.clone();
        let out_dir = config.out_dir.clone();
        tasks.spawn(async move {
            let deck = loader.load_deck(&deck_path).await?;
            render_deck(&template_path, &out_dir, &deck).await
        });
    }

    let mut report = BatchReport::default();
    while let Some(joined) = tasks.join_next().await {
        report.written.push(joined??);
    }
    report.written.sort();

    log::info!("Exported {} deck(s)", report.written.len());
    Ok(report)
}
