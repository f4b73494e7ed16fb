//! Deck definition loading
//!
//! A deck file is a JSON object with a `cards` map of business code to copy
//! count. Any other top-level fields are passed through to the template.

use crate::cards::{parse_blocks, parse_record, CardSchema, ParsedCard};
use crate::error::{DeckError, Result};
use crate::notion::NotionClient;
use crate::object_cache::ObjectCache;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Largest copy count accepted for a single card
pub const MAX_COPIES: u32 = 999;

/// One line of a deck file: a card code and how many copies to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub code: String,
    pub count: u32,
}

/// A single printed copy of a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardInstance {
    /// Card data; `None` when the code is not in the database
    #[serde(flatten)]
    pub card: Option<ParsedCard>,
    pub code: String,
}

/// A loaded deck, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    /// Pass-through fields from the deck file
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
    /// File name of the deck definition, extension included
    pub name: String,
    pub cards: Vec<CardInstance>,
}

/// Split a parsed deck file into pass-through metadata and card entries.
///
/// Entry order follows the file and counts must be integers in
/// `0..=MAX_COPIES`. `name` is dropped from the metadata since the deck is
/// named after its file.
pub fn parse_deck_file(path: &Path, file: Value) -> Result<(Map<String, Value>, Vec<DeckEntry>)> {
    let format_error = |reason: String| DeckError::DeckFormat {
        path: path.to_path_buf(),
        reason,
    };

    let Value::Object(file) = file else {
        return Err(format_error("top level is not an object".to_string()));
    };

    let mut cards = None;
    let mut metadata = Map::new();
    for (key, value) in file {
        match key.as_str() {
            "cards" => cards = Some(value),
            "name" => {}
            _ => {
                metadata.insert(key, value);
            }
        }
    }

    let cards = match cards {
        Some(Value::Object(cards)) => cards,
        Some(_) => return Err(format_error("`cards` is not an object".to_string())),
        None => return Err(format_error("missing `cards`".to_string())),
    };

    let entries = cards
        .into_iter()
        .map(|(code, count)| {
            let count = count
                .as_u64()
                .filter(|c| *c <= u64::from(MAX_COPIES))
                .and_then(|c| u32::try_from(c).ok())
                .ok_or_else(|| format_error(format!("invalid count {} for card {}", count, code)))?;
            Ok(DeckEntry { code, count })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((metadata, entries))
}

/// Repeat each resolved card `count` times, keeping file order
pub fn expand(entries: &[DeckEntry], resolved: Vec<Option<ParsedCard>>) -> Vec<CardInstance> {
    entries
        .iter()
        .zip(resolved)
        .flat_map(|(entry, card)| {
            (0..entry.count).map(move |_| CardInstance {
                card: card.clone(),
                code: entry.code.clone(),
            })
        })
        .collect()
}

/// Resolves card codes through the cache and the Notion database
pub struct DeckLoader {
    client: NotionClient,
    cache: ObjectCache,
    schema: CardSchema,
    permits: Semaphore,
}

impl DeckLoader {
    /// `concurrency` caps simultaneous card lookups across all decks
    pub fn new(client: NotionClient, cache: ObjectCache, schema: CardSchema, concurrency: usize) -> Self {
        Self {
            client,
            cache,
            schema,
            permits: Semaphore::new(concurrency.max(1)),
        }
    }

    /// Look up one card by business code.
    ///
    /// Returns `Ok(None)` when the database has no page for the code.
    pub async fn resolve(&self, code: &str) -> Result<Option<ParsedCard>> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DeckError::Config("card lookups were shut down".to_string()))?;

        let response: Value = self
            .cache
            .get_or_compute(&format!("loadData.{}", code), || {
                self.client.query_by_code(&self.schema.code_property, code)
            })
            .await?;

        let results = response
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| DeckError::MalformedRecord {
                code: code.to_string(),
                reason: "query response has no results".to_string(),
            })?;

        let Some(page) = results.first() else {
            log::warn!("No card found for code {}", code);
            return Ok(None);
        };

        let page_id = page
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| DeckError::MalformedRecord {
                code: code.to_string(),
                reason: "page has no id".to_string(),
            })?;

        let blocks: Value = self
            .cache
            .get_or_compute(&format!("loadData.blocks.{}", code), || {
                self.client.list_children(page_id)
            })
            .await?;

        let effects = parse_blocks(code, &blocks)?;
        parse_record(&self.schema, code, page, effects).map(Some)
    }

    /// Load a deck file and resolve all of its cards.
    ///
    /// Codes are resolved concurrently; the first failure cancels the rest.
    pub async fn load_deck(self: &Arc<Self>, path: &Path) -> Result<Deck> {
        let body = tokio::fs::read(path)
            .await
            .map_err(|e| DeckError::io(path, e))?;
        let (metadata, entries) = parse_deck_file(path, serde_json::from_slice(&body)?)?;

        log::info!("Loading deck {} ({} distinct cards)", path.display(), entries.len());

        let mut tasks = JoinSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let loader = Arc::clone(self);
            let code = entry.code.clone();
            tasks.spawn(async move { (index, loader.resolve(&code).await) });
        }

        let mut resolved = vec![None; entries.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, card) = joined?;
            resolved[index] = card?;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Deck {
            metadata,
            name,
            cards: expand(&entries, resolved),
        })
    }
}

#[cfg(test)]
#[path = "deck_tests.rs"]
mod tests;
