//! Deck Render - printable deck sheets from a Notion card database
//!
//! Reads deck definitions (card code → copies), resolves each card through a
//! file cache in front of the Notion API, and renders one HTML page per deck.

pub mod batch;
pub mod cards;
pub mod deck;
pub mod error;
pub mod notion;
pub mod object_cache;
pub mod render;

#[cfg(test)]
mod test_fixtures;

pub use batch::{list_decks, run_batch, BatchConfig, BatchReport};
pub use cards::{CardSchema, ParsedCard};
pub use deck::{CardInstance, Deck, DeckEntry, DeckLoader};
pub use error::{DeckError, Result};
pub use notion::NotionClient;
pub use object_cache::{AbsentPolicy, CacheOptions, ObjectCache, WriteFailurePolicy};
pub use render::{render_deck, render_html};
