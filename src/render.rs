//! HTML rendering of loaded decks through a mustache template

use crate::deck::Deck;
use crate::error::{DeckError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Render a deck with an already loaded template.
///
/// Each card gets two flags for the template to branch on: `found` is false
/// for codes missing from the database and `supported` is false for card
/// types without a layout.
pub fn render_html(template: &str, deck: &Deck) -> Result<String> {
    let compiled = mustache::compile_str(template)?;
    let mut data = serde_json::to_value(deck)?;
    if let Some(cards) = data.get_mut("cards").and_then(Value::as_array_mut) {
        cards.iter_mut().filter_map(Value::as_object_mut).for_each(flag_card);
    }
    Ok(compiled.render_to_string(&data)?)
}

/// Mark whether a card was found and whether its type has a layout
fn flag_card(card: &mut Map<String, Value>) {
    let found = card.contains_key("type");
    let supported = card.contains_key("label");
    card.insert("found".to_string(), Value::Bool(found));
    card.insert("supported".to_string(), Value::Bool(supported));
}

/// Render a deck to `{out_dir}/{deck name}.html`, replacing any previous file.
///
/// The template is read from disk on every call.
pub async fn render_deck(template_path: &Path, out_dir: &Path, deck: &Deck) -> Result<PathBuf> {
    let template = tokio::fs::read_to_string(template_path)
        .await
        .map_err(|e| DeckError::io(template_path, e))?;

    let html = render_html(&template, deck)?;

    let out_path = out_dir.join(format!("{}.html", deck.name));
    tokio::fs::write(&out_path, html)
        .await
        .map_err(|e| DeckError::io(&out_path, e))?;

    log::info!("Wrote {} ({} cards)", out_path.display(), deck.cards.len());
    Ok(out_path)
}
