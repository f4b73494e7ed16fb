//! Turns raw Notion pages and block lists into typed cards

use super::schema::{CardKind, CardSchema};
use crate::error::{DeckError, Result};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Minion card: a creature with power and life
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinionCard {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub name: String,
    pub cost: String,
    pub subtypes: Vec<String>,
    pub power: Option<Number>,
    pub life: Option<Number>,
    pub label: String,
    /// "{power} / {life}"
    pub size: String,
    pub effects: Vec<String>,
}

/// Glyph card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphCard {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub name: String,
    pub cost: String,
    pub subtypes: Vec<String>,
    pub label: String,
    pub effects: Vec<String>,
}

/// Materia card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MateriaCard {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub name: String,
    pub label: String,
    pub effects: Vec<String>,
}

/// A card resolved from the database.
///
/// Serialized without a tag: every variant already carries its `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedCard {
    Minion(MinionCard),
    Glyph(GlyphCard),
    Materia(MateriaCard),
    /// Type we don't know how to lay out; only the type is kept
    Unsupported {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl ParsedCard {
    pub fn name(&self) -> Option<&str> {
        match self {
            ParsedCard::Minion(card) => Some(&card.name),
            ParsedCard::Glyph(card) => Some(&card.name),
            ParsedCard::Materia(card) => Some(&card.name),
            ParsedCard::Unsupported { .. } => None,
        }
    }
}

/// Read-only accessors over the `properties` of one database page
struct Record<'a> {
    code: &'a str,
    properties: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    fn new(code: &'a str, page: &'a Value) -> Result<Self> {
        let properties = page
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| malformed(code, "record has no properties"))?;
        Ok(Self { code, properties })
    }

    fn field(&self, property: &str, field: &str) -> Result<&'a Value> {
        self.properties
            .get(property)
            .ok_or_else(|| malformed(self.code, format!("missing property {}", property)))?
            .get(field)
            .ok_or_else(|| malformed(self.code, format!("property {} has no {}", property, field)))
    }

    fn fragments(&self, property: &str, field: &str) -> Result<Vec<String>> {
        plain_texts(self.field(property, field)?)
            .ok_or_else(|| malformed(self.code, format!("property {} is not text", property)))
    }

    fn title(&self, property: &str) -> Result<String> {
        Ok(self.fragments(property, "title")?.concat())
    }

    fn rich_text(&self, property: &str) -> Result<String> {
        Ok(self.fragments(property, "rich_text")?.join("\n"))
    }

    fn select(&self, property: &str) -> Result<String> {
        self.field(property, "select")?
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| malformed(self.code, format!("property {} has no selection", property)))
    }

    fn multi_select(&self, property: &str) -> Result<Vec<String>> {
        self.field(property, "multi_select")?
            .as_array()
            .and_then(|options| {
                options
                    .iter()
                    .map(|o| o.get("name").and_then(Value::as_str).map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| malformed(self.code, format!("property {} is not a multi-select", property)))
    }

    fn number(&self, property: &str) -> Result<Option<Number>> {
        match self.field(property, "number")? {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(Some(n.clone())),
            _ => Err(malformed(self.code, format!("property {} is not a number", property))),
        }
    }
}

fn malformed(code: &str, reason: impl Into<String>) -> DeckError {
    DeckError::MalformedRecord {
        code: code.to_string(),
        reason: reason.into(),
    }
}

/// Collect `plain_text` of every fragment in a rich text array
fn plain_texts(fragments: &Value) -> Option<Vec<String>> {
    fragments
        .as_array()?
        .iter()
        .map(|f| f.get("plain_text").and_then(Value::as_str).map(str::to_string))
        .collect()
}

/// Integral floats print without a fraction, so `3.0` reads as `3`
fn format_stat(stat: &Option<Number>) -> String {
    match stat {
        Some(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        Some(n) => n.to_string(),
        None => "null".to_string(),
    }
}

/// Parse one database page into a card, dispatching on its type property.
///
/// `effects` come from the page's blocks (see [`parse_blocks`]). Pages of an
/// unknown type yield [`ParsedCard::Unsupported`].
pub fn parse_record(
    schema: &CardSchema,
    code: &str,
    page: &Value,
    effects: Vec<String>,
) -> Result<ParsedCard> {
    let record = Record::new(code, page)?;
    let kind = record.select(&schema.kind_property)?;

    let card = match schema.kind_of(&kind) {
        Some(CardKind::Minion) => ParsedCard::Minion(parse_minion(schema, &record, kind, effects)?),
        Some(CardKind::Glyph) => ParsedCard::Glyph(parse_glyph(schema, &record, kind, effects)?),
        Some(CardKind::Materia) => {
            ParsedCard::Materia(parse_materia(schema, &record, kind, effects)?)
        }
        None => {
            log::debug!("Card {} has unsupported type {}", code, kind);
            ParsedCard::Unsupported { kind }
        }
    };
    Ok(card)
}

fn parse_minion(
    schema: &CardSchema,
    record: &Record<'_>,
    kind: String,
    effects: Vec<String>,
) -> Result<MinionCard> {
    let subtypes = record.multi_select(&schema.minion_subtypes_property)?;
    let power = record.number(&schema.power_property)?;
    let life = record.number(&schema.life_property)?;
    let label = schema.label(&schema.minion_label, &subtypes.join(&schema.subtype_separator));
    let size = format!("{} / {}", format_stat(&power), format_stat(&life));

    Ok(MinionCard {
        color: record.select(&schema.color_property)?,
        name: record.title(&schema.name_property)?,
        cost: record.rich_text(&schema.cost_property)?,
        kind,
        subtypes,
        power,
        life,
        label,
        size,
        effects,
    })
}

fn parse_glyph(
    schema: &CardSchema,
    record: &Record<'_>,
    kind: String,
    effects: Vec<String>,
) -> Result<GlyphCard> {
    let subtypes = record.multi_select(&schema.glyph_subtypes_property)?;
    let label = schema.label(&schema.glyph_label, &subtypes.join(&schema.subtype_separator));

    Ok(GlyphCard {
        color: record.select(&schema.color_property)?,
        name: record.title(&schema.name_property)?,
        cost: record.rich_text(&schema.cost_property)?,
        kind,
        subtypes,
        label,
        effects,
    })
}

fn parse_materia(
    schema: &CardSchema,
    record: &Record<'_>,
    kind: String,
    effects: Vec<String>,
) -> Result<MateriaCard> {
    let color = record.select(&schema.color_property)?;
    let label = schema.label(&schema.materia_label, &color);

    Ok(MateriaCard {
        name: record.title(&schema.name_property)?,
        kind,
        color,
        label,
        effects,
    })
}

/// Extract card effects from a block list: one entry per paragraph block.
///
/// Other block kinds are logged and skipped. Paragraph text is read from
/// `rich_text`, falling back to the older `text` field still found in
/// responses cached before the API rename.
pub fn parse_blocks(code: &str, blocks: &Value) -> Result<Vec<String>> {
    let results = blocks
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(code, "block list has no results"))?;

    let mut effects = Vec::new();
    for block in results {
        let kind = block.get("type").and_then(Value::as_str).unwrap_or_default();
        if kind != "paragraph" {
            log::info!("Skipping {} block on card {}: {}", kind, code, block);
            continue;
        }

        let fragments = block
            .get("paragraph")
            .and_then(|p| p.get("rich_text").or_else(|| p.get("text")))
            .and_then(plain_texts)
            .ok_or_else(|| malformed(code, "paragraph block has no text"))?;
        effects.push(fragments.concat());
    }
    Ok(effects)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
