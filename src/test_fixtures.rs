//! Notion-shaped JSON builders shared by unit tests

use crate::cards::CardSchema;
use serde_json::{json, Value};

/// Schema with English column names and labels
pub fn english_schema() -> CardSchema {
    CardSchema {
        code_property: "Code".to_string(),
        kind_property: "Type".to_string(),
        name_property: "Name".to_string(),
        color_property: "Color".to_string(),
        cost_property: "Cost".to_string(),
        minion_subtypes_property: "Minion Subtypes".to_string(),
        glyph_subtypes_property: "Glyph Subtypes".to_string(),
        power_property: "Power".to_string(),
        life_property: "Life".to_string(),
        minion_label: "Minion".to_string(),
        glyph_label: "Glyph".to_string(),
        materia_label: "Materia".to_string(),
        label_separator: " — ".to_string(),
        subtype_separator: "、".to_string(),
    }
}

fn fragments(parts: &[&str]) -> Value {
    Value::Array(parts.iter().map(|p| json!({ "plain_text": p })).collect())
}

fn options(names: &[&str]) -> Value {
    Value::Array(names.iter().map(|n| json!({ "name": n })).collect())
}

/// Page properties shared by every card type
fn base_properties(schema: &CardSchema, kind: &str, name: &str, color: &str) -> serde_json::Map<String, Value> {
    let mut props = serde_json::Map::new();
    props.insert(schema.kind_property.clone(), json!({ "select": { "name": kind } }));
    props.insert(schema.name_property.clone(), json!({ "title": fragments(&[name]) }));
    props.insert(schema.color_property.clone(), json!({ "select": { "name": color } }));
    props
}

fn page(id: &str, props: serde_json::Map<String, Value>) -> Value {
    json!({ "object": "page", "id": id, "properties": props })
}

pub fn minion_page(
    schema: &CardSchema,
    id: &str,
    name: &str,
    subtypes: &[&str],
    power: i64,
    life: i64,
) -> Value {
    let mut props = base_properties(schema, &schema.minion_label, name, "Red");
    props.insert(schema.cost_property.clone(), json!({ "rich_text": fragments(&["2", "Discard a card"]) }));
    props.insert(schema.minion_subtypes_property.clone(), json!({ "multi_select": options(subtypes) }));
    props.insert(schema.power_property.clone(), json!({ "number": power }));
    props.insert(schema.life_property.clone(), json!({ "number": life }));
    page(id, props)
}

pub fn glyph_page(schema: &CardSchema, id: &str, name: &str, subtypes: &[&str]) -> Value {
    let mut props = base_properties(schema, &schema.glyph_label, name, "Blue");
    props.insert(schema.cost_property.clone(), json!({ "rich_text": fragments(&["1"]) }));
    props.insert(schema.glyph_subtypes_property.clone(), json!({ "multi_select": options(subtypes) }));
    page(id, props)
}

pub fn materia_page(schema: &CardSchema, id: &str, name: &str, color: &str) -> Value {
    page(id, base_properties(schema, &schema.materia_label, name, color))
}

pub fn typed_page(schema: &CardSchema, id: &str, kind: &str) -> Value {
    let mut props = serde_json::Map::new();
    props.insert(schema.kind_property.clone(), json!({ "select": { "name": kind } }));
    page(id, props)
}

/// Database query response
pub fn query_response(pages: Vec<Value>) -> Value {
    json!({ "object": "list", "results": pages, "has_more": false, "next_cursor": null })
}

pub fn paragraph(text: &str) -> Value {
    let parts: Vec<&str> = if text.is_empty() { vec![] } else { vec![text] };
    json!({ "type": "paragraph", "paragraph": { "rich_text": fragments(&parts) } })
}

pub fn heading(text: &str) -> Value {
    json!({ "type": "heading_1", "heading_1": { "rich_text": fragments(&[text]) } })
}

pub fn block_list(blocks: Vec<Value>) -> Value {
    json!({ "object": "list", "results": blocks, "has_more": false, "next_cursor": null })
}
