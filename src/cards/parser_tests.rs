//! Tests for the card record and block parsers

use super::{parse_blocks, parse_record, ParsedCard};
use crate::cards::CardSchema;
use crate::error::DeckError;
use crate::test_fixtures::{
    block_list, english_schema, glyph_page, heading, materia_page, minion_page, paragraph,
    typed_page,
};
use serde_json::json;

#[test]
fn test_minion_label_and_size() {
    let schema = english_schema();
    let page = minion_page(&schema, "p1", "Ember Drake", &["Beast", "Dragon"], 3, 4);

    let card = parse_record(&schema, "M-001", &page, vec![]).unwrap();

    let ParsedCard::Minion(minion) = card else {
        panic!("expected a minion");
    };
    assert_eq!(minion.label, "Minion — Beast、Dragon");
    assert_eq!(minion.size, "3 / 4");
    assert_eq!(minion.name, "Ember Drake");
    assert_eq!(minion.color, "Red");
    assert_eq!(minion.cost, "2\nDiscard a card");
    assert_eq!(minion.subtypes, vec!["Beast", "Dragon"]);
    assert_eq!(minion.kind, "Minion");
}

#[test]
fn test_minion_with_production_schema() {
    let schema = CardSchema::default();
    let page = minion_page(&schema, "p1", "炎竜", &["獣", "竜"], 5, 2);

    let card = parse_record(&schema, "M-002", &page, vec!["効果".to_string()]).unwrap();

    let ParsedCard::Minion(minion) = card else {
        panic!("expected a minion");
    };
    assert_eq!(minion.label, "ミニオン ― 獣、竜");
    assert_eq!(minion.size, "5 / 2");
    assert_eq!(minion.effects, vec!["効果"]);
}

#[test]
fn test_minion_without_stats_formats_null() {
    let schema = english_schema();
    let mut page = minion_page(&schema, "p1", "Egg", &[], 0, 1);
    page["properties"]["Power"]["number"] = json!(null);

    let ParsedCard::Minion(minion) = parse_record(&schema, "M-003", &page, vec![]).unwrap() else {
        panic!("expected a minion");
    };
    assert_eq!(minion.power, None);
    assert_eq!(minion.size, "null / 1");
    assert_eq!(minion.label, "Minion — ");
}

#[test]
fn test_glyph_uses_glyph_subtypes() {
    let schema = english_schema();
    let page = glyph_page(&schema, "p2", "Ward", &["Rune", "Aura"]);

    let card = parse_record(&schema, "G-001", &page, vec!["Shield.".to_string()]).unwrap();

    let ParsedCard::Glyph(glyph) = card else {
        panic!("expected a glyph");
    };
    assert_eq!(glyph.label, "Glyph — Rune、Aura");
    assert_eq!(glyph.cost, "1");
    assert_eq!(glyph.effects, vec!["Shield."]);
}

#[test]
fn test_materia_label_uses_color() {
    let schema = english_schema();
    let page = materia_page(&schema, "p3", "Ruby", "Red");

    let card = parse_record(&schema, "X-001", &page, vec![]).unwrap();

    let ParsedCard::Materia(materia) = &card else {
        panic!("expected a materia");
    };
    assert_eq!(materia.label, "Materia — Red");
    assert_eq!(card.name(), Some("Ruby"));
}

#[test]
fn test_unknown_type_serializes_to_type_only() {
    let schema = english_schema();
    let page = typed_page(&schema, "p4", "Token");

    let card = parse_record(&schema, "T-001", &page, vec!["ignored".to_string()]).unwrap();

    assert_eq!(card, ParsedCard::Unsupported { kind: "Token".to_string() });
    assert_eq!(serde_json::to_value(&card).unwrap(), json!({ "type": "Token" }));
}

#[test]
fn test_minion_serializes_flat_with_type() {
    let schema = english_schema();
    let page = minion_page(&schema, "p1", "Ember Drake", &["Beast"], 3, 4);

    let card = parse_record(&schema, "M-001", &page, vec![]).unwrap();
    let value = serde_json::to_value(&card).unwrap();

    assert_eq!(value["type"], "Minion");
    assert_eq!(value["power"], 3);
    assert_eq!(value["size"], "3 / 4");
}

#[test]
fn test_missing_property_is_malformed() {
    let schema = english_schema();
    let mut page = minion_page(&schema, "p1", "Ember Drake", &["Beast"], 3, 4);
    page["properties"].as_object_mut().unwrap().remove("Life");

    let result = parse_record(&schema, "M-001", &page, vec![]);

    match result {
        Err(DeckError::MalformedRecord { code, reason }) => {
            assert_eq!(code, "M-001");
            assert!(reason.contains("Life"));
        }
        other => panic!("expected malformed record, got {:?}", other),
    }
}

#[test]
fn test_missing_type_is_malformed() {
    let schema = english_schema();
    let page = json!({ "id": "p5", "properties": {} });

    assert!(matches!(
        parse_record(&schema, "Z-001", &page, vec![]),
        Err(DeckError::MalformedRecord { .. })
    ));
}

#[test]
fn test_blocks_keep_paragraphs_only() {
    let blocks = block_list(vec![
        paragraph("Draw a card."),
        heading("Flavor"),
        paragraph(""),
    ]);

    let effects = parse_blocks("M-001", &blocks).unwrap();

    assert_eq!(effects, vec!["Draw a card.", ""]);
}

#[test]
fn test_blocks_concatenate_fragments() {
    let blocks = json!({
        "results": [{
            "type": "paragraph",
            "paragraph": { "rich_text": [
                { "plain_text": "Deal " },
                { "plain_text": "2" },
                { "plain_text": " damage." }
            ]}
        }]
    });

    assert_eq!(parse_blocks("M-001", &blocks).unwrap(), vec!["Deal 2 damage."]);
}

#[test]
fn test_blocks_accept_legacy_text_field() {
    let blocks = json!({
        "results": [{
            "type": "paragraph",
            "paragraph": { "text": [{ "plain_text": "Old payload." }] }
        }]
    });

    assert_eq!(parse_blocks("M-001", &blocks).unwrap(), vec!["Old payload."]);
}

#[test]
fn test_blocks_without_results_are_malformed() {
    let result = parse_blocks("M-001", &json!({ "object": "error" }));
    assert!(matches!(result, Err(DeckError::MalformedRecord { .. })));
}

#[test]
fn test_integral_float_stats_print_without_fraction() {
    let schema = english_schema();
    let mut page = minion_page(&schema, "p1", "Golem", &["Construct"], 0, 0);
    page["properties"]["Power"]["number"] = json!(3.0);
    page["properties"]["Life"]["number"] = json!(2.5);

    let ParsedCard::Minion(minion) = parse_record(&schema, "M-004", &page, vec![]).unwrap() else {
        panic!("expected a minion");
    };
    assert_eq!(minion.size, "3 / 2.5");
}
