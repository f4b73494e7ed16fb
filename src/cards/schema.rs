//! Property names and labels of the card database

/// Card type selected by the discriminant property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Minion,
    Glyph,
    Materia,
}

/// Describes how cards are laid out in the content database.
///
/// `Default` is the production database, whose columns are named in Japanese.
#[derive(Debug, Clone)]
pub struct CardSchema {
    /// Text property holding the business code used in deck files
    pub code_property: String,
    /// Select property holding the card type
    pub kind_property: String,
    pub name_property: String,
    pub color_property: String,
    pub cost_property: String,
    pub minion_subtypes_property: String,
    pub glyph_subtypes_property: String,
    pub power_property: String,
    pub life_property: String,
    pub minion_label: String,
    pub glyph_label: String,
    pub materia_label: String,
    /// Placed between the type name and the rest of the label
    pub label_separator: String,
    /// Placed between subtypes inside a label
    pub subtype_separator: String,
}

impl Default for CardSchema {
    fn default() -> Self {
        Self {
            code_property: "開発コード".to_string(),
            kind_property: "種別".to_string(),
            name_property: "名前".to_string(),
            color_property: "色".to_string(),
            cost_property: "コスト".to_string(),
            minion_subtypes_property: "分類（ミニオン）".to_string(),
            glyph_subtypes_property: "分類（グリフ）".to_string(),
            power_property: "攻撃".to_string(),
            life_property: "生命".to_string(),
            minion_label: "ミニオン".to_string(),
            glyph_label: "グリフ".to_string(),
            materia_label: "マテリア".to_string(),
            label_separator: " ― ".to_string(),
            subtype_separator: "、".to_string(),
        }
    }
}

impl CardSchema {
    /// Map a discriminant value to a known card type
    pub fn kind_of(&self, discriminant: &str) -> Option<CardKind> {
        if discriminant == self.minion_label {
            Some(CardKind::Minion)
        } else if discriminant == self.glyph_label {
            Some(CardKind::Glyph)
        } else if discriminant == self.materia_label {
            Some(CardKind::Materia)
        } else {
            None
        }
    }

    /// Build a display label like "ミニオン ― 獣、竜"
    pub fn label(&self, head: &str, tail: &str) -> String {
        format!("{}{}{}", head, self.label_separator, tail)
    }
}
