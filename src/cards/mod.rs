//! Card records: database schema and parsers

mod parser;
mod schema;

pub use parser::{parse_blocks, parse_record, GlyphCard, MateriaCard, MinionCard, ParsedCard};
pub use schema::{CardKind, CardSchema};
