//! blockscene parser: converts the editor's workspace JSON into a block graph.
//!
//! The editor serializes each top-level chain as nested objects: value and
//! statement inputs under `inputs`, the following statement under `next`.
//! The parser flattens that tree into a [`blockscene_types::Workspace`] arena,
//! using a [`blockscene_types::ShapeCatalog`] to tell value inputs from
//! statement inputs and to type field values.

mod parser;
mod raw;

pub use parser::{ParseResult, Parser, MAX_NESTING_DEPTH};

use blockscene_types::ShapeCatalog;

/// Parse a workspace document against `catalog`.
pub fn parse(json: &str, catalog: &dyn ShapeCatalog) -> ParseResult {
    Parser::new(catalog).parse(json)
}
