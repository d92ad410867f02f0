//! Links the editor's nested JSON into a [`Workspace`] arena.

use std::collections::{BTreeMap, HashSet};

use blockscene_types::{
    Block, BlockRef, BlockShape, CompileErrors, Diagnostic, ErrorCode, FieldKind, FieldValue,
    InputSpec, ShapeCatalog, SocketTag, Variable, VariableRef, Workspace,
};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::raw::{RawBlock, RawVariable, RawWorkspace};

/// Deepest accepted nesting of blocks inside other blocks' inputs.
///
/// Linking and generation recurse once per input level, so this bounds their
/// stack use. Statement chains along `next` are walked iteratively and are
/// not limited.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Result of parsing: a workspace (if no errors) and collected diagnostics.
#[derive(Debug)]
pub struct ParseResult {
    pub workspace: Option<Workspace>,
    pub errors: CompileErrors,
}

/// Parses workspace JSON against a catalog of block shapes.
pub struct Parser<'c> {
    catalog: &'c dyn ShapeCatalog,
    workspace: Workspace,
    errors: CompileErrors,
    seen_ids: HashSet<String>,
    anonymous: u32,
}

impl<'c> Parser<'c> {
    pub fn new(catalog: &'c dyn ShapeCatalog) -> Self {
        Self {
            catalog,
            workspace: Workspace::new(),
            errors: CompileErrors::empty(),
            seen_ids: HashSet::new(),
            anonymous: 0,
        }
    }

    /// Parse a complete workspace document.
    pub fn parse(mut self, json: &str) -> ParseResult {
        let raw: RawWorkspace<'_> = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(e) => {
                self.errors.push(Diagnostic::new(
                    ErrorCode::INVALID_JSON,
                    format!("invalid workspace JSON: {e}"),
                ));
                return self.finish();
            }
        };

        self.declare_variables(raw.variables);

        if let Some(blocks) = raw.blocks {
            tracing::trace!(
                language_version = blocks.language_version,
                top_blocks = blocks.blocks.len(),
                "linking workspace"
            );
            for top in blocks.blocks {
                self.parse_top_block(top);
            }
        }

        self.finish()
    }

    fn finish(self) -> ParseResult {
        tracing::debug!(
            blocks = self.workspace.len(),
            variables = self.workspace.variables().len(),
            errors = self.errors.total_errors,
            "workspace parsed"
        );
        let workspace = if self.errors.has_errors() {
            None
        } else {
            Some(self.workspace)
        };
        ParseResult {
            workspace,
            errors: self.errors,
        }
    }

    // ── Variables ────────────────────────────────────────────────────────

    fn declare_variables(&mut self, raw: Vec<RawVariable>) {
        for var in raw {
            let tag = match var.tag.parse::<SocketTag>() {
                Ok(tag) => tag,
                Err(e) => {
                    self.errors.push(
                        Diagnostic::new(
                            ErrorCode::UNKNOWN_VARIABLE_TYPE,
                            format!("variable '{}' has {e}", var.name),
                        )
                        .with_suggestion("variables must be typed SHAPE, LIGHT, MATERIAL, COORDS, Colour or Number"),
                    );
                    continue;
                }
            };
            if self.workspace.variable(&var.id).is_some() {
                self.errors.push(Diagnostic::new(
                    ErrorCode::DUPLICATE_VARIABLE_ID,
                    format!("variable id '{}' is declared twice", var.id),
                ));
                continue;
            }
            if self.workspace.variable_by_name(&var.name).is_some() {
                self.errors.push(Diagnostic::new(
                    ErrorCode::DUPLICATE_VARIABLE_NAME,
                    format!("variable name '{}' is declared twice", var.name),
                ));
                continue;
            }
            self.workspace
                .declare_variable(Variable::new(var.id, var.name, tag));
        }
    }

    // ── Blocks ───────────────────────────────────────────────────────────

    fn parse_top_block(&mut self, raw: &RawValue) {
        let Some(raw) = self.decode(raw) else {
            return;
        };
        let Some(shape) = self.shape_of(&raw) else {
            self.report_unknown_kind(&raw);
            return;
        };
        let head = if shape.is_statement() {
            self.parse_chain(raw, None, 0)
        } else {
            self.parse_value(raw, None, 0)
        };
        if let Some(head) = head {
            self.workspace.push_top_block(head);
        }
    }

    /// Decode one block of the document, reporting malformed JSON.
    fn decode<'j>(&mut self, raw: &'j RawValue) -> Option<RawBlock<'j>> {
        match RawBlock::decode(raw) {
            Ok(block) => Some(block),
            Err(e) => {
                self.errors.push(Diagnostic::new(
                    ErrorCode::INVALID_JSON,
                    format!("invalid block JSON: {e}"),
                ));
                None
            }
        }
    }

    /// Build a statement chain iteratively and return its head.
    fn parse_chain(
        &mut self,
        head: RawBlock<'_>,
        parent: Option<BlockRef>,
        nesting: usize,
    ) -> Option<BlockRef> {
        let mut first = None;
        let mut prev: Option<BlockRef> = None;
        let mut current = Some(head);

        while let Some(raw) = current.take() {
            let next = raw.next_target();
            let Some(r) = self.parse_block(raw, true, nesting) else {
                break;
            };
            match prev {
                Some(p) => self.workspace.link_next(p, r),
                None => {
                    self.workspace.block_mut(r).parent = parent;
                    first = Some(r);
                }
            }
            prev = Some(r);
            current = next.and_then(|next| self.decode(next));
        }
        first
    }

    fn parse_value(
        &mut self,
        raw: RawBlock<'_>,
        parent: Option<BlockRef>,
        nesting: usize,
    ) -> Option<BlockRef> {
        // A statement block here is reported by parse_block as misplaced.
        let is_expression = self.shape_of(&raw).is_some_and(|s| !s.is_statement());
        if is_expression && raw.next_target().is_some() {
            self.errors.push(
                Diagnostic::new(
                    ErrorCode::CONNECTION_KIND_MISMATCH,
                    format!("expression block '{}' cannot have a next block", raw.kind),
                )
                .at_block(raw.id.clone().unwrap_or_default()),
            );
            return None;
        }
        let r = self.parse_block(raw, false, nesting)?;
        self.workspace.block_mut(r).parent = parent;
        Some(r)
    }

    /// Build one block and its inputs. `statement` is the linkage the
    /// position requires; `nesting` counts the enclosing inputs.
    fn parse_block(
        &mut self,
        raw: RawBlock<'_>,
        statement: bool,
        nesting: usize,
    ) -> Option<BlockRef> {
        let Some(shape) = self.shape_of(&raw) else {
            self.report_unknown_kind(&raw);
            return None;
        };
        let id = self.claim_id(raw.id.as_deref())?;

        if nesting > MAX_NESTING_DEPTH {
            self.errors.push(
                Diagnostic::new(
                    ErrorCode::NESTING_TOO_DEEP,
                    format!("block is nested {nesting} inputs deep (limit {MAX_NESTING_DEPTH})"),
                )
                .at_block(id)
                .with_suggestion("move deeply nested blocks into separate top-level scripts"),
            );
            return None;
        }

        if shape.is_statement() != statement {
            let expected = if statement { "a statement" } else { "an expression" };
            self.errors.push(
                Diagnostic::new(
                    ErrorCode::CONNECTION_KIND_MISMATCH,
                    format!("'{}' is not {expected} block", shape.kind),
                )
                .at_block(id),
            );
            return None;
        }

        let mut block = match shape.output {
            Some(tag) => Block::expression(id, shape.kind, tag),
            None => Block::statement(id, shape.kind),
        };
        block.enabled = raw.enabled;
        block.fields = type_fields(&shape, raw.fields, &block.id);
        for input in shape.inputs() {
            match input {
                InputSpec::Value { name, .. } => {
                    block.value_inputs.insert((*name).to_string(), None);
                }
                InputSpec::Statement { name } => {
                    block.statement_inputs.insert((*name).to_string(), None);
                }
            }
        }

        let block_id = block.id.clone();
        let r = self.workspace.insert(block);

        for (name, conn) in raw.inputs {
            let Some(spec) = shape.input(&name).copied() else {
                self.errors.push(
                    Diagnostic::new(
                        ErrorCode::UNKNOWN_INPUT,
                        format!("'{}' has no input named '{name}'", shape.kind),
                    )
                    .at_block(block_id.clone()),
                );
                continue;
            };
            let Some(child) = conn.target().and_then(|child| self.decode(child)) else {
                continue;
            };
            match spec {
                InputSpec::Value { .. } => {
                    let child = self.parse_value(child, Some(r), nesting + 1);
                    self.workspace.block_mut(r).value_inputs.insert(name, child);
                }
                InputSpec::Statement { .. } => {
                    let child = self.parse_chain(child, Some(r), nesting + 1);
                    self.workspace
                        .block_mut(r)
                        .statement_inputs
                        .insert(name, child);
                }
            }
        }
        Some(r)
    }

    fn shape_of(&self, raw: &RawBlock<'_>) -> Option<BlockShape> {
        self.catalog.shape(&raw.kind).copied()
    }

    fn report_unknown_kind(&mut self, raw: &RawBlock<'_>) {
        let mut d = Diagnostic::new(
            ErrorCode::UNKNOWN_BLOCK_KIND,
            format!("unknown block kind '{}'", raw.kind),
        );
        if let Some(id) = &raw.id {
            d = d.at_block(id.clone());
        }
        self.errors.push(d);
    }

    /// Register a block id, synthesizing one for blocks serialized without.
    fn claim_id(&mut self, id: Option<&str>) -> Option<String> {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                self.anonymous += 1;
                format!("__block{}", self.anonymous)
            }
        };
        if !self.seen_ids.insert(id.clone()) {
            self.errors.push(
                Diagnostic::new(
                    ErrorCode::DUPLICATE_BLOCK_ID,
                    format!("block id '{id}' is used more than once"),
                )
                .at_block(id),
            );
            return None;
        }
        Some(id)
    }
}

/// Convert raw JSON field values to typed values using the shape's field
/// kinds. Fields the shape does not declare, and values of the wrong JSON
/// type, are dropped so the block falls back to its defaults.
fn type_fields(
    shape: &BlockShape,
    raw: BTreeMap<String, Value>,
    block_id: &str,
) -> BTreeMap<String, FieldValue> {
    let mut fields = BTreeMap::new();
    for (name, value) in raw {
        let Some(spec) = shape.field(&name) else {
            tracing::trace!(block = block_id, field = %name, "ignoring undeclared field");
            continue;
        };
        match type_field(&spec.kind, value) {
            Some(typed) => {
                fields.insert(name, typed);
            }
            None => {
                tracing::warn!(block = block_id, field = %name, "dropping field with unexpected value");
            }
        }
    }
    fields
}

fn type_field(kind: &FieldKind, value: Value) -> Option<FieldValue> {
    match (kind, value) {
        (FieldKind::Variable { .. }, Value::Object(mut obj)) => match obj.remove("id") {
            Some(Value::String(id)) => Some(FieldValue::Variable(VariableRef::new(id))),
            _ => None,
        },
        (FieldKind::Variable { .. }, Value::String(id)) => {
            Some(FieldValue::Variable(VariableRef::new(id)))
        }
        (FieldKind::Number { .. }, Value::Number(n)) => n.as_f64().map(FieldValue::Number),
        (FieldKind::Number { .. }, Value::String(s)) => {
            s.trim().parse::<f64>().ok().map(FieldValue::Number)
        }
        (FieldKind::Text { .. }, Value::String(s)) => Some(FieldValue::Text(s)),
        (FieldKind::Text { .. }, Value::Number(n)) => Some(FieldValue::Text(n.to_string())),
        (FieldKind::Colour { .. }, Value::String(s)) => Some(FieldValue::Colour(s)),
        (FieldKind::Checkbox { .. }, Value::Bool(b)) => Some(FieldValue::Checkbox(b)),
        (FieldKind::Checkbox { .. }, Value::String(s)) => match s.as_str() {
            "TRUE" | "true" => Some(FieldValue::Checkbox(true)),
            "FALSE" | "false" => Some(FieldValue::Checkbox(false)),
            _ => None,
        },
        (FieldKind::Dropdown { .. }, Value::String(s)) => Some(FieldValue::Dropdown(s)),
        _ => None,
    }
}
