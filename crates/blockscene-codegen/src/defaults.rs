//! Field values for a block about to be placed in the editor.
//!
//! Literal fields take their shape default. Variable pickers are
//! pre-populated with the first declared variable of their tag; fields that
//! create a variable propose the next free `prefix_N` name.

use std::collections::BTreeMap;

use serde::Serialize;

use blockscene_types::{FieldKind, FieldValue, SocketTag, VariableDefault, Workspace};

use crate::blocks::Registry;
use crate::error::{CodegenError, CodegenResult};
use crate::namespace::Namespace;

/// The initial value of one field of a new block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "default", rename_all = "snake_case")]
pub enum FieldDefault {
    /// A literal field value.
    Literal { value: FieldValue },
    /// Select this declared variable.
    Existing { id: String, name: String },
    /// Create a variable with this name and tag.
    Create { name: String, tag: SocketTag },
}

/// Defaults for every field of a new `kind` block in `workspace`, keyed by
/// field name.
pub fn new_block_fields(
    workspace: &Workspace,
    registry: &Registry,
    kind: &str,
) -> CodegenResult<BTreeMap<String, FieldDefault>> {
    let def = registry
        .get(kind)
        .ok_or_else(|| CodegenError::UnknownBlockKind(kind.to_string()))?;
    let namespace = Namespace::new(workspace, "");

    let mut out = BTreeMap::new();
    for field in def.shape.fields() {
        let default = match field.kind {
            FieldKind::Variable { tag, default } => match default {
                VariableDefault::FirstOfType { fallback } => {
                    match namespace.first_variable_of_type(tag) {
                        Some(var) => FieldDefault::Existing {
                            id: var.id.clone(),
                            name: var.name.clone(),
                        },
                        None => FieldDefault::Create {
                            name: fallback.to_string(),
                            tag,
                        },
                    }
                }
                VariableDefault::Fresh { prefix } => FieldDefault::Create {
                    name: namespace.unique_name_with_prefix(prefix),
                    tag,
                },
            },
            kind => match kind.default_value() {
                Some(value) => FieldDefault::Literal { value },
                None => continue,
            },
        };
        out.insert(field.name.to_string(), default);
    }
    Ok(out)
}
