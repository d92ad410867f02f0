//! Socket and variable checks over a parsed workspace.
//!
//! Generation trusts the editor to have enforced socket compatibility. This
//! pass re-checks the snapshot and reports what it finds as warnings:
//!
//! - W300: a connected block's output tag is not accepted by the input
//! - W301: a variable field names no declared variable
//! - W302: a variable field names a variable of the wrong tag

use blockscene_codegen::Registry;
use blockscene_types::{
    CompileErrors, Diagnostic, ErrorCode, FieldKind, FieldValue, ShapeCatalog, Workspace,
};

/// Check every block of `workspace` against its registered shape.
pub fn validate(workspace: &Workspace, registry: &Registry) -> CompileErrors {
    let mut errors = CompileErrors::empty();

    for (_, block) in workspace.blocks() {
        let Some(shape) = registry.shape(&block.kind) else {
            continue;
        };

        for (input, child) in &block.value_inputs {
            let Some(child) = child else {
                continue;
            };
            let (Some(accepted), Some(tag)) =
                (shape.accepted_tags(input), workspace.block(*child).output())
            else {
                continue;
            };
            if !accepted.accepts(tag) {
                errors.push(
                    Diagnostic::new(
                        ErrorCode::TAG_NOT_ACCEPTED,
                        format!(
                            "input '{input}' of '{}' does not accept {tag}",
                            block.kind
                        ),
                    )
                    .at_block(block.id.clone()),
                );
            }
        }

        for (name, value) in &block.fields {
            let FieldValue::Variable(var) = value else {
                continue;
            };
            let Some(FieldKind::Variable { tag, .. }) = shape.field(name).map(|f| f.kind) else {
                continue;
            };
            match workspace.variable(&var.id) {
                None => errors.push(
                    Diagnostic::new(
                        ErrorCode::UNDECLARED_VARIABLE,
                        format!("field '{name}' refers to undeclared variable '{}'", var.id),
                    )
                    .at_block(block.id.clone()),
                ),
                Some(declared) if declared.tag != tag => errors.push(
                    Diagnostic::new(
                        ErrorCode::VARIABLE_TAG_MISMATCH,
                        format!(
                            "field '{name}' expects a {tag} variable, '{}' is {}",
                            declared.name, declared.tag
                        ),
                    )
                    .at_block(block.id.clone())
                    .with_suggestion(format!("pick a {tag} variable")),
                ),
                Some(_) => {}
            }
        }
    }

    tracing::debug!(warnings = errors.total_warnings, "workspace validated");
    errors
}
