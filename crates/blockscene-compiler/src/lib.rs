//! blockscene compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! Workspace JSON → Parser → Validator → Code Generator → script text
//! ```
//!
//! The public entry points never panic on bad input: structural problems come
//! back as coded diagnostics, and an incomplete program simply generates
//! less code.

mod options;
pub mod toolbox;
mod validate;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use blockscene_codegen::{registry, CodegenError, CodegenOptions, FieldDefault, Registry};
pub use blockscene_types::{CompileErrors, Diagnostic, ErrorCode, Workspace};
pub use options::CompileOptions;
pub use validate::validate;

// ══════════════════════════════════════════════════════════════════════════════
// Compile result
// ══════════════════════════════════════════════════════════════════════════════

/// Serializable outcome of one compile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    /// The generated script; `None` when compilation failed.
    pub script: Option<String>,
    /// Lowercase hex SHA-256 of `script`.
    pub script_hash: Option<String>,
    pub errors: CompileErrors,
}

/// Errors from [`new_block_fields`].
#[derive(Debug, Error)]
pub enum DefaultsError {
    /// The workspace document did not parse.
    #[error("workspace has {} error(s)", .0.total_errors)]
    Workspace(CompileErrors),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

// ══════════════════════════════════════════════════════════════════════════════
// Pipeline
// ══════════════════════════════════════════════════════════════════════════════

/// Compile workspace JSON with default options.
///
/// Returns the script, or the collected diagnostics if the workspace has
/// errors. Warnings are dropped; use [`compile_to_result`] to keep them.
pub fn compile(json: &str) -> Result<String, CompileErrors> {
    compile_with(json, &CompileOptions::default())
}

/// Compile workspace JSON with explicit options.
pub fn compile_with(json: &str, options: &CompileOptions) -> Result<String, CompileErrors> {
    let (script, errors) = run(json, options);
    script.ok_or(errors)
}

/// Compile and package the outcome as a serializable [`CompileResult`].
pub fn compile_to_result(json: &str) -> CompileResult {
    compile_to_result_with(json, &CompileOptions::default())
}

/// [`compile_to_result`] with explicit options.
pub fn compile_to_result_with(json: &str, options: &CompileOptions) -> CompileResult {
    let (script, errors) = run(json, options);
    let script_hash = script.as_deref().map(script_hash);
    CompileResult {
        success: script.is_some(),
        script,
        script_hash,
        errors,
    }
}

/// Generate the script of an already-parsed workspace.
pub fn compile_workspace(workspace: &Workspace, options: &CompileOptions) -> String {
    blockscene_codegen::generate_with(workspace, registry(), &options.codegen)
}

/// Parse and validate without generating code.
///
/// Returns every diagnostic: parse errors, or the validator's warnings when
/// the workspace parsed.
pub fn check(json: &str) -> CompileErrors {
    let parsed = blockscene_parser::parse(json, registry());
    let mut errors = parsed.errors;
    if let Some(workspace) = parsed.workspace {
        errors.extend(validate(&workspace, registry()));
    }
    errors
}

/// Initial field values for a new `kind` block placed into the workspace
/// described by `json`.
pub fn new_block_fields(
    json: &str,
    kind: &str,
) -> Result<BTreeMap<String, FieldDefault>, DefaultsError> {
    let parsed = blockscene_parser::parse(json, registry());
    let workspace = parsed
        .workspace
        .ok_or(DefaultsError::Workspace(parsed.errors))?;
    Ok(blockscene_codegen::new_block_fields(&workspace, registry(), kind)?)
}

/// Lowercase hex SHA-256 of a script.
pub fn script_hash(script: &str) -> String {
    Sha256::digest(script.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn run(json: &str, options: &CompileOptions) -> (Option<String>, CompileErrors) {
    let parsed = blockscene_parser::parse(json, registry());
    let mut errors = parsed.errors;
    let Some(workspace) = parsed.workspace else {
        tracing::debug!(errors = errors.total_errors, "compile failed");
        return (None, errors);
    };
    if options.validate {
        errors.extend(validate(&workspace, registry()));
    }
    let script = compile_workspace(&workspace, options);
    tracing::debug!(
        bytes = script.len(),
        warnings = errors.total_warnings,
        "compile succeeded"
    );
    (Some(script), errors)
}
