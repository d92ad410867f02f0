//! blockscene compiler as a WASM module for the block editor.
//!
//! This crate exposes the compilation pipeline via `wasm-bindgen`, suitable
//! for running next to the editor in a browser.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compile, toolbox } from 'blockscene-wasm';
//!
//! await init();
//!
//! const workspace = Blockly.serialization.workspaces.save(ws);
//! const result = JSON.parse(compile(JSON.stringify(workspace)));
//! // { success: true, script: "threeD.setSkyColor(...);", script_hash: "…", errors: { ... } }
//! ```

use blockscene_compiler::{registry, toolbox as tb, CompileOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Serialize a result, falling back to a hand-written failure document.
fn to_json<T: Serialize>(value: &T, fallback: impl FnOnce(serde_json::Error) -> String) -> String {
    serde_json::to_string(value).unwrap_or_else(fallback)
}

fn failed_compile(e: serde_json::Error) -> String {
    format!(
        r#"{{"success":false,"script":null,"script_hash":null,"errors":{{"errors":[{{"message":"Serialization error: {}"}}],"warnings":[],"total_errors":1,"total_warnings":0}}}}"#,
        e
    )
}

/// Compile a serialized workspace.
///
/// Returns a JSON string containing a `CompileResult`:
/// ```json
/// {
///   "success": true,
///   "script": "threeD.moveCamera([0,5,10]);",
///   "script_hash": "…",
///   "errors": { "errors": [], "warnings": [], "total_errors": 0, "total_warnings": 0 }
/// }
/// ```
///
/// On failure, `success` is `false`, `script` is `null`, and `errors` holds
/// structured diagnostics.
#[wasm_bindgen]
pub fn compile(workspace_json: &str) -> String {
    let result = blockscene_compiler::compile_to_result(workspace_json);
    to_json(&result, failed_compile)
}

/// Compile with options given as a JS object, e.g.
/// `{ runtime_namespace: "scene", check_sockets: true }`. Missing keys keep
/// their defaults; `undefined` or `null` means all defaults.
#[wasm_bindgen]
pub fn compile_with_options(workspace_json: &str, options: JsValue) -> Result<String, JsError> {
    let options: CompileOptions = if options.is_undefined() || options.is_null() {
        CompileOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    let result = blockscene_compiler::compile_to_result_with(workspace_json, &options);
    Ok(to_json(&result, failed_compile))
}

/// Parse and validate a serialized workspace without generating code.
///
/// Returns a JSON string containing structured errors and warnings.
#[wasm_bindgen]
pub fn check(workspace_json: &str) -> String {
    let errors = blockscene_compiler::check(workspace_json);
    to_json(&errors, |e| {
        format!(
            r#"{{"errors":[{{"message":"Serialization error: {}"}}],"warnings":[],"total_errors":1,"total_warnings":0}}"#,
            e
        )
    })
}

/// Return the editor block definitions for every registered block kind.
#[wasm_bindgen]
pub fn block_definitions() -> String {
    tb::block_definitions_json(registry())
}

/// Return the category toolbox.
#[wasm_bindgen]
pub fn toolbox() -> String {
    tb::toolbox_json(registry())
}

/// Return the initial field values for a new `kind` block dropped into the
/// serialized workspace, as a JSON object keyed by field name.
#[wasm_bindgen]
pub fn new_block_fields(workspace_json: &str, kind: &str) -> Result<String, JsError> {
    let fields = blockscene_compiler::new_block_fields(workspace_json, kind)?;
    Ok(serde_json::to_string(&fields)?)
}

/// Return the compiler version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
