use serde::{Deserialize, Serialize};

use blockscene_codegen::CodegenOptions;

/// Compiler configuration.
///
/// Every field has a default, so a partial document (a TOML file, a JS
/// object) only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    #[serde(flatten)]
    pub codegen: CodegenOptions,
    /// Run the socket and variable checks and report their warnings.
    pub validate: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            codegen: CodegenOptions::default(),
            validate: true,
        }
    }
}
