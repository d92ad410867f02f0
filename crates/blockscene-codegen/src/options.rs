use serde::{Deserialize, Serialize};

/// Knobs for code generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// Name of the runtime adapter object generated calls go through.
    pub runtime_namespace: String,
    /// Indentation of nested statement bodies.
    pub indent: String,
    /// Treat connections whose output tag the input does not accept as
    /// disconnected. Off by default: the editor rejects such connections
    /// before they reach the compiler.
    pub check_sockets: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            runtime_namespace: "threeD".to_string(),
            indent: "  ".to_string(),
            check_sockets: false,
        }
    }
}
