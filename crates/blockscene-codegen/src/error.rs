//! Codegen error types.
//!
//! Generation itself never fails: incomplete programs degrade to empty
//! output. These errors only arise from lookups by name through the public
//! API.

use thiserror::Error;

/// Errors from registry and workspace lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodegenError {
    /// No block kind with this name is registered.
    #[error("unknown block kind: {0}")]
    UnknownBlockKind(String),

    /// No block with this id exists in the workspace.
    #[error("no block with id: {0}")]
    UnknownBlock(String),
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
