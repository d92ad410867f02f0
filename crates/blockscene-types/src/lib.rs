//! Shared types for the blockscene compiler.
//!
//! This crate defines the socket tag system, the block-graph workspace model,
//! declarative block shapes, precedence and fragments, and the structured
//! diagnostics used across all compiler stages.

mod error;
pub mod order;
pub mod shape;
pub mod tag;
pub mod workspace;

pub use error::{CompileErrors, Diagnostic, ErrorCategory, ErrorCode, Severity, MAX_ERRORS};
pub use order::{Fragment, Order};
pub use shape::{
    Arg, BlockShape, Category, FieldKind, FieldSpec, InputSpec, ShapeCatalog, VariableDefault,
};
pub use tag::{accepts, SocketTag, TagSet};
pub use workspace::{Block, BlockRef, FieldValue, Linkage, Variable, VariableRef, Workspace};
