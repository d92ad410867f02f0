//! blockscene code generator.
//!
//! Turns a parsed [`Workspace`](blockscene_types::Workspace) into the text
//! of a script that drives the 3D runtime through a fixed call surface.
//!
//! # Pipeline
//!
//! ```text
//! Workspace → Generator (per block rule) → chains → script text
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use blockscene_codegen::generate;
//!
//! let script = generate(&workspace);
//! ```

pub mod blocks;
mod defaults;
mod emit;
pub mod error;
mod generator;
mod namespace;
mod options;
pub mod runtime;

mod assembler;

pub use assembler::{generate, generate_block, generate_with};
pub use blocks::{registry, BlockDef, Registry, Rule};
pub use defaults::{new_block_fields, FieldDefault};
pub use emit::quote;
pub use error::{CodegenError, CodegenResult};
pub use generator::Generator;
pub use namespace::Namespace;
pub use options::CodegenOptions;
pub use runtime::RuntimeOp;
