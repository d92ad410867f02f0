//! Whole-program assembly.

use blockscene_types::Workspace;

use crate::blocks::{registry, Registry};
use crate::error::{CodegenError, CodegenResult};
use crate::generator::Generator;
use crate::options::CodegenOptions;

/// Generate the script for a workspace with the built-in registry and
/// default options.
pub fn generate(workspace: &Workspace) -> String {
    generate_with(workspace, registry(), &CodegenOptions::default())
}

/// Generate the script for a workspace.
///
/// Every top-level statement chain is generated in stored order and the
/// non-empty results are joined by `\n`. Floating expression blocks are
/// skipped. No trailing newline.
pub fn generate_with(
    workspace: &Workspace,
    registry: &Registry,
    options: &CodegenOptions,
) -> String {
    let mut g = Generator::new(workspace, registry, options);
    let mut chains = Vec::new();
    for &head in workspace.top_blocks() {
        let block = workspace.block(head);
        if !block.is_statement() {
            tracing::debug!(block = %block.id, "skipping floating expression block");
            continue;
        }
        let code = g.chain_to_code(head);
        tracing::debug!(head = %block.id, empty = code.is_empty(), "chain generated");
        if !code.is_empty() {
            chains.push(code);
        }
    }
    let script = chains.join("\n");
    tracing::debug!(
        blocks = workspace.len(),
        chains = chains.len(),
        bytes = script.len(),
        "script generated"
    );
    script
}

/// Generate the code of a single block by id, without its `next` chain.
pub fn generate_block(
    workspace: &Workspace,
    registry: &Registry,
    options: &CodegenOptions,
    id: &str,
) -> CodegenResult<String> {
    let r = workspace
        .find_block(id)
        .ok_or_else(|| CodegenError::UnknownBlock(id.to_string()))?;
    let mut g = Generator::new(workspace, registry, options);
    Ok(g.block_to_fragment(r).code().to_string())
}
