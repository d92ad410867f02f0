//! The block walker.
//!
//! [`Generator`] is the explicit context every block rule receives: the
//! workspace snapshot, the registry, the options and the per-compile
//! [`Namespace`]. Value inputs are generated depth-first on demand by the
//! enclosing rule; statement chains are walked iteratively along `next`
//! links.

use std::collections::HashMap;

use blockscene_types::order::wrap;
use blockscene_types::{
    Block, BlockRef, FieldKind, FieldValue, Fragment, Order, VariableDefault, Workspace,
};

use crate::blocks::{Registry, Rule};
use crate::emit;
use crate::namespace::Namespace;
use crate::options::CodegenOptions;
use crate::runtime;

/// Code generation context for one compile.
pub struct Generator<'a> {
    workspace: &'a Workspace,
    registry: &'a Registry,
    options: &'a CodegenOptions,
    namespace: Namespace<'a>,
    /// Names claimed for unset variable-creating fields, per (block, field).
    fresh_names: HashMap<(String, &'static str), String>,
}

impl<'a> Generator<'a> {
    pub fn new(workspace: &'a Workspace, registry: &'a Registry, options: &'a CodegenOptions) -> Self {
        Self {
            workspace,
            registry,
            options,
            namespace: Namespace::new(workspace, &options.runtime_namespace),
            fresh_names: HashMap::new(),
        }
    }

    pub fn workspace(&self) -> &'a Workspace {
        self.workspace
    }

    pub fn options(&self) -> &'a CodegenOptions {
        self.options
    }

    pub fn namespace(&mut self) -> &mut Namespace<'a> {
        &mut self.namespace
    }

    // ══════════════════════════════════════════════════════════════════════
    // Blocks and chains
    // ══════════════════════════════════════════════════════════════════════

    /// Generate one block (not its `next` chain).
    pub fn block_to_fragment(&mut self, r: BlockRef) -> Fragment {
        let block = self.workspace.block(r);
        let empty = || match block.output() {
            Some(_) => Fragment::Value {
                code: String::new(),
                order: Order::Atomic,
            },
            None => Fragment::empty_statement(),
        };
        if !block.enabled {
            return empty();
        }
        let Some(def) = self.registry.get(&block.kind) else {
            tracing::warn!(block = %block.id, kind = %block.kind, "no rule for block kind");
            return empty();
        };

        let fragment = match def.rule {
            Rule::Statement(rule) => Fragment::Statement {
                code: rule(self, block),
            },
            Rule::Value(rule) => match rule(self, block) {
                Some((code, order)) => Fragment::Value { code, order },
                None => empty(),
            },
        };
        tracing::trace!(
            block = %block.id,
            kind = %block.kind,
            empty = fragment.is_empty(),
            "block generated"
        );
        fragment
    }

    /// Generate a statement chain starting at `head`: one line group per
    /// block in `next` order, blocks that produce nothing omitted.
    pub fn chain_to_code(&mut self, head: BlockRef) -> String {
        let workspace = self.workspace;
        let mut parts = Vec::new();
        for (r, _) in workspace.chain(head) {
            let fragment = self.block_to_fragment(r);
            if !fragment.is_empty() {
                parts.push(fragment.code().to_string());
            }
        }
        parts.join("\n")
    }

    /// Code of the expression connected to `input`, parenthesized for an
    /// `outer` context. `None` when nothing (or nothing usable) is
    /// connected; the calling rule decides between a default and emitting
    /// nothing.
    pub fn value_to_code(&mut self, block: &Block, input: &str, outer: Order) -> Option<String> {
        let child_ref = block.value_input(input)?;
        let child = self.workspace.block(child_ref);

        if self.options.check_sockets {
            let accepted = self
                .registry
                .get(&block.kind)
                .and_then(|def| def.shape.accepted_tags(input));
            if let (Some(accepted), Some(tag)) = (accepted, child.output()) {
                if !accepted.accepts(tag) {
                    tracing::warn!(
                        block = %block.id,
                        input,
                        %tag,
                        "ignoring connection with unaccepted tag"
                    );
                    return None;
                }
            }
        }

        match self.block_to_fragment(child_ref) {
            Fragment::Value { code, order } if !code.is_empty() => Some(wrap(code, order, outer)),
            _ => None,
        }
    }

    /// The chain attached to a statement input, indented as a body.
    pub fn statement_to_code(&mut self, block: &Block, input: &str) -> String {
        match block.statement_input(input) {
            Some(head) => {
                let code = self.chain_to_code(head);
                emit::indent(&code, &self.options.indent)
            }
            None => String::new(),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Fields
    // ══════════════════════════════════════════════════════════════════════

    fn field_kind(&self, block: &Block, field: &str) -> Option<FieldKind> {
        let def = self.registry.get(&block.kind)?;
        def.shape.field(field).map(|spec| spec.kind)
    }

    /// The identifier a variable field refers to.
    ///
    /// Unset pickers fall back to the first variable of the field's tag,
    /// then to the shape's literal fallback; unset variable-creating fields
    /// claim a fresh `prefix_N` name.
    pub fn variable_field(&mut self, block: &Block, field: &'static str) -> String {
        if let Some(FieldValue::Variable(var)) = block.field(field) {
            return self.namespace.resolve(&var.id);
        }
        match self.field_kind(block, field) {
            Some(FieldKind::Variable { tag, default }) => match default {
                VariableDefault::FirstOfType { fallback } => {
                    match self.namespace.first_variable_of_type(tag) {
                        Some(var) => self.namespace.resolve(&var.id),
                        None => fallback.to_string(),
                    }
                }
                VariableDefault::Fresh { prefix } => {
                    let key = (block.id.clone(), field);
                    if let Some(name) = self.fresh_names.get(&key) {
                        return name.clone();
                    }
                    let name = self.namespace.claim_name_with_prefix(prefix);
                    self.fresh_names.insert(key, name.clone());
                    name
                }
            },
            _ => {
                tracing::warn!(block = %block.id, field, "not a variable field");
                String::new()
            }
        }
    }

    /// The raw text of a text-like field, or the shape's default.
    pub fn field_text(&self, block: &Block, field: &str) -> String {
        if let Some(text) = block.field(field).and_then(FieldValue::as_str) {
            return text.to_string();
        }
        self.field_kind(block, field)
            .and_then(|kind| kind.default_value())
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// A text-like field as a quoted string literal.
    pub fn field_literal(&self, block: &Block, field: &str) -> String {
        emit::quote(&self.field_text(block, field))
    }

    /// A number field as a number literal, or the shape's default.
    pub fn field_number(&self, block: &Block, field: &str) -> String {
        let n = block
            .field(field)
            .and_then(FieldValue::as_number)
            .or_else(|| {
                self.field_kind(block, field)
                    .and_then(|kind| kind.default_value())
                    .and_then(|value| value.as_number())
            })
            .unwrap_or(0.0);
        emit::number(n)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Output helpers
    // ══════════════════════════════════════════════════════════════════════

    /// A call to the runtime operation registered for `block`'s kind,
    /// `await`ed when the operation is asynchronous. Empty when the kind
    /// has no operation.
    pub fn runtime_call(&self, block: &Block, args: &[String]) -> String {
        match self.registry.get(&block.kind).and_then(|def| def.runtime_op) {
            Some(op) => runtime::call(&self.options.runtime_namespace, op, args),
            None => {
                tracing::warn!(block = %block.id, kind = %block.kind, "no runtime operation for block kind");
                String::new()
            }
        }
    }

    /// The descriptor list an expression block evaluates to.
    pub fn descriptor(&self, block: &Block, type_name: &str, props: &[(&str, String)]) -> String {
        emit::descriptor(&block.id, type_name, props)
    }
}
