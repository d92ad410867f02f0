//! The block graph: blocks, their links, and declared variables.
//!
//! Blocks live in an arena owned by [`Workspace`] and refer to each other by
//! [`BlockRef`]. A workspace is an immutable snapshot once built; the compiler
//! only ever reads it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tag::SocketTag;

// ══════════════════════════════════════════════════════════════════════════════
// Field values
// ══════════════════════════════════════════════════════════════════════════════

/// A reference from a variable field to a declared variable, by the editor's
/// internal variable id (not its display name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VariableRef {
    pub id: String,
}

impl VariableRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A literal field value, tagged by field kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free-form user text.
    Text(String),
    Number(f64),
    /// `#rrggbb`
    Colour(String),
    Checkbox(bool),
    /// The selected option's value token.
    Dropdown(String),
    Variable(VariableRef),
}

impl FieldValue {
    /// The textual payload of text-like fields.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Colour(s) | FieldValue::Dropdown(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableRef> {
        match self {
            FieldValue::Variable(v) => Some(v),
            _ => None,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Blocks
// ══════════════════════════════════════════════════════════════════════════════

/// Index of a block in its workspace arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockRef(pub u32);

impl BlockRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a block connects to its surroundings.
///
/// A block is either sequenced in a statement chain or produces a value for a
/// value input; never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    Statement {
        previous: Option<BlockRef>,
        next: Option<BlockRef>,
    },
    Expression {
        output: SocketTag,
    },
}

/// A single node of the visual program.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Editor-assigned id, unique within the workspace.
    pub id: String,
    /// Registry key.
    pub kind: String,
    pub fields: BTreeMap<String, FieldValue>,
    /// Every value input the block's shape declares, connected or not.
    pub value_inputs: BTreeMap<String, Option<BlockRef>>,
    /// Every statement input the block's shape declares, with the head of the
    /// nested chain if one is attached.
    pub statement_inputs: BTreeMap<String, Option<BlockRef>>,
    pub linkage: Linkage,
    /// Disabled blocks emit no code.
    pub enabled: bool,
    /// The block this one is attached to (input or previous link).
    pub parent: Option<BlockRef>,
}

impl Block {
    /// A fresh, unconnected statement block.
    pub fn statement(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::with_linkage(
            id,
            kind,
            Linkage::Statement {
                previous: None,
                next: None,
            },
        )
    }

    /// A fresh, unconnected expression block producing `output`.
    pub fn expression(id: impl Into<String>, kind: impl Into<String>, output: SocketTag) -> Self {
        Self::with_linkage(id, kind, Linkage::Expression { output })
    }

    fn with_linkage(id: impl Into<String>, kind: impl Into<String>, linkage: Linkage) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            fields: BTreeMap::new(),
            value_inputs: BTreeMap::new(),
            statement_inputs: BTreeMap::new(),
            linkage,
            enabled: true,
            parent: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// The block connected to a value input, if any.
    pub fn value_input(&self, name: &str) -> Option<BlockRef> {
        self.value_inputs.get(name).copied().flatten()
    }

    /// The head of the chain attached to a statement input, if any.
    pub fn statement_input(&self, name: &str) -> Option<BlockRef> {
        self.statement_inputs.get(name).copied().flatten()
    }

    pub fn next(&self) -> Option<BlockRef> {
        match self.linkage {
            Linkage::Statement { next, .. } => next,
            Linkage::Expression { .. } => None,
        }
    }

    pub fn previous(&self) -> Option<BlockRef> {
        match self.linkage {
            Linkage::Statement { previous, .. } => previous,
            Linkage::Expression { .. } => None,
        }
    }

    /// The socket tag this block produces, for expression blocks.
    pub fn output(&self) -> Option<SocketTag> {
        match self.linkage {
            Linkage::Expression { output } => Some(output),
            Linkage::Statement { .. } => None,
        }
    }

    pub fn is_statement(&self) -> bool {
        matches!(self.linkage, Linkage::Statement { .. })
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Variables
// ══════════════════════════════════════════════════════════════════════════════

/// A declared, typed workspace variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Editor-internal storage key, referenced by variable fields.
    pub id: String,
    /// Display name, unique within the workspace.
    pub name: String,
    pub tag: SocketTag,
}

impl Variable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tag: SocketTag) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tag,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Workspace
// ══════════════════════════════════════════════════════════════════════════════

/// All blocks and declared variables of a visual program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    blocks: Vec<Block>,
    top_blocks: Vec<BlockRef>,
    variables: Vec<Variable>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Building ─────────────────────────────────────────────────────────

    /// Add a block to the arena. Links are set afterwards through
    /// [`Workspace::block_mut`].
    pub fn insert(&mut self, block: Block) -> BlockRef {
        let r = BlockRef(self.blocks.len() as u32);
        self.blocks.push(block);
        r
    }

    pub fn block_mut(&mut self, r: BlockRef) -> &mut Block {
        &mut self.blocks[r.index()]
    }

    /// Record a top-level (unparented) block, in editor order.
    pub fn push_top_block(&mut self, r: BlockRef) {
        self.top_blocks.push(r);
    }

    /// Declare a variable. Name uniqueness is the caller's responsibility.
    pub fn declare_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Link `next` after `prev` in a statement chain.
    ///
    /// Expression blocks have no chain links; linking one is a no-op.
    pub fn link_next(&mut self, prev: BlockRef, next: BlockRef) {
        if let Linkage::Statement { next: slot, .. } = &mut self.block_mut(prev).linkage {
            *slot = Some(next);
        }
        let block = self.block_mut(next);
        if let Linkage::Statement { previous, .. } = &mut block.linkage {
            *previous = Some(prev);
        }
        block.parent = Some(prev);
    }

    // ── Reading ──────────────────────────────────────────────────────────

    /// Look up a block. Panics on a ref from another workspace.
    pub fn block(&self, r: BlockRef) -> &Block {
        &self.blocks[r.index()]
    }

    pub fn get(&self, r: BlockRef) -> Option<&Block> {
        self.blocks.get(r.index())
    }

    /// All blocks with their refs, in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockRef, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (BlockRef(i as u32), b))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Top-level blocks in the order the editor stored them.
    pub fn top_blocks(&self) -> &[BlockRef] {
        &self.top_blocks
    }

    /// Find a block by its editor id.
    pub fn find_block(&self, id: &str) -> Option<BlockRef> {
        self.blocks().find(|(_, b)| b.id == id).map(|(r, _)| r)
    }

    /// Declared variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Look up a variable by its internal id.
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn variable_by_name(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Iterate a statement chain starting at `head`, following `next` links.
    pub fn chain(&self, head: BlockRef) -> Chain<'_> {
        Chain {
            workspace: self,
            cursor: Some(head),
        }
    }
}

/// Iterator over a statement chain.
pub struct Chain<'a> {
    workspace: &'a Workspace,
    cursor: Option<BlockRef>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (BlockRef, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let r = self.cursor?;
        let block = self.workspace.get(r)?;
        self.cursor = block.next();
        Some((r, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_statement_chain() -> (Workspace, [BlockRef; 3]) {
        let mut ws = Workspace::new();
        let a = ws.insert(Block::statement("a", "move_camera"));
        let b = ws.insert(Block::statement("b", "set_sky_color"));
        let c = ws.insert(Block::statement("c", "set_mass"));
        ws.link_next(a, b);
        ws.link_next(b, c);
        ws.push_top_block(a);
        (ws, [a, b, c])
    }

    #[test]
    fn test_chain_follows_next_links() {
        let (ws, [a, b, c]) = three_statement_chain();
        let order: Vec<BlockRef> = ws.chain(a).map(|(r, _)| r).collect();
        assert_eq!(order, vec![a, b, c]);
        assert_eq!(ws.block(c).previous(), Some(b));
        assert_eq!(ws.block(b).parent, Some(a));
    }

    #[test]
    fn test_expression_blocks_have_no_chain_links() {
        let mut ws = Workspace::new();
        let coords = ws.insert(Block::expression("c1", "coords", SocketTag::Coords));
        let stmt = ws.insert(Block::statement("s1", "move_camera"));
        ws.link_next(coords, stmt);
        assert_eq!(ws.block(coords).next(), None);
        assert_eq!(ws.block(coords).output(), Some(SocketTag::Coords));
        assert!(!ws.block(coords).is_statement());
    }

    #[test]
    fn test_find_block_and_variable() {
        let (mut ws, [_, b, _]) = three_statement_chain();
        ws.declare_variable(Variable::new("v1", "shape_1", SocketTag::Shape));
        assert_eq!(ws.find_block("b"), Some(b));
        assert_eq!(ws.find_block("zzz"), None);
        assert_eq!(ws.variable("v1").map(|v| v.name.as_str()), Some("shape_1"));
        assert_eq!(ws.variable_by_name("shape_1").map(|v| v.id.as_str()), Some("v1"));
        assert!(ws.variable("nope").is_none());
    }

    #[test]
    fn test_unconnected_inputs_read_as_none() {
        let mut block = Block::statement("x", "create_shape");
        block.value_inputs.insert("SHAPE".into(), None);
        assert_eq!(block.value_input("SHAPE"), None);
        assert_eq!(block.value_input("MISSING"), None);
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Colour("#fff".into()).as_str(), Some("#fff"));
        assert_eq!(FieldValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(FieldValue::Checkbox(true).as_str(), None);
        assert_eq!(
            FieldValue::Variable(VariableRef::new("v")).as_variable(),
            Some(&VariableRef::new("v"))
        );
    }
}
