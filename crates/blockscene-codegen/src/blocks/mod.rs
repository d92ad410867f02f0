//! Block registry.
//!
//! A flat table from block kind to [`BlockDef`]: the editor-facing shape, the
//! code generation rule, and the runtime operation the block calls (if any).
//! Each category module contributes its kinds through a `register` function.

mod camera;
mod events;
mod lighting;
mod materials;
mod physics;
mod scene;
mod shapes;
mod values;

use std::collections::HashMap;
use std::sync::OnceLock;

use blockscene_types::{
    Arg, Block, BlockShape, FieldKind, FieldSpec, InputSpec, Order, ShapeCatalog, SocketTag,
    TagSet, VariableDefault,
};

use crate::generator::Generator;
use crate::runtime::RuntimeOp;

/// Rule of a statement block: the block's code, or `""` to emit nothing.
pub type StatementRule = fn(&mut Generator<'_>, &Block) -> String;

/// Rule of an expression block: the code and its precedence, or `None` to
/// emit nothing.
pub type ValueRule = fn(&mut Generator<'_>, &Block) -> Option<(String, Order)>;

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Statement(StatementRule),
    Value(ValueRule),
}

/// Everything the compiler knows about one block kind. Rules reach the
/// runtime only through `runtime_op`, via [`Generator::runtime_call`].
#[derive(Debug, Clone, Copy)]
pub struct BlockDef {
    pub shape: BlockShape,
    pub rule: Rule,
    pub runtime_op: Option<RuntimeOp>,
}

impl BlockDef {
    pub fn statement(shape: BlockShape, rule: StatementRule, runtime_op: Option<RuntimeOp>) -> Self {
        debug_assert!(shape.is_statement(), "{} has an output", shape.kind);
        Self {
            shape,
            rule: Rule::Statement(rule),
            runtime_op,
        }
    }

    pub fn value(shape: BlockShape, rule: ValueRule, runtime_op: Option<RuntimeOp>) -> Self {
        debug_assert!(!shape.is_statement(), "{} has no output", shape.kind);
        Self {
            shape,
            rule: Rule::Value(rule),
            runtime_op,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.shape.kind
    }
}

/// Registry mapping block kind → [`BlockDef`], in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    defs: Vec<BlockDef>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every built-in block kind.
    pub fn standard() -> Self {
        let mut reg = Self::new();
        camera::register(&mut reg);
        lighting::register(&mut reg);
        materials::register(&mut reg);
        physics::register(&mut reg);
        shapes::register(&mut reg);
        events::register(&mut reg);
        scene::register(&mut reg);
        values::register(&mut reg);
        reg
    }

    /// Add a block kind. Registering a kind twice replaces the earlier
    /// definition in place.
    pub fn register(&mut self, def: BlockDef) {
        match self.index.get(def.kind()) {
            Some(&i) => self.defs[i] = def,
            None => {
                self.index.insert(def.kind(), self.defs.len());
                self.defs.push(def);
            }
        }
    }

    pub fn get(&self, kind: &str) -> Option<&BlockDef> {
        self.index.get(kind).map(|&i| &self.defs[i])
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.index.contains_key(kind)
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl ShapeCatalog for Registry {
    fn shape(&self, kind: &str) -> Option<&BlockShape> {
        self.get(kind).map(|def| &def.shape)
    }
}

/// The shared built-in registry.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::standard)
}

// ══════════════════════════════════════════════════════════════════════════
// Shape helpers
// ══════════════════════════════════════════════════════════════════════════

const fn input(name: &'static str, accepts: TagSet) -> Arg {
    Arg::Input(InputSpec::Value { name, accepts })
}

const fn statements(name: &'static str) -> Arg {
    Arg::Input(InputSpec::Statement { name })
}

const fn variable(name: &'static str, tag: SocketTag, default: VariableDefault) -> Arg {
    Arg::Field(FieldSpec {
        name,
        kind: FieldKind::Variable { tag, default },
    })
}

const fn picker(name: &'static str, tag: SocketTag, fallback: &'static str) -> Arg {
    variable(name, tag, VariableDefault::FirstOfType { fallback })
}

const fn fresh(name: &'static str, tag: SocketTag, prefix: &'static str) -> Arg {
    variable(name, tag, VariableDefault::Fresh { prefix })
}

const fn colour(name: &'static str, default: &'static str) -> Arg {
    Arg::Field(FieldSpec {
        name,
        kind: FieldKind::Colour { default },
    })
}

const fn number(name: &'static str, default: f64) -> Arg {
    Arg::Field(FieldSpec {
        name,
        kind: FieldKind::Number { default },
    })
}

const fn text(name: &'static str, default: &'static str) -> Arg {
    Arg::Field(FieldSpec {
        name,
        kind: FieldKind::Text { default },
    })
}

const fn dropdown(name: &'static str, options: &'static [(&'static str, &'static str)]) -> Arg {
    Arg::Field(FieldSpec {
        name,
        kind: FieldKind::Dropdown { options },
    })
}

const NUMBER: TagSet = TagSet::Only(&[SocketTag::Number]);
const COLOUR: TagSet = TagSet::Only(&[SocketTag::Colour]);
const COORDS: TagSet = TagSet::Only(&[SocketTag::Coords]);
const SHAPE: TagSet = TagSet::Only(&[SocketTag::Shape]);
const LIGHT: TagSet = TagSet::Only(&[SocketTag::Light]);
const MATERIAL: TagSet = TagSet::Only(&[SocketTag::Material]);

/// A statement line: the rendered call followed by `;`.
fn line(call: String) -> String {
    format!("{call};")
}
