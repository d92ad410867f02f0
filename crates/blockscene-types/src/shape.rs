//! Declarative block shapes.
//!
//! A [`BlockShape`] describes what the editor draws for a block kind: its
//! message template, the fields and inputs interleaved in that message, and
//! which sockets it exposes. The parser also consults shapes (through
//! [`ShapeCatalog`]) to tell value inputs from statement inputs and to type
//! field values.

use crate::tag::{SocketTag, TagSet};
use crate::workspace::FieldValue;

/// Toolbox category of a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Camera,
    Lighting,
    Materials,
    Physics,
    Shapes,
    Events,
    Scene,
    Values,
    Variables,
}

impl Category {
    /// Every category, in toolbox order.
    pub const ALL: [Category; 9] = [
        Category::Camera,
        Category::Lighting,
        Category::Materials,
        Category::Physics,
        Category::Shapes,
        Category::Events,
        Category::Scene,
        Category::Values,
        Category::Variables,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Camera => "Camera",
            Category::Lighting => "Lighting",
            Category::Materials => "Materials",
            Category::Physics => "Physics",
            Category::Shapes => "Shapes",
            Category::Events => "Events",
            Category::Scene => "Scene",
            Category::Values => "Values",
            Category::Variables => "Variables",
        }
    }

    /// Block colour hue (0–360) for blocks in this category.
    pub fn hue(self) -> u16 {
        match self {
            Category::Camera => 210,
            Category::Lighting => 60,
            Category::Materials => 20,
            Category::Physics => 0,
            Category::Shapes => 160,
            Category::Events => 290,
            Category::Scene => 190,
            Category::Values => 230,
            Category::Variables => 330,
        }
    }
}

/// How an unset variable field is populated when a block is first placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableDefault {
    /// Pick the first declared variable of the field's tag, or this literal
    /// name when none exists.
    FirstOfType { fallback: &'static str },
    /// The block creates a variable: name it `prefix_N` with the first
    /// unused `N`.
    Fresh { prefix: &'static str },
}

/// The kind of a field, with its editor default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text { default: &'static str },
    Number { default: f64 },
    Colour { default: &'static str },
    Checkbox { default: bool },
    /// `(label, value)` pairs; the first option is the default.
    Dropdown {
        options: &'static [(&'static str, &'static str)],
    },
    Variable {
        tag: SocketTag,
        default: VariableDefault,
    },
}

impl FieldKind {
    /// The literal default of a non-variable field.
    pub fn default_value(&self) -> Option<FieldValue> {
        match *self {
            FieldKind::Text { default } => Some(FieldValue::Text(default.to_string())),
            FieldKind::Number { default } => Some(FieldValue::Number(default)),
            FieldKind::Colour { default } => Some(FieldValue::Colour(default.to_string())),
            FieldKind::Checkbox { default } => Some(FieldValue::Checkbox(default)),
            FieldKind::Dropdown { options } => options
                .first()
                .map(|(_, value)| FieldValue::Dropdown(value.to_string())),
            FieldKind::Variable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSpec {
    Value { name: &'static str, accepts: TagSet },
    Statement { name: &'static str },
}

impl InputSpec {
    pub fn name(&self) -> &'static str {
        match self {
            InputSpec::Value { name, .. } | InputSpec::Statement { name } => name,
        }
    }
}

/// One `%n` placeholder of a block message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg {
    Field(FieldSpec),
    Input(InputSpec),
}

/// The editor-facing description of a block kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockShape {
    pub kind: &'static str,
    /// Message template; `%1`, `%2`, … refer to `args` in order.
    pub message: &'static str,
    pub args: &'static [Arg],
    /// `Some` for expression blocks, `None` for statement blocks.
    pub output: Option<SocketTag>,
    pub category: Category,
    pub tooltip: &'static str,
    pub inputs_inline: bool,
}

impl BlockShape {
    pub fn is_statement(&self) -> bool {
        self.output.is_none()
    }

    /// Fields in message order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.args.iter().filter_map(|arg| match arg {
            Arg::Field(f) => Some(f),
            Arg::Input(_) => None,
        })
    }

    /// Inputs in message order.
    pub fn inputs(&self) -> impl Iterator<Item = &InputSpec> {
        self.args.iter().filter_map(|arg| match arg {
            Arg::Input(i) => Some(i),
            Arg::Field(_) => None,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs().find(|i| i.name() == name)
    }

    /// The accepted tag set of a value input.
    pub fn accepted_tags(&self, input: &str) -> Option<TagSet> {
        match self.input(input)? {
            InputSpec::Value { accepts, .. } => Some(*accepts),
            InputSpec::Statement { .. } => None,
        }
    }
}

/// Lookup of block shapes by kind, implemented by the block registry.
pub trait ShapeCatalog {
    fn shape(&self, kind: &str) -> Option<&BlockShape>;
}
