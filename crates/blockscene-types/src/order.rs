//! Operator precedence and generated fragments.
//!
//! Every value fragment carries the [`Order`] of its outermost operator.
//! When a fragment is embedded into a context of a given order, it is
//! parenthesized if it binds looser than that context.
//!
//! The registered value blocks only produce atomic code (literals, lists,
//! identifiers), so in practice nothing is wrapped today.

use serde::Serialize;

/// Target-language operator precedence, tightest first.
///
/// Discriminants are the conventional precedence numbers scaled by ten so
/// sub-levels (e.g. `new` at 1.1, member access at 1.2) stay integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum Order {
    /// Literals, identifiers, list and object literals.
    Atomic = 0,
    /// `new Foo(...)`
    New = 11,
    /// `a.b`, `a[b]`
    Member = 12,
    /// `f(...)`
    FunctionCall = 20,
    /// `await x`
    Await = 48,
    /// `c ? a : b`
    Conditional = 150,
    /// `a = b`
    Assignment = 160,
    /// `a, b`
    Comma = 180,
    /// No surrounding operator (argument position, statement position).
    None = 990,
}

impl Order {
    /// The raw precedence level.
    pub fn level(self) -> u16 {
        self as u16
    }

    /// Whether code of order `self` must be parenthesized when placed in a
    /// context of order `outer`.
    pub fn needs_parens_in(self, outer: Order) -> bool {
        if outer > self {
            return false;
        }
        // Equal atomic or unconstrained contexts never need grouping.
        !(outer == self && matches!(outer, Order::Atomic | Order::None))
    }
}

/// Wrap `code` in parentheses if `inner` binds looser than `outer`.
pub fn wrap(code: String, inner: Order, outer: Order) -> String {
    if code.is_empty() || !inner.needs_parens_in(outer) {
        code
    } else {
        format!("({code})")
    }
}

/// The per-block output of the code generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// Output of a statement block. Empty when the block contributes nothing.
    Statement { code: String },
    /// Output of an expression block, with the order of its outer operator.
    Value { code: String, order: Order },
}

impl Fragment {
    /// A statement fragment that contributes no code.
    pub fn empty_statement() -> Self {
        Fragment::Statement {
            code: String::new(),
        }
    }

    /// The generated code text.
    pub fn code(&self) -> &str {
        match self {
            Fragment::Statement { code } | Fragment::Value { code, .. } => code,
        }
    }

    /// Whether the fragment produced no code.
    pub fn is_empty(&self) -> bool {
        self.code().is_empty()
    }

    /// The fragment's precedence; statements sit in a `None` context.
    pub fn order(&self) -> Order {
        match self {
            Fragment::Statement { .. } => Order::None,
            Fragment::Value { order, .. } => *order,
        }
    }
}
