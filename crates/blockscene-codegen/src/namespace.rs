//! Variable naming and binding for one compile.
//!
//! Variable fields store the editor's internal variable id, not the text to
//! emit. [`Namespace`] maps ids to identifiers that are legal in the target
//! language and distinct from each other, from reserved words, and from the
//! runtime namespace object.

use std::collections::{HashMap, HashSet};

use blockscene_types::{SocketTag, Variable, Workspace};

/// Words generated identifiers must never collide with.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "async", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in", "Infinity", "instanceof",
    "interface", "let", "NaN", "new", "null", "of", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined",
    "var", "void", "while", "with", "yield",
    // globals the runtime relies on
    "Array", "Boolean", "console", "document", "JSON", "Math", "Number", "Object", "Promise",
    "String", "Symbol", "window",
];

/// Per-compile variable namespace.
#[derive(Debug)]
pub struct Namespace<'w> {
    workspace: &'w Workspace,
    reserved: HashSet<String>,
    /// Variable id (or unresolvable raw key) → emitted identifier.
    by_key: HashMap<String, String>,
    /// Every identifier handed out so far.
    taken: HashSet<String>,
}

impl<'w> Namespace<'w> {
    /// Build the namespace, binding every declared variable in declaration
    /// order so identifiers do not depend on traversal order.
    pub fn new(workspace: &'w Workspace, runtime_namespace: &str) -> Self {
        let mut reserved: HashSet<String> = RESERVED_WORDS.iter().map(|w| w.to_string()).collect();
        reserved.insert(runtime_namespace.to_string());

        let mut ns = Self {
            workspace,
            reserved,
            by_key: HashMap::new(),
            taken: HashSet::new(),
        };
        for var in workspace.variables() {
            ns.bind(&var.id, &var.name);
        }
        ns
    }

    /// The first declared variable of `tag`, in declaration order.
    pub fn first_variable_of_type(&self, tag: SocketTag) -> Option<&'w Variable> {
        self.workspace.variables().iter().find(|v| v.tag == tag)
    }

    /// The first `prefix_N` (N ≥ 1) not used by a declared variable.
    ///
    /// Pure: repeated calls on an unchanged workspace return the same name.
    pub fn unique_name_with_prefix(&self, prefix: &str) -> String {
        first_free(prefix, |name| self.workspace.variable_by_name(name).is_some())
    }

    /// Like [`Namespace::unique_name_with_prefix`], but also skips names
    /// already handed out in this compile, and reserves the result.
    pub fn claim_name_with_prefix(&mut self, prefix: &str) -> String {
        let name = first_free(prefix, |name| {
            self.workspace.variable_by_name(name).is_some()
                || self.taken.contains(name)
                || self.reserved.contains(name)
        });
        self.taken.insert(name.clone());
        name
    }

    /// The identifier to emit for a variable field's stored key.
    ///
    /// A key naming no declared variable is bound to its own legalized
    /// text; the broken reference surfaces when the script runs.
    pub fn resolve(&mut self, key: &str) -> String {
        if let Some(name) = self.by_key.get(key) {
            return name.clone();
        }
        tracing::warn!(key, "variable reference does not resolve");
        self.bind(key, key)
    }

    /// Bind `key` to `name`, legalized. A taken name gets a `_N` suffix,
    /// N ≥ 2.
    fn bind(&mut self, key: &str, name: &str) -> String {
        let base = legalize(name);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) || self.reserved.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        self.by_key.insert(key.to_string(), candidate.clone());
        candidate
    }
}

/// Linear probe for the first `prefix_N` that `used` rejects.
fn first_free(prefix: &str, used: impl Fn(&str) -> bool) -> String {
    (1..)
        .map(|n| format!("{prefix}_{n}"))
        .find(|name| !used(name))
        .unwrap_or_else(|| format!("{prefix}_0"))
}

/// Map arbitrary display text to an identifier.
fn legalize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() {
        out.push_str("unnamed");
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "my_");
    }
    out
}
