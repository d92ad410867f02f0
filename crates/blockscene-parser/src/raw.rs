//! The editor's JSON serialization, as deserialized before linking.
//!
//! Statement chains serialize as nested `next` objects, so a long chain is a
//! deeply nested document. Connected blocks are therefore kept as borrowed
//! [`RawValue`]s and decoded one block at a time by the linker: serde_json
//! skips a raw value without recursing, so no single decode nests deeper than
//! one block's own fields and connections.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;

/// Top-level workspace document.
#[derive(Debug, Deserialize)]
pub(crate) struct RawWorkspace<'a> {
    #[serde(borrow, default)]
    pub blocks: Option<RawBlocks<'a>>,
    #[serde(default)]
    pub variables: Vec<RawVariable>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBlocks<'a> {
    #[serde(rename = "languageVersion", default)]
    pub language_version: u32,
    #[serde(borrow, default)]
    pub blocks: Vec<&'a RawValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVariable {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBlock<'a> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(borrow, default)]
    pub inputs: BTreeMap<String, RawConnection<'a>>,
    #[serde(borrow, default)]
    pub next: Option<RawConnection<'a>>,
}

impl<'a> RawBlock<'a> {
    /// Decode one block, leaving its connected blocks undecoded.
    pub fn decode(raw: &'a RawValue) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw.get())
    }

    /// The undecoded block connected below this one.
    pub fn next_target(&self) -> Option<&'a RawValue> {
        self.next.as_ref().and_then(RawConnection::target)
    }
}

fn enabled_default() -> bool {
    true
}

/// What is plugged into an input or a `next` connection.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawConnection<'a> {
    #[serde(borrow, default)]
    pub block: Option<&'a RawValue>,
    #[serde(borrow, default)]
    pub shadow: Option<&'a RawValue>,
}

impl<'a> RawConnection<'a> {
    /// The effective block: a real connection wins over its shadow.
    pub fn target(&self) -> Option<&'a RawValue> {
        self.block.or(self.shadow)
    }
}
