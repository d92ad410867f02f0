//! Socket tags and the connection-compatibility rule.
//!
//! Tags are nominal: an input accepts a candidate iff the candidate's output
//! tag is a member of the input's accepted set, or the set is [`TagSet::Any`].
//! There is no subtyping.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed set of socket tags.
///
/// The serialized spellings are the check strings the editor uses, so they
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SocketTag {
    #[serde(rename = "Number")]
    Number,
    #[serde(rename = "Colour")]
    Colour,
    #[serde(rename = "COORDS")]
    Coords,
    #[serde(rename = "SHAPE")]
    Shape,
    #[serde(rename = "LIGHT")]
    Light,
    #[serde(rename = "MATERIAL")]
    Material,
}

impl SocketTag {
    /// Every tag, in declaration order.
    pub const ALL: [SocketTag; 6] = [
        SocketTag::Number,
        SocketTag::Colour,
        SocketTag::Coords,
        SocketTag::Shape,
        SocketTag::Light,
        SocketTag::Material,
    ];

    /// The editor-facing spelling of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            SocketTag::Number => "Number",
            SocketTag::Colour => "Colour",
            SocketTag::Coords => "COORDS",
            SocketTag::Shape => "SHAPE",
            SocketTag::Light => "LIGHT",
            SocketTag::Material => "MATERIAL",
        }
    }
}

impl fmt::Display for SocketTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocketTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocketTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Returned when a string names no socket tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown socket tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownTag {}

/// The set of tags a value input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSet {
    /// Wildcard: any output tag may connect.
    Any,
    /// Only the listed tags may connect.
    Only(&'static [SocketTag]),
}

impl TagSet {
    /// Whether a block producing `candidate` may connect to this input.
    pub fn accepts(&self, candidate: SocketTag) -> bool {
        match self {
            TagSet::Any => true,
            TagSet::Only(tags) => tags.contains(&candidate),
        }
    }
}

/// Serializes as the editor's `check` value: `null` for the wildcard,
/// otherwise an array of tag strings.
impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagSet::Any => serializer.serialize_none(),
            TagSet::Only(tags) => tags.serialize(serializer),
        }
    }
}

/// Free-function form of [`TagSet::accepts`].
pub fn accepts(input: &TagSet, candidate: SocketTag) -> bool {
    input.accepts(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_set_accepts_only_its_tag() {
        let lights = TagSet::Only(&[SocketTag::Light]);
        assert!(accepts(&lights, SocketTag::Light));
        assert!(!accepts(&lights, SocketTag::Material));
        assert!(!accepts(&lights, SocketTag::Shape));
    }

    #[test]
    fn test_wildcard_accepts_everything() {
        for tag in SocketTag::ALL {
            assert!(TagSet::Any.accepts(tag), "wildcard rejected {tag}");
        }
    }

    #[test]
    fn test_multi_tag_set() {
        let set = TagSet::Only(&[SocketTag::Shape, SocketTag::Light]);
        assert!(set.accepts(SocketTag::Shape));
        assert!(set.accepts(SocketTag::Light));
        assert!(!set.accepts(SocketTag::Coords));
    }

    #[test]
    fn test_tag_round_trips_through_its_spelling() {
        for tag in SocketTag::ALL {
            assert_eq!(tag.as_str().parse::<SocketTag>(), Ok(tag));
        }
        assert_eq!(
            "shape".parse::<SocketTag>(),
            Err(UnknownTag("shape".to_string()))
        );
    }

    #[test]
    fn test_tag_json_spelling() {
        assert_eq!(serde_json::to_string(&SocketTag::Coords).unwrap(), "\"COORDS\"");
        assert_eq!(serde_json::to_string(&SocketTag::Number).unwrap(), "\"Number\"");
    }

    #[test]
    fn test_tag_set_serializes_as_check() {
        assert_eq!(serde_json::to_string(&TagSet::Any).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&TagSet::Only(&[SocketTag::Material])).unwrap(),
            "[\"MATERIAL\"]"
        );
    }
}
