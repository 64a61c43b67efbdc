use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[archive(check_bytes)]
        #[repr(transparent)] // Ensure it has the same layout as u32
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

define_id!(WordId, "1-based position of a surface word in its sentence; 0 is the root.");

/// Address of a node in a sentence.
///
/// Source words have `sub == 0` and print as `5`. Synthetic nodes reuse the
/// word of the node they follow and a non-zero `sub`, printing as `5.1`, so the
/// derived ordering is also the linear order of the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub word: WordId,
    pub sub: u16,
}

impl NodeId {
    /// The symbolic root every sentence hangs from.
    pub const ROOT: NodeId = NodeId { word: WordId(0), sub: 0 };

    pub const fn word(word: u32) -> Self {
        Self { word: WordId(word), sub: 0 }
    }

    pub const fn synthetic(word: u32, sub: u16) -> Self {
        Self { word: WordId(word), sub }
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    pub fn is_synthetic(&self) -> bool {
        self.sub != 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sub == 0 {
            write!(f, "{}", self.word.0)
        } else {
            write!(f, "{}.{}", self.word.0, self.sub)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeIdError(pub alloc::string::String);

impl fmt::Display for ParseNodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node id: {:?}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseNodeIdError {}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNodeIdError(s.into());
        match s.split_once('.') {
            None => s.parse::<u32>().map(NodeId::word).map_err(|_| err()),
            Some((word, sub)) => {
                let word = word.parse::<u32>().map_err(|_| err())?;
                let sub = sub.parse::<u16>().map_err(|_| err())?;
                Ok(NodeId::synthetic(word, sub))
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeIdVisitor;

        impl<'de> serde::de::Visitor<'de> for NodeIdVisitor {
            type Value = NodeId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a word index or a `word.sub` string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<NodeId, E> {
                u32::try_from(v)
                    .map(NodeId::word)
                    .map_err(|_| E::custom("node id out of range"))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<NodeId, E> {
                u32::try_from(v)
                    .map(NodeId::word)
                    .map_err(|_| E::custom("node id out of range"))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<NodeId, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NodeIdVisitor)
    }
}
