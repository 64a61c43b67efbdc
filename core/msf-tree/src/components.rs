use std::fmt;

use msf_protocol::{FeatureMap, NodeId, Upos};

#[derive(Debug, Clone)]
pub struct TokenData {
    pub id: NodeId,
    pub form: String,
    pub lemma: String,
    pub upos: Option<Upos>,
    pub xpos: Option<String>,
    pub misc: Option<String>,
}

/// Source UD morphology, read-only for the engine.
#[derive(Debug, Clone, Default)]
pub struct Morphology {
    pub feats: FeatureMap,
}

#[derive(Debug, Clone)]
pub struct Syntax {
    pub head: NodeId,
    pub deprel: String,
}

/// `nsubj:pass` -> `nsubj`
pub fn base_relation(deprel: &str) -> &str {
    deprel.split(':').next().unwrap_or(deprel)
}

/// The derived morpho-syntactic layer of a node.
///
/// A node without this component has not been decided yet. `Empty` marks a
/// function word; `Features` with an empty map is a content word carrying no
/// features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureBundle {
    Empty,
    Features(FeatureMap),
}

impl FeatureBundle {
    pub fn is_content(&self) -> bool {
        matches!(self, FeatureBundle::Features(_))
    }

    pub fn features(&self) -> Option<&FeatureMap> {
        match self {
            FeatureBundle::Empty => None,
            FeatureBundle::Features(map) => Some(map),
        }
    }
}

impl fmt::Display for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureBundle::Empty => f.write_str("_"),
            FeatureBundle::Features(map) if map.is_empty() => f.write_str("|"),
            FeatureBundle::Features(map) => {
                for (i, (name, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                Ok(())
            }
        }
    }
}

/// Lemma of a fixed multiword expression headed by this node ("as well as").
/// Lives only while the sentence is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLemma(pub String);

/// Marker for placeholder nodes created by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synthetic;
