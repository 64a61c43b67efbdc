use msf_protocol::feature::{CASE, REL_TYPE};
use msf_protocol::{FeatureMap, NodeId, RelationLayout, Upos};
use msf_tree::components::base_relation;
use msf_tree::Node;

use crate::error::{EngineError, Result};
use crate::profile::LanguageProfile;

const CLAUSAL_RELATIONS: [&str; 6] = ["conj", "csubj", "xcomp", "ccomp", "advcl", "acl"];

/// Whether a head with this relation heads a clause.
pub fn is_clausal(deprel: &str) -> bool {
    CLAUSAL_RELATIONS.contains(&base_relation(deprel))
}

/// A relational dependent as the resolver sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relational {
    pub id: NodeId,
    /// The fixed-expression lemma when the dependent heads one.
    pub lemma: String,
    pub deprel: String,
    pub upos: Option<Upos>,
}

impl Relational {
    pub fn from_node(node: &Node, fixed_lemma: Option<String>) -> Self {
        Self {
            id: node.id,
            lemma: fixed_lemma.unwrap_or_else(|| node.lemma.clone()),
            deprel: node.deprel.clone(),
            upos: node.upos,
        }
    }
}

/// `Case` / `RelType` values contributed by relational dependents.
pub fn resolve_relations(
    profile: &LanguageProfile,
    head: NodeId,
    verbal: bool,
    clausal: bool,
    dependents: &[Relational],
) -> Result<FeatureMap> {
    let mut feats = FeatureMap::new();
    if dependents.is_empty() {
        return Ok(feats);
    }

    match profile.layout() {
        RelationLayout::CaseOnly => {
            let values = dependents.iter().map(|dep| profile.case_or_lemma(&dep.lemma));
            feats.insert(CASE.to_string(), profile.join(values));
        }
        RelationLayout::Split if verbal => {
            let values = dependents.iter().map(|dep| profile.relation_value(&dep.lemma));
            feats.insert(REL_TYPE.to_string(), profile.join(values));
        }
        RelationLayout::Split => {
            let mut markers = Vec::new();
            let mut cases = Vec::new();

            for dep in dependents {
                let relation = base_relation(&dep.deprel);
                let marker_like = relation == "mark" || profile.marker_value(&dep.lemma).is_some();
                let case_like = relation == "case" || profile.case_value(&dep.lemma).is_some();

                if marker_like {
                    markers.push(profile.relation_value(&dep.lemma));
                }
                if case_like {
                    cases.push(profile.case_or_lemma(&dep.lemma));
                }
                if !marker_like && !case_like {
                    if dep.upos != Some(Upos::Adp) {
                        return Err(EngineError::unhandled(
                            head,
                            format!("relational dependent {} ({}) fits neither Case nor RelType", dep.id, dep.deprel),
                            vec![dep.lemma.clone()],
                        ));
                    }
                    if clausal {
                        markers.push(profile.relation_value(&dep.lemma));
                    } else {
                        cases.push(profile.case_or_lemma(&dep.lemma));
                    }
                }
            }

            if !markers.is_empty() {
                feats.insert(REL_TYPE.to_string(), profile.join(markers));
            }
            if !cases.is_empty() {
                feats.insert(CASE.to_string(), profile.join(cases));
            }
        }
    }

    for (name, value) in &feats {
        log::debug!("head {}: {}={}", head, name, value);
    }
    Ok(feats)
}
