//! Placeholder subjects for finite predicates without an overt one.

use std::fmt;

use msf_protocol::feature::{AGREEMENT, PERSON, VERB_FORM};
use msf_protocol::{FeatureMap, SubjectPolicy};
use msf_tree::Node;

const SUBJECT_RELATIONS: [&str; 3] = ["nsubj", "expl", "csubj"];
const EMBEDDED_RELATIONS: [&str; 4] = ["advcl", "ccomp", "acl", "xcomp"];

pub fn is_subject_like(node: &Node) -> bool {
    SUBJECT_RELATIONS.contains(&node.base_relation())
}

/// Why no placeholder subject is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    NotFinite,
    OvertSubject,
    Parataxis,
    Copula(String),
    EmbeddedClause(String),
    ControlComplement(String),
    ThirdPerson,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::NotFinite => f.write_str("predicate is not finite"),
            Exclusion::OvertSubject => f.write_str("overt subject present"),
            Exclusion::Parataxis => f.write_str("paratactic dependent"),
            Exclusion::Copula(lemma) => write!(f, "copula {:?}", lemma),
            Exclusion::EmbeddedClause(deprel) => write!(f, "embedded clause ({})", deprel),
            Exclusion::ControlComplement(lemma) => write!(f, "control complement {:?}", lemma),
            Exclusion::ThirdPerson => f.write_str("third-person predicate"),
        }
    }
}

/// Checks shared by every policy, then the named policy.
pub fn exclusion(
    policy: SubjectPolicy,
    head: &Node,
    bundle: &FeatureMap,
    dependents: &[Node],
) -> Option<Exclusion> {
    if bundle.get(VERB_FORM).map(String::as_str) != Some("Fin") {
        return Some(Exclusion::NotFinite);
    }
    if dependents.iter().any(is_subject_like) {
        return Some(Exclusion::OvertSubject);
    }

    match policy {
        SubjectPolicy::English => None,
        SubjectPolicy::Serbian => serbian_exclusion(head, dependents),
    }
}

fn serbian_exclusion(head: &Node, dependents: &[Node]) -> Option<Exclusion> {
    if dependents.iter().any(|d| d.base_relation() == "parataxis") {
        return Some(Exclusion::Parataxis);
    }
    if let Some(cop) = dependents.iter().find(|d| d.deprel == "cop" && d.lemma == "biti") {
        return Some(Exclusion::Copula(cop.lemma.clone()));
    }
    if EMBEDDED_RELATIONS.contains(&head.deprel.as_str()) {
        return Some(Exclusion::EmbeddedClause(head.deprel.clone()));
    }
    if let Some(xcomp) = dependents.iter().find(|d| d.deprel == "xcomp" && d.lemma == "prihvatiti") {
        return Some(Exclusion::ControlComplement(xcomp.lemma.clone()));
    }
    if head.feat(PERSON) == Some("3") {
        return Some(Exclusion::ThirdPerson);
    }
    None
}

/// Agreement features for the placeholder: from the earliest auxiliary, each
/// falling back to the head, or from the head alone. `None` when nothing agrees.
pub fn agreement(head: &Node, auxiliaries: &[Node]) -> Option<FeatureMap> {
    let source = auxiliaries.iter().min_by_key(|aux| aux.id).unwrap_or(head);

    let feats: FeatureMap = AGREEMENT
        .iter()
        .filter_map(|name| {
            source
                .feat(name)
                .or_else(|| head.feat(name))
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect();

    if feats.is_empty() {
        None
    } else {
        Some(feats)
    }
}
