use msf_protocol::{NodeId, UposSet};
use msf_tree::Node;

use crate::error::{EngineError, Result};
use crate::profile::LanguageProfile;

const RELATIONAL_DEPRELS: [&str; 3] = ["case", "mark", "cc"];

/// The dependents of one head, split by the pass that consumes them.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// A literal `?` hangs from the head.
    pub question_mark: bool,
    /// Head lemma joined with its `fixed` parts, when there are any.
    pub fixed_lemma: Option<String>,
    pub fixed: Vec<Node>,
    pub tam: Vec<Node>,
    /// Consumed without contributing features.
    pub discourse: Vec<Node>,
    pub relational: Vec<Node>,
    pub determiners: Vec<Node>,
    pub degree: Vec<Node>,
    pub content: Vec<Node>,
}

impl Classification {
    /// Every dependent a resolver consumes.
    pub fn consumed(&self) -> impl Iterator<Item = &Node> {
        self.fixed
            .iter()
            .chain(&self.tam)
            .chain(&self.discourse)
            .chain(&self.relational)
    }
}

fn is_tam_candidate(profile: &LanguageProfile, head: &Node, child: &Node) -> bool {
    let rules = profile.classifier();
    child.is(UposSet::FUNCTIONAL)
        && !rules.tam_excluded_lemmas.contains(&child.lemma)
        && !rules.tam_excluded_deprels.iter().any(|d| *d == child.deprel || d.as_str() == child.base_relation())
        && !profile.blocks_tam(head.upos)
}

fn is_relational(profile: &LanguageProfile, child: &Node) -> bool {
    let rules = profile.classifier();
    let claimed = RELATIONAL_DEPRELS.contains(&child.base_relation())
        || profile.in_relation_tables(&child.lemma);
    let excluded = child.upos.map_or(false, |tag| rules.relation_excluded_upos.contains(&tag))
        && !rules.relation_allowed_lemmas.contains(&child.lemma);
    claimed && !excluded
}

/// Partitions the raw dependents of `head`. `children` are in linear order.
pub fn classify(profile: &LanguageProfile, head: &Node, children: &[Node]) -> Result<Classification> {
    let mut class = Classification {
        question_mark: children.iter().any(|child| child.form == "?"),
        ..Default::default()
    };

    // 1. Ignored relations and fixed-expression parts
    let mut remaining = Vec::new();
    for child in children {
        if profile.is_ignored(&child.deprel) {
            continue;
        }
        if child.deprel == "fixed" {
            class.fixed.push(child.clone());
        } else {
            remaining.push(child.clone());
        }
    }

    if !class.fixed.is_empty() {
        let mut parts: Vec<&Node> = class.fixed.iter().chain(std::iter::once(head)).collect();
        parts.sort_by_key(|node| node.id);
        let lemma = parts.iter().map(|node| node.lemma.as_str()).collect::<Vec<_>>().join(" ");
        class.fixed_lemma = Some(lemma);
    }

    // 2. Auxiliaries and relations are claimed independently, then checked
    let conflicts: Vec<NodeId> = remaining
        .iter()
        .filter(|child| is_tam_candidate(profile, head, child) && is_relational(profile, child))
        .map(|child| child.id)
        .collect();
    if !conflicts.is_empty() {
        return Err(EngineError::TaxonomyConflict { head: head.id, dependents: conflicts });
    }

    let modifiable = head.is(UposSet::MODIFIABLE);
    let gradable = head.is(UposSet::GRADABLE);

    for child in remaining {
        if is_tam_candidate(profile, head, &child) {
            if profile.is_discourse_particle(&child.lemma) {
                class.discourse.push(child);
            } else {
                class.tam.push(child);
            }
        } else if is_relational(profile, &child) {
            class.relational.push(child);
        } else if modifiable && child.base_relation() == "det" {
            class.determiners.push(child);
        } else if gradable && profile.is_degree_lemma(&child.lemma) {
            class.degree.push(child);
        } else {
            class.content.push(child);
        }
    }

    log::debug!(
        "head {} ({}): {} tam, {} relational, {} det, {} degree, {} content",
        head.id,
        head.lemma,
        class.tam.len(),
        class.relational.len(),
        class.determiners.len(),
        class.degree.len(),
        class.content.len()
    );
    Ok(class)
}
