use msf_protocol::feature::{DEGREE, INTENSE, VERBAL_TAM};
use msf_protocol::{FeatureMap, NodeId, Upos, UposSet};
use msf_tree::Node;

use crate::profile::LanguageProfile;

/// What the degree and determiner passes did with the dependents they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeterminerOutcome {
    pub consumed: Vec<NodeId>,
    /// Unknown determiners, handed back to the content dependents.
    pub returned: Vec<NodeId>,
}

/// Degree, intensity and determiner features for a nominal, adjectival or
/// adverbial head. Writes into `bundle`.
pub fn resolve_determiners(
    profile: &LanguageProfile,
    head: &Node,
    bundle: &mut FeatureMap,
    degree: &[Node],
    determiners: &[Node],
    content: &[Node],
) -> DeterminerOutcome {
    let mut outcome = DeterminerOutcome::default();

    // 1. Degree adverbs
    if head.is(UposSet::GRADABLE) && !degree.is_empty() {
        let lexicon = profile.degree();
        let has = |list: &[String]| degree.iter().any(|d| list.contains(&d.lemma));
        if has(&lexicon.comparative) {
            bundle.insert(DEGREE.to_string(), "Cmp".to_string());
        } else if has(&lexicon.superlative) {
            bundle.insert(DEGREE.to_string(), "Sup".to_string());
        }
        outcome.consumed.extend(degree.iter().map(|d| d.id));
    }

    // 2. Intensifiers stay content words
    let intensified = content.iter().any(|child| {
        child.base_relation() == "advmod"
            && child.upos != Some(Upos::Adv)
            && profile.is_intensifier(&child.lemma)
    });
    if intensified {
        bundle.insert(INTENSE.to_string(), "Yes".to_string());
    }

    // 3. Determiners
    for det in determiners {
        match profile.determiner(&det.lemma) {
            Some(rule) => {
                if rule.superlative && bundle.get(DEGREE).map(String::as_str) == Some("Cmp") {
                    bundle.insert(DEGREE.to_string(), "Sup".to_string());
                }
                for pair in &rule.features {
                    if VERBAL_TAM.contains(&pair.name.as_str()) {
                        bundle.entry(pair.name.clone()).or_insert_with(|| pair.value.clone());
                    } else {
                        bundle.insert(pair.name.clone(), pair.value.clone());
                    }
                }
                outcome.consumed.push(det.id);
            }
            None => {
                log::warn!("head {} ({}): untreated determiner {:?}", head.id, head.lemma, det.lemma);
                outcome.returned.push(det.id);
            }
        }
    }

    outcome
}
