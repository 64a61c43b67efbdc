#![no_std] // Rule tables and tags stay usable from embedded/WASM hosts

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;

// Re-export core types for convenience
pub use ids::{NodeId, ParseNodeIdError, WordId};
pub use morphology::*;

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_upos_round_trips_through_text() {
        for tag in Upos::ALL {
            assert_eq!(tag.as_str().parse::<Upos>(), Ok(tag));
        }
        assert!("DETERMINER".parse::<Upos>().is_err());
    }

    #[test]
    fn test_upos_classes() {
        assert!(UposSet::NOMINAL.has(Some(Upos::Propn)));
        assert!(UposSet::VERBAL.has(Some(Upos::Verb)));
        assert!(!UposSet::VERBAL.has(Some(Upos::Aux)));
        assert!(!UposSet::NOMINAL.has(None));
        assert_eq!(Upos::X.flag(), UposSet::X);
    }

    #[test]
    fn test_node_id_ordering_places_synthetic_after_word() {
        let head = NodeId::word(3);
        let synthetic = NodeId::synthetic(3, 1);
        let next = NodeId::word(4);

        assert!(head < synthetic && synthetic < next);
        assert_eq!(synthetic.to_string(), "3.1");
        assert_eq!("3.1".parse::<NodeId>(), Ok(synthetic));
        assert_eq!("0".parse::<NodeId>(), Ok(NodeId::ROOT));
        assert!("3.x".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_rule_tables_archive() {
        let tables = RuleTables {
            version: 1,
            language: "eng".to_string(),
            separator: ",".to_string(),
            relation_layout: RelationLayout::Split,
            subject_policy: SubjectPolicy::English,
            case_map: vec![LemmaValue::new("of", "Gen")],
            marker_map: vec![LemmaValue::new("if", "Cond")],
            determiners: vec![DeterminerRule::new("the", &[("Definite", "Def")])],
            modalities: vec![LemmaValue::new("must", "Nec")],
            auxiliaries: AuxiliaryLexicon {
                higher_copula: HigherCopula::WithoutSuffix("ing".to_string()),
                ..Default::default()
            },
            degree: DegreeLexicon::default(),
            classifier: ClassifierRules {
                tam_blocked_heads: vec![Upos::Sconj],
                ..Default::default()
            },
        };

        // Serialize (what the rule compiler writes to disk)
        let bytes = to_bytes::<_, 1024>(&tables).expect("Failed to serialize RuleTables");

        // Deserialize (Simulate loading from disk)
        let loaded: RuleTables = from_bytes(&bytes).expect("Failed to deserialize RuleTables");

        assert_eq!(tables, loaded);
    }

    #[test]
    fn test_id_layout() {
        // WordId(u32) should be exactly 4 bytes
        assert_eq!(core::mem::size_of::<WordId>(), 4);
    }
}
