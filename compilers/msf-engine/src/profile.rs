use std::collections::{HashMap, HashSet};

use msf_protocol::{
    AuxiliaryLexicon, ClassifierRules, DegreeLexicon, DeterminerRule, RelationLayout, RuleTables,
    SubjectPolicy, Upos,
};
use rkyv::{AlignedVec, Deserialize};

use crate::error::RulesError;
use crate::languages;

/// Rule-table layout understood by this engine.
pub const RULES_VERSION: u32 = 1;

/// Immutable, indexed view of one language's [`RuleTables`].
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    tables: RuleTables,
    case_map: HashMap<String, String>,
    marker_map: HashMap<String, String>,
    modalities: HashMap<String, String>,
    determiners: HashMap<String, DeterminerRule>,
    ignored_deprels: HashSet<String>,
}

fn index(pairs: &[msf_protocol::LemmaValue]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|pair| {
            // An empty value stands for the lemma itself
            let value = if pair.value.is_empty() { &pair.lemma } else { &pair.value };
            (pair.lemma.clone(), value.clone())
        })
        .collect()
}

impl LanguageProfile {
    pub fn new(tables: RuleTables) -> Result<Self, RulesError> {
        if tables.version != RULES_VERSION {
            return Err(RulesError::Version { found: tables.version, expected: RULES_VERSION });
        }
        if tables.separator.is_empty() {
            return Err(RulesError::EmptySeparator(tables.language.clone()));
        }

        let determiners = tables
            .determiners
            .iter()
            .map(|rule| (rule.lemma.clone(), rule.clone()))
            .collect();

        log::debug!(
            "loaded rules for {}: {} case, {} marker, {} determiner entries",
            tables.language,
            tables.case_map.len(),
            tables.marker_map.len(),
            tables.determiners.len()
        );

        Ok(Self {
            case_map: index(&tables.case_map),
            marker_map: index(&tables.marker_map),
            modalities: index(&tables.modalities),
            determiners,
            ignored_deprels: tables.classifier.ignored_deprels.iter().cloned().collect(),
            tables,
        })
    }

    pub fn builtin(language: &str) -> Result<Self, RulesError> {
        let tables = languages::builtin(language)
            .ok_or_else(|| RulesError::UnknownLanguage(language.to_string()))?;
        Self::new(tables)
    }

    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Loads tables written by [`LanguageProfile::to_archive`], validating the bytes first.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, RulesError> {
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<RuleTables>(&aligned)
            .map_err(|err| RulesError::Archive(err.to_string()))?;
        let tables: RuleTables = archived
            .deserialize(&mut rkyv::Infallible)
            .map_err(|_| RulesError::Archive("deserialization failed".to_string()))?;
        Self::new(tables)
    }

    pub fn to_archive(tables: &RuleTables) -> Result<AlignedVec, RulesError> {
        rkyv::to_bytes::<_, 4096>(tables).map_err(|err| RulesError::Archive(format!("{:?}", err)))
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn language(&self) -> &str {
        &self.tables.language
    }

    pub fn separator(&self) -> &str {
        &self.tables.separator
    }

    pub fn layout(&self) -> RelationLayout {
        self.tables.relation_layout
    }

    pub fn subject_policy(&self) -> SubjectPolicy {
        self.tables.subject_policy
    }

    pub fn auxiliaries(&self) -> &AuxiliaryLexicon {
        &self.tables.auxiliaries
    }

    pub fn degree(&self) -> &DegreeLexicon {
        &self.tables.degree
    }

    pub fn classifier(&self) -> &ClassifierRules {
        &self.tables.classifier
    }

    pub fn is_ignored(&self, deprel: &str) -> bool {
        self.ignored_deprels.contains(deprel)
    }

    pub fn marker_value(&self, lemma: &str) -> Option<&str> {
        self.marker_map.get(lemma).map(String::as_str)
    }

    pub fn case_value(&self, lemma: &str) -> Option<&str> {
        self.case_map.get(lemma).map(String::as_str)
    }

    pub fn in_relation_tables(&self, lemma: &str) -> bool {
        self.marker_map.contains_key(lemma) || self.case_map.contains_key(lemma)
    }

    /// Marker table, then case table, else the lemma itself.
    pub fn relation_value<'a>(&'a self, lemma: &'a str) -> &'a str {
        match self.marker_value(lemma).or_else(|| self.case_value(lemma)) {
            Some(value) => value,
            None => lemma,
        }
    }

    /// Case table, else the lemma itself.
    pub fn case_or_lemma<'a>(&'a self, lemma: &'a str) -> &'a str {
        self.case_value(lemma).unwrap_or(lemma)
    }

    pub fn modality(&self, lemma: &str) -> Option<&str> {
        self.modalities.get(lemma).map(String::as_str)
    }

    pub fn determiner(&self, lemma: &str) -> Option<&DeterminerRule> {
        self.determiners.get(lemma)
    }

    pub fn is_negation(&self, lemma: &str) -> bool {
        self.tables.auxiliaries.negation.iter().any(|n| n == lemma)
    }

    pub fn is_discourse_particle(&self, lemma: &str) -> bool {
        self.tables.classifier.discourse_particles.iter().any(|p| p == lemma)
    }

    pub fn is_degree_lemma(&self, lemma: &str) -> bool {
        let degree = &self.tables.degree;
        degree.comparative.iter().chain(&degree.superlative).any(|d| d == lemma)
    }

    pub fn is_intensifier(&self, lemma: &str) -> bool {
        self.tables.degree.intensifiers.iter().any(|i| i == lemma)
    }

    pub fn blocks_tam(&self, upos: Option<Upos>) -> bool {
        upos.map_or(false, |tag| self.tables.classifier.tam_blocked_heads.contains(&tag))
    }

    /// Function words that keep their own morphology when left undecided.
    pub fn retains_morphology(&self, upos: Option<Upos>, deprel: &str) -> bool {
        self.tables
            .classifier
            .retained_morphology
            .iter()
            .any(|rule| Some(rule.upos) == upos && rule.deprel == deprel)
    }

    /// Joins a multi-valued feature with the language's separator.
    pub fn join<I, S>(&self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .filter(|value| !value.as_ref().is_empty())
            .map(|value| value.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&self.tables.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_profiles_load() {
        for name in languages::BUILTIN {
            let profile = LanguageProfile::builtin(name).unwrap();
            assert_eq!(profile.language(), name);
        }
        assert!(matches!(
            LanguageProfile::builtin("xyz"),
            Err(RulesError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_json_and_archive_agree() {
        let profile = LanguageProfile::builtin("eng").unwrap();

        let json = serde_json::to_string(profile.tables()).unwrap();
        let from_json = LanguageProfile::from_json(&json).unwrap();
        assert_eq!(from_json.tables(), profile.tables());

        let bytes = LanguageProfile::to_archive(profile.tables()).unwrap();
        let from_archive = LanguageProfile::from_archive(&bytes).unwrap();
        assert_eq!(from_archive.tables(), profile.tables());
    }

    #[test]
    fn test_garbage_archive_is_rejected() {
        assert!(matches!(
            LanguageProfile::from_archive(&[0xde, 0xad, 0xbe, 0xef]),
            Err(RulesError::Archive(_))
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let mut tables = languages::builtin("srp").unwrap();
        tables.version = RULES_VERSION + 1;
        assert!(matches!(LanguageProfile::new(tables), Err(RulesError::Version { .. })));
    }

    #[test]
    fn test_relation_lookup_order() {
        let profile = LanguageProfile::builtin("eng").unwrap();
        // In both tables: the marker reading wins
        assert_eq!(profile.relation_value("after"), "Subseq");
        assert_eq!(profile.relation_value("of"), "Gen");
        assert_eq!(profile.relation_value("while"), "while");
        assert_eq!(profile.relation_value("amid"), "amid");
        assert_eq!(profile.relation_value("notaword"), "notaword");
    }

    proptest! {
        #[test]
        fn relation_lookup_is_total(lemma in "[a-z' ]{1,12}") {
            for name in languages::BUILTIN {
                let profile = LanguageProfile::builtin(name).unwrap();
                let value = profile.relation_value(&lemma);
                prop_assert!(!value.is_empty());
                if !profile.in_relation_tables(&lemma) {
                    prop_assert_eq!(value, lemma.as_str());
                    prop_assert_eq!(profile.case_or_lemma(&lemma), lemma.as_str());
                }
            }
        }
    }
}
