use rkyv::{Archive, Deserialize, Serialize};
use crate::morphology::Upos;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A closed-class lemma and the abstract value it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LemmaValue {
    pub lemma: String,
    pub value: String,
}

impl LemmaValue {
    pub fn new(lemma: &str, value: &str) -> Self {
        Self { lemma: lemma.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct FeaturePair {
    pub name: String,
    pub value: String,
}

/// Features a determiner lemma writes onto its head.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct DeterminerRule {
    pub lemma: String,
    pub features: Vec<FeaturePair>,
    /// Turns a comparative head into a superlative one ("il più bello").
    #[cfg_attr(feature = "serde", serde(default))]
    pub superlative: bool,
}

impl DeterminerRule {
    pub fn new(lemma: &str, features: &[(&str, &str)]) -> Self {
        Self {
            lemma: lemma.into(),
            features: features
                .iter()
                .map(|(name, value)| FeaturePair { name: (*name).into(), value: (*value).into() })
                .collect(),
            superlative: false,
        }
    }
}

/// Where relational dependents are written on non-verbal heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum RelationLayout {
    /// Markers go to `RelType`, adpositions to `Case`; verbs take everything as `RelType`.
    Split = 0,
    /// Every relational dependent goes to `Case`.
    CaseOnly = 1,
}

/// Named rule deciding when a finite predicate without a subject gets a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum SubjectPolicy {
    English = 0,
    Serbian = 1,
}

/// How the "higher" auxiliary is picked among two copular auxiliaries.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
pub enum HigherCopula {
    /// The first one in linear order.
    First,
    /// The one whose form does not end with the suffix (English "-ing").
    WithoutSuffix(String),
    /// The first one whose form starts with the prefix, else the first one.
    WithPrefix(String),
}

impl Default for HigherCopula {
    fn default() -> Self {
        HigherCopula::First
    }
}

/// Auxiliary lemmas the TAM resolver consumes, one slot per rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[archive(check_bytes)]
pub struct AuxiliaryLexicon {
    pub infinitive: Option<String>,
    pub negation: Vec<String>,
    pub do_support: Option<String>,
    pub copula: Option<String>,
    pub get_passive: Option<String>,
    pub perfect: Option<String>,
    pub future: Option<String>,
    pub conditional: Option<String>,
    /// The modal that is also a past tense ("could").
    pub past_modal: Option<String>,
    /// Single copula on a non-participle head copies the auxiliary's tense and mood.
    pub copula_finite_fallback: bool,
    pub higher_copula: HigherCopula,
}

/// Lemmas consumed by the degree pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[archive(check_bytes)]
pub struct DegreeLexicon {
    pub comparative: Vec<String>,
    pub superlative: Vec<String>,
    /// Non-adverb `advmod` lemmas marking `Intense=Yes`.
    pub intensifiers: Vec<String>,
}

/// A function-word class that keeps its own morphology under one relation
/// when nothing else decided it (Serbian discourse conjunctions).
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RetainedMorphology {
    pub upos: Upos,
    pub deprel: String,
}

/// Language-specific knobs of the head classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[archive(check_bytes)]
pub struct ClassifierRules {
    /// Dependents dropped before classification.
    pub ignored_deprels: Vec<String>,
    /// Lemmas never treated as auxiliaries (the possessive clitic).
    pub tam_excluded_lemmas: Vec<String>,
    pub tam_excluded_deprels: Vec<String>,
    /// Heads with these tags never consume auxiliaries.
    pub tam_blocked_heads: Vec<Upos>,
    /// Tags never treated as relational dependents...
    pub relation_excluded_upos: Vec<Upos>,
    /// ...unless the lemma is listed here.
    pub relation_allowed_lemmas: Vec<String>,
    /// Particles consumed without contributing features.
    pub discourse_particles: Vec<String>,
    pub retained_morphology: Vec<RetainedMorphology>,
}

/// Complete per-language rule set, loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RuleTables {
    pub version: u32,
    pub language: String,
    /// Joins multi-valued features ("," or ";").
    pub separator: String,
    pub relation_layout: RelationLayout,
    pub subject_policy: SubjectPolicy,
    pub case_map: Vec<LemmaValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub marker_map: Vec<LemmaValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub determiners: Vec<DeterminerRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modalities: Vec<LemmaValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub auxiliaries: AuxiliaryLexicon,
    #[cfg_attr(feature = "serde", serde(default))]
    pub degree: DegreeLexicon,
    #[cfg_attr(feature = "serde", serde(default))]
    pub classifier: ClassifierRules,
}
