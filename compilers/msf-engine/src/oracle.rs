//! Operator decisions for constructions the rule tables cannot settle.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Mutex;

use msf_protocol::NodeId;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// What kind of question is being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ambiguity {
    /// Auxiliary before the subject: question, conditional, or neither.
    Inversion,
    /// Conditional auxiliary ("would"): conditional or future in the past.
    ConditionalAux,
    /// Past-tense modal ("could"): conditional or simple past.
    PastModal,
}

impl Ambiguity {
    pub fn options(&self) -> &'static [Choice] {
        match self {
            Ambiguity::Inversion => &[Choice::Interrogative, Choice::Conditional, Choice::NoneOfTheAbove],
            Ambiguity::ConditionalAux => &[Choice::Conditional, Choice::FutureInPast],
            Ambiguity::PastModal => &[Choice::Conditional, Choice::Past],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Choice {
    Interrogative,
    Conditional,
    NoneOfTheAbove,
    FutureInPast,
    Past,
}

impl Choice {
    /// Single-letter key typed by the operator.
    pub fn key(&self) -> char {
        match self {
            Choice::Interrogative => 'q',
            Choice::Conditional => 'c',
            Choice::NoneOfTheAbove => 'n',
            Choice::FutureInPast => 'f',
            Choice::Past => 'p',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Choice::Interrogative => "question",
            Choice::Conditional => "conditional",
            Choice::NoneOfTheAbove => "none of the above",
            Choice::FutureInPast => "future in the past",
            Choice::Past => "past",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.key(), self.label())
    }
}

/// A question the TAM resolver cannot answer from the tree alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionPoint {
    pub head: NodeId,
    pub kind: Ambiguity,
    pub options: Vec<Choice>,
    pub prompt: String,
}

impl DecisionPoint {
    pub fn new(head: NodeId, kind: Ambiguity, prompt: String) -> Self {
        Self { head, kind, options: kind.options().to_vec(), prompt }
    }

    /// Maps a typed key to one of the options.
    pub fn choice_for_key(&self, key: &str) -> Option<Choice> {
        let mut chars = key.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.options.iter().copied().find(|o| o.key() == c),
            _ => None,
        }
    }
}

/// Outcome of a pure resolver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Pending(DecisionPoint),
}

/// Answers gathered so far for one head.
pub type Answers = BTreeMap<Ambiguity, Choice>;

pub trait Oracle {
    fn decide(&mut self, point: &DecisionPoint) -> Result<Choice, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn decide(&mut self, point: &DecisionPoint) -> Result<Choice, OracleError> {
        (**self).decide(point)
    }
}

/// Deterministic per-kind answers, for unattended runs and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedPolicy {
    answers: HashMap<Ambiguity, Choice>,
    asked: usize,
}

impl FixedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: Ambiguity, choice: Choice) -> Self {
        self.answers.insert(kind, choice);
        self
    }

    /// How many questions were answered.
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl Oracle for FixedPolicy {
    fn decide(&mut self, point: &DecisionPoint) -> Result<Choice, OracleError> {
        self.asked += 1;
        self.answers
            .get(&point.kind)
            .copied()
            .ok_or(OracleError::NoPolicy(point.kind))
    }
}

/// Serialises questions from parallel workers onto one oracle.
pub struct SharedOracle<O> {
    inner: Mutex<O>,
}

impl<O: Oracle> SharedOracle<O> {
    pub fn new(oracle: O) -> Self {
        Self { inner: Mutex::new(oracle) }
    }

    pub fn into_inner(self) -> Result<O, OracleError> {
        self.inner.into_inner().map_err(|_| OracleError::Poisoned)
    }
}

impl<O: Oracle> Oracle for &SharedOracle<O> {
    fn decide(&mut self, point: &DecisionPoint) -> Result<Choice, OracleError> {
        let mut oracle = self.inner.lock().map_err(|_| OracleError::Poisoned)?;
        oracle.decide(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(kind: Ambiguity) -> DecisionPoint {
        DecisionPoint::new(NodeId::word(2), kind, "?".to_string())
    }

    #[test]
    fn test_fixed_policy_answers_per_kind() {
        let mut policy = FixedPolicy::new().with(Ambiguity::ConditionalAux, Choice::FutureInPast);

        assert_eq!(policy.decide(&point(Ambiguity::ConditionalAux)), Ok(Choice::FutureInPast));
        assert_eq!(
            policy.decide(&point(Ambiguity::PastModal)),
            Err(OracleError::NoPolicy(Ambiguity::PastModal))
        );
        assert_eq!(policy.asked(), 2);
    }

    #[test]
    fn test_keys_map_to_listed_options_only() {
        let inversion = point(Ambiguity::Inversion);
        assert_eq!(inversion.choice_for_key("q\n"), Some(Choice::Interrogative));
        assert_eq!(inversion.choice_for_key("f"), None);
        assert_eq!(inversion.choice_for_key("qq"), None);

        let modal = point(Ambiguity::PastModal);
        assert_eq!(modal.choice_for_key("p"), Some(Choice::Past));
    }

    #[test]
    fn test_shared_oracle_forwards() {
        let shared = SharedOracle::new(FixedPolicy::new().with(Ambiguity::PastModal, Choice::Past));
        let mut handle = &shared;
        assert_eq!(handle.decide(&point(Ambiguity::PastModal)), Ok(Choice::Past));
        assert_eq!(shared.into_inner().map(|p| p.asked()), Ok(1));
    }
}
