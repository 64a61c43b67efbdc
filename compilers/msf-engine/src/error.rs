use std::time::Duration;

use msf_protocol::NodeId;
use msf_tree::TreeError;
use thiserror::Error;

use crate::oracle::{Ambiguity, Choice};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("answer {answer:?} is not one of {options:?}")]
    OutOfRange { answer: Choice, options: Vec<Choice> },

    #[error("operator input closed")]
    InputClosed,

    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error("no fixed answer configured for {0:?}")]
    NoPolicy(Ambiguity),

    #[error("more than {0} decision points for one head")]
    TooManyQuestions(usize),

    #[error("oracle lock poisoned")]
    Poisoned,

    #[error("oracle I/O failed: {0}")]
    Io(String),
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("unknown built-in language {0:?}")]
    UnknownLanguage(String),

    #[error("invalid rule JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule archive rejected: {0}")]
    Archive(String),

    #[error("unsupported rule table version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("rule table for {0:?} has an empty list separator")]
    EmptySeparator(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed tree: {0}")]
    MalformedTree(#[from] TreeError),

    #[error("head {head}: dependents {dependents:?} claimed as both auxiliaries and relations")]
    TaxonomyConflict { head: NodeId, dependents: Vec<NodeId> },

    #[error("head {head}: {reason} (lemmas: {lemmas:?})")]
    UnhandledConstruction { head: NodeId, reason: String, lemmas: Vec<String> },

    #[error("head {head}: ambiguity left unresolved: {source}")]
    AmbiguityUnresolved {
        head: NodeId,
        #[source]
        source: OracleError,
    },

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("could not start worker pool: {0}")]
    WorkerPool(String),
}

impl EngineError {
    pub fn unhandled<S: Into<String>>(head: NodeId, reason: S, lemmas: Vec<String>) -> Self {
        EngineError::UnhandledConstruction { head, reason: reason.into(), lemmas }
    }

    /// The operator did not answer in time; the sentence can be retried later.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            EngineError::AmbiguityUnresolved { source: OracleError::Timeout(_), .. }
        )
    }
}
