//! Morpho-syntactic feature engine: builds the content-word feature layer of
//! UD dependency trees from per-language rule tables.

pub mod classifier;
pub mod determiner;
pub mod engine;
pub mod error;
pub mod languages;
pub mod oracle;
pub mod profile;
pub mod relation;
pub mod subject;
pub mod tam;

pub use engine::{Annotator, BatchReport, SentenceFailure, SentenceOutcome, SentenceReport, MAX_DECISIONS};
pub use error::{EngineError, OracleError, Result, RulesError};
pub use oracle::{Ambiguity, Choice, DecisionPoint, FixedPolicy, Oracle, Resolution, SharedOracle};
pub use profile::{LanguageProfile, RULES_VERSION};
