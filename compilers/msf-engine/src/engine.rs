use std::sync::Arc;

use msf_protocol::feature::{MOOD, POLARITY, VERBAL_TAM, VERB_FORM, VOICE};
use msf_protocol::{FeatureMap, NodeId, UposSet};
use msf_tree::components::FeatureBundle;
use msf_tree::record::{AnnotatedSentence, SentenceRecord};
use msf_tree::systems::{span, verify_integrity, HeadChildren};
use msf_tree::{Node, Sentence};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::classify;
use crate::determiner::resolve_determiners;
use crate::error::{EngineError, OracleError, Result};
use crate::oracle::{Answers, Oracle, Resolution, SharedOracle};
use crate::profile::LanguageProfile;
use crate::relation::{is_clausal, resolve_relations, Relational};
use crate::subject;
use crate::tam::{resolve_tam, TamInput};

/// At most this many questions per head (one per ambiguity kind).
pub const MAX_DECISIONS: usize = 3;

/// Dependents that keep their own morphology when their head is processed.
const CONTENT_DEPENDENT: UposSet = UposSet::ADV
    .union(UposSet::ADJ)
    .union(UposSet::INTJ)
    .union(UposSet::DET)
    .union(UposSet::VERBAL)
    .union(UposSet::NOMINAL);

/// Words that keep their morphology when nothing else decided them.
const CONTENT_WORD: UposSet = UposSet::ADJ
    .union(UposSet::INTJ)
    .union(UposSet::VERBAL)
    .union(UposSet::NOMINAL);

const INVERSION_SUBJECTS: [&str; 2] = ["nsubj", "expl"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceReport {
    pub sent_id: String,
    pub heads: usize,
    pub synthetic: usize,
    pub questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceFailure {
    pub sent_id: String,
    pub error: String,
    pub timed_out: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SentenceOutcome {
    Annotated(AnnotatedSentence),
    Failed(SentenceFailure),
}

/// Outcomes in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<SentenceOutcome>,
}

impl BatchReport {
    pub fn annotated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SentenceOutcome::Annotated(_)))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SentenceFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            SentenceOutcome::Failed(failure) => Some(failure),
            SentenceOutcome::Annotated(_) => None,
        })
    }

    pub fn timed_out(&self) -> usize {
        self.failures().filter(|f| f.timed_out).count()
    }
}

/// One engine, parameterised by a language profile.
#[derive(Debug, Clone)]
pub struct Annotator {
    profile: Arc<LanguageProfile>,
}

impl Annotator {
    pub fn new(profile: LanguageProfile) -> Self {
        Self { profile: Arc::new(profile) }
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Builds the feature layer of `sentence` in place.
    pub fn annotate(&self, sentence: &mut Sentence, oracle: &mut dyn Oracle) -> Result<SentenceReport> {
        let mut report = SentenceReport { sent_id: sentence.sent_id().to_string(), ..Default::default() };

        // 1. Traversal order, deepest heads first
        let order = span(sentence)?;

        // 2. Heads
        for pair in &order {
            if pair.head.is_root() {
                continue;
            }
            self.apply_head(sentence, pair, oracle, &mut report)?;
            report.heads += 1;
        }

        // 3. Synthetic nodes, untouched content words, scratch data
        sentence.splice_pending();
        finalise(&self.profile, sentence)?;
        sentence.clear_fixed_lemmas();

        // 4. The content words must still form a tree
        verify_integrity(sentence)?;

        log::debug!(
            "{}: {} heads, {} placeholders, {} questions",
            report.sent_id,
            report.heads,
            report.synthetic,
            report.questions
        );
        Ok(report)
    }

    pub fn annotate_record(&self, record: SentenceRecord, oracle: &mut dyn Oracle) -> Result<AnnotatedSentence> {
        let mut sentence = Sentence::from_record(record)?;
        self.annotate(&mut sentence, oracle)?;
        Ok(sentence.to_record())
    }

    fn outcome(&self, record: SentenceRecord, oracle: &mut dyn Oracle) -> SentenceOutcome {
        let sent_id = record.sent_id.clone();
        match self.annotate_record(record, oracle) {
            Ok(annotated) => SentenceOutcome::Annotated(annotated),
            Err(err) => {
                log::error!("{}: {}", sent_id, err);
                SentenceOutcome::Failed(SentenceFailure {
                    sent_id,
                    error: err.to_string(),
                    timed_out: err.is_timeout(),
                })
            }
        }
    }

    /// Annotates independent sentences on a worker pool; `jobs == 0` uses
    /// rayon's default. Questions to the oracle are serialised.
    pub fn annotate_batch<O>(&self, records: Vec<SentenceRecord>, oracle: O, jobs: usize) -> Result<BatchReport>
    where
        O: Oracle + Send,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|err| EngineError::WorkerPool(err.to_string()))?;
        let shared = SharedOracle::new(oracle);

        let outcomes: Vec<SentenceOutcome> = pool.install(|| {
            records
                .into_par_iter()
                .map(|record| {
                    let mut handle = &shared;
                    self.outcome(record, &mut handle)
                })
                .collect()
        });

        let report = BatchReport { outcomes };
        log::info!(
            "{} sentences annotated, {} failed ({} timed out)",
            report.annotated(),
            report.failures().count(),
            report.timed_out()
        );
        Ok(report)
    }

    fn apply_head(
        &self,
        sentence: &mut Sentence,
        pair: &HeadChildren,
        oracle: &mut dyn Oracle,
        report: &mut SentenceReport,
    ) -> Result<()> {
        let head = sentence
            .node(pair.head)
            .ok_or(msf_tree::TreeError::UnknownNode(pair.head))?;
        let children: Vec<Node> = pair.children.iter().filter_map(|id| sentence.node(*id)).collect();
        log::debug!("{}: head {} {:?} with {} dependents", sentence.sent_id(), head.id, head.form, children.len());

        let class = classify(&self.profile, &head, &children)?;
        if let Some(lemma) = &class.fixed_lemma {
            sentence.set_fixed_lemma(head.id, lemma.clone())?;
        }

        let verbal = head.is(UposSet::VERBAL);
        let mut bundle = if verbal { FeatureMap::new() } else { head.feats.clone() };

        // 1. Auxiliaries
        if !class.tam.is_empty() {
            let first_subject = children
                .iter()
                .filter(|c| INVERSION_SUBJECTS.contains(&c.base_relation()))
                .map(|c| c.id)
                .min();
            let input = TamInput {
                head: &head,
                auxiliaries: &class.tam,
                first_subject,
                question_mark: class.question_mark,
                context: sentence.text().unwrap_or(""),
            };
            bundle.extend(self.resolve_tam_with(&input, oracle, report)?);

            for (name, default) in [(MOOD, "Ind"), (POLARITY, "Pos"), (VERB_FORM, "Fin")] {
                let entry = bundle.entry(name.to_string()).or_default();
                if entry.is_empty() {
                    *entry = default.to_string();
                }
            }
        }

        // 2. Relations
        if !class.relational.is_empty() {
            let dependents: Vec<Relational> = class
                .relational
                .iter()
                .map(|node| Relational::from_node(node, sentence.fixed_lemma(node.id)))
                .collect();
            let feats = resolve_relations(&self.profile, head.id, verbal, is_clausal(&head.deprel), &dependents)?;
            bundle.extend(feats);
        }

        let mut content = class.content.clone();
        let mut consumed: Vec<NodeId> = class.consumed().map(|node| node.id).collect();

        // 3. Verbal heads: inherited values and the placeholder subject
        if verbal {
            for name in VERBAL_TAM {
                if !bundle.contains_key(name) {
                    if let Some(value) = head.feat(name) {
                        bundle.insert(name.to_string(), value.to_string());
                    }
                }
            }
            bundle.entry(VOICE.to_string()).or_insert_with(|| "Act".to_string());

            match subject::exclusion(self.profile.subject_policy(), &head, &bundle, &content) {
                Some(reason) => log::debug!("head {}: no placeholder subject, {}", head.id, reason),
                None => {
                    if let Some(agreement) = subject::agreement(&head, &class.tam) {
                        let id = sentence.push_synthetic(head.id, "nsubj", agreement)?;
                        log::debug!("head {}: placeholder subject {}", head.id, id);
                        report.synthetic += 1;
                    }
                }
            }
        // 4. Nominal and modifier heads: degree and determiners
        } else if head.is(UposSet::MODIFIABLE) {
            let outcome = resolve_determiners(
                &self.profile,
                &head,
                &mut bundle,
                &class.degree,
                &class.determiners,
                &content,
            );
            consumed.extend(outcome.consumed);
            content.extend(
                class
                    .determiners
                    .iter()
                    .filter(|det| outcome.returned.contains(&det.id))
                    .cloned(),
            );
        }

        bundle.retain(|_, value| !value.is_empty());
        for (name, value) in &bundle {
            log::debug!("head {}: {}={}", head.id, name, value);
        }
        sentence.set_bundle(head.id, FeatureBundle::Features(bundle))?;

        // 5. Dependents. A consumed word that headed a fixed expression comes
        // back with an empty map and is still a function word.
        for id in consumed {
            let bare = sentence
                .bundle(id)
                .as_ref()
                .map_or(true, |bundle| bundle.features().map_or(false, |feats| feats.is_empty()));
            if bare {
                sentence.set_bundle(id, FeatureBundle::Empty)?;
            }
        }
        for child in &content {
            if child.is(CONTENT_DEPENDENT) && !sentence.is_decided(child.id) {
                sentence.set_bundle(child.id, FeatureBundle::Features(child.feats.clone()))?;
            }
        }
        Ok(())
    }

    /// Re-runs the pure resolver until it stops asking.
    fn resolve_tam_with(
        &self,
        input: &TamInput<'_>,
        oracle: &mut dyn Oracle,
        report: &mut SentenceReport,
    ) -> Result<FeatureMap> {
        let head = input.head.id;
        let mut answers = Answers::new();

        loop {
            let point = match resolve_tam(&self.profile, input, &answers)? {
                Resolution::Resolved(feats) => return Ok(feats),
                Resolution::Pending(point) => point,
            };

            if answers.len() >= MAX_DECISIONS || answers.contains_key(&point.kind) {
                return Err(EngineError::AmbiguityUnresolved {
                    head,
                    source: OracleError::TooManyQuestions(MAX_DECISIONS),
                });
            }

            let choice = oracle
                .decide(&point)
                .map_err(|source| EngineError::AmbiguityUnresolved { head, source })?;
            if !point.options.contains(&choice) {
                return Err(EngineError::AmbiguityUnresolved {
                    head,
                    source: OracleError::OutOfRange { answer: choice, options: point.options },
                });
            }

            log::debug!("head {}: {:?} answered {:?}", head, point.kind, choice);
            report.questions += 1;
            answers.insert(point.kind, choice);
        }
    }
}

/// Content words nobody decided keep their morphology; the rest are function words.
fn finalise(profile: &LanguageProfile, sentence: &mut Sentence) -> Result<()> {
    for node in sentence.nodes() {
        if sentence.is_synthetic(node.id) || sentence.is_decided(node.id) {
            continue;
        }
        let bundle = if node.is(CONTENT_WORD) || profile.retains_morphology(node.upos, &node.deprel) {
            FeatureBundle::Features(node.feats)
        } else {
            FeatureBundle::Empty
        };
        sentence.set_bundle(node.id, bundle)?;
    }
    Ok(())
}
