pub mod components;
pub mod error;
pub mod feats;
pub mod record;
pub mod systems;

use std::collections::HashMap;

use hecs::{Entity, World};
use msf_protocol::{FeatureMap, NodeId, Upos, UposSet};

use components::{base_relation, FeatureBundle, FixedLemma, Morphology, Syntax, Synthetic, TokenData};
pub use error::{FeatsError, TreeError};
use record::{AnnotatedSentence, AnnotatedToken, SentenceRecord, TokenRecord};

/// Owned view of one node, handed to the resolvers.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub form: String,
    pub lemma: String,
    pub upos: Option<Upos>,
    pub feats: FeatureMap,
    pub head: NodeId,
    pub deprel: String,
}

impl Node {
    pub fn is(&self, class: UposSet) -> bool {
        class.has(self.upos)
    }

    pub fn base_relation(&self) -> &str {
        base_relation(&self.deprel)
    }

    pub fn feat(&self, name: &str) -> Option<&str> {
        self.feats.get(name).map(String::as_str)
    }
}

struct PendingInsertion {
    entity: Entity,
    after: NodeId,
}

/// One sentence: the source tokens plus the feature layer being built on top.
///
/// Nodes are hecs entities; `order` keeps the linear order and `by_id` the
/// address lookup. Synthetic nodes are spawned immediately but only enter the
/// linear order when [`Sentence::splice_pending`] runs.
pub struct Sentence {
    sent_id: String,
    text: Option<String>,
    world: World,
    order: Vec<Entity>,
    by_id: HashMap<NodeId, Entity>,
    pending: Vec<PendingInsertion>,
}

impl Sentence {
    pub fn new(sent_id: impl Into<String>) -> Self {
        Self {
            sent_id: sent_id.into(),
            text: None,
            world: World::new(),
            order: Vec::new(),
            by_id: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Builds the arena from a record and checks that every head exists.
    pub fn from_record(record: SentenceRecord) -> Result<Self, TreeError> {
        let mut sentence = Sentence::new(record.sent_id);
        sentence.text = record.text;

        for token in record.tokens {
            sentence.add_token(
                TokenData {
                    id: token.id,
                    form: token.form,
                    lemma: token.lemma,
                    upos: token.upos,
                    xpos: token.xpos,
                    misc: token.misc,
                },
                token.feats,
                token.head,
                &token.deprel,
            )?;
        }

        sentence.check_heads()?;
        Ok(sentence)
    }

    /// Expose the inner hecs World for the engine systems
    pub fn inner(&self) -> &World {
        &self.world
    }

    pub fn sent_id(&self) -> &str {
        &self.sent_id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Add a node at the end of the linear order
    pub fn add_token(
        &mut self,
        data: TokenData,
        feats: FeatureMap,
        head: NodeId,
        deprel: &str,
    ) -> Result<Entity, TreeError> {
        let id = data.id;
        if id.is_root() || self.by_id.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }

        let entity = self.world.spawn((
            data,
            Morphology { feats },
            Syntax { head, deprel: deprel.to_string() },
        ));
        self.order.push(entity);
        self.by_id.insert(id, entity);
        Ok(entity)
    }

    pub fn check_heads(&self) -> Result<(), TreeError> {
        for node in self.nodes() {
            if !node.head.is_root() && !self.by_id.contains_key(&node.head) {
                return Err(TreeError::UnknownHead { node: node.id, head: node.head });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn entity(&self, id: NodeId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    /// Node ids in linear order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .filter_map(|e| self.world.get::<&TokenData>(*e).ok().map(|t| t.id))
            .collect()
    }

    fn snapshot(&self, entity: Entity) -> Option<Node> {
        let data = self.world.get::<&TokenData>(entity).ok()?;
        let morph = self.world.get::<&Morphology>(entity).ok()?;
        let syntax = self.world.get::<&Syntax>(entity).ok()?;
        Some(Node {
            id: data.id,
            form: data.form.clone(),
            lemma: data.lemma.clone(),
            upos: data.upos,
            feats: morph.feats.clone(),
            head: syntax.head,
            deprel: syntax.deprel.clone(),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.entity(id).and_then(|e| self.snapshot(e))
    }

    /// Snapshots of every node in linear order.
    pub fn nodes(&self) -> Vec<Node> {
        self.order.iter().filter_map(|e| self.snapshot(*e)).collect()
    }

    pub fn bundle(&self, id: NodeId) -> Option<FeatureBundle> {
        let entity = self.entity(id)?;
        self.world.get::<&FeatureBundle>(entity).ok().map(|b| (*b).clone())
    }

    pub fn is_decided(&self, id: NodeId) -> bool {
        self.entity(id)
            .map_or(false, |e| self.world.get::<&FeatureBundle>(e).is_ok())
    }

    pub fn set_bundle(&mut self, id: NodeId, bundle: FeatureBundle) -> Result<(), TreeError> {
        let entity = self.entity(id).ok_or(TreeError::UnknownNode(id))?;
        self.world
            .insert_one(entity, bundle)
            .map_err(|_| TreeError::UnknownNode(id))
    }

    pub fn set_fixed_lemma(&mut self, id: NodeId, lemma: String) -> Result<(), TreeError> {
        let entity = self.entity(id).ok_or(TreeError::UnknownNode(id))?;
        self.world
            .insert_one(entity, FixedLemma(lemma))
            .map_err(|_| TreeError::UnknownNode(id))
    }

    pub fn fixed_lemma(&self, id: NodeId) -> Option<String> {
        let entity = self.entity(id)?;
        self.world.get::<&FixedLemma>(entity).ok().map(|f| f.0.clone())
    }

    /// Drops the per-sentence fixed-expression scratch data.
    pub fn clear_fixed_lemmas(&mut self) {
        let tagged: Vec<Entity> = self
            .world
            .query::<&FixedLemma>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in tagged {
            let _ = self.world.remove_one::<FixedLemma>(entity);
        }
    }

    /// Spawns a placeholder dependent of `head` and returns its id.
    ///
    /// The id takes the first free `sub` of the head's word. The node stays out
    /// of the linear order until [`Sentence::splice_pending`].
    pub fn push_synthetic(
        &mut self,
        head: NodeId,
        deprel: &str,
        feats: FeatureMap,
    ) -> Result<NodeId, TreeError> {
        if !head.is_root() && !self.contains(head) {
            return Err(TreeError::UnknownNode(head));
        }

        let mut sub = 1u16;
        while self.by_id.contains_key(&NodeId::synthetic(head.word.0, sub)) {
            sub += 1;
        }
        let id = NodeId::synthetic(head.word.0, sub);

        let entity = self.world.spawn((
            TokenData {
                id,
                form: "-".to_string(),
                lemma: "-".to_string(),
                upos: None,
                xpos: None,
                misc: None,
            },
            Morphology::default(),
            Syntax { head, deprel: deprel.to_string() },
            FeatureBundle::Features(feats),
            Synthetic,
        ));
        self.by_id.insert(id, entity);
        self.pending.push(PendingInsertion { entity, after: head });
        Ok(id)
    }

    /// Moves pending synthetic nodes into the linear order, latest first.
    /// Returns how many were inserted.
    pub fn splice_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();

        for insertion in pending.into_iter().rev() {
            let id = match self.world.get::<&TokenData>(insertion.entity) {
                Ok(data) => data.id,
                Err(_) => continue,
            };

            // 1. Right after the node it follows (or at the start for the root)
            let mut pos = self
                .by_id
                .get(&insertion.after)
                .and_then(|after| self.order.iter().position(|e| e == after))
                .map_or(0, |p| p + 1);

            // 2. Skip earlier synthetic siblings so ids stay sorted
            while pos < self.order.len() {
                let next = self.world.get::<&TokenData>(self.order[pos]).map(|t| t.id);
                match next {
                    Ok(next_id) if next_id < id => pos += 1,
                    _ => break,
                }
            }

            self.order.insert(pos, insertion.entity);
        }
        count
    }

    pub fn is_synthetic(&self, id: NodeId) -> bool {
        self.entity(id)
            .map_or(false, |e| self.world.get::<&Synthetic>(e).is_ok())
    }

    /// Output record; undecided nodes print as function words.
    pub fn to_record(&self) -> AnnotatedSentence {
        let tokens = self
            .order
            .iter()
            .filter_map(|entity| {
                let data = self.world.get::<&TokenData>(*entity).ok()?;
                let morph = self.world.get::<&Morphology>(*entity).ok()?;
                let syntax = self.world.get::<&Syntax>(*entity).ok()?;
                let ms_feats = self
                    .world
                    .get::<&FeatureBundle>(*entity)
                    .map(|b| b.to_string())
                    .unwrap_or_else(|_| "_".to_string());

                Some(AnnotatedToken {
                    token: TokenRecord {
                        id: data.id,
                        form: data.form.clone(),
                        lemma: data.lemma.clone(),
                        upos: data.upos,
                        xpos: data.xpos.clone(),
                        feats: morph.feats.clone(),
                        head: syntax.head,
                        deprel: syntax.deprel.clone(),
                        misc: data.misc.clone(),
                    },
                    ms_feats,
                })
            })
            .collect();

        AnnotatedSentence {
            sent_id: self.sent_id.clone(),
            text: self.text.clone(),
            tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: u32, lemma: &str, upos: Upos, head: u32, deprel: &str) -> TokenRecord {
        TokenRecord {
            id: NodeId::word(id),
            form: lemma.to_string(),
            lemma: lemma.to_string(),
            upos: Some(upos),
            xpos: None,
            feats: FeatureMap::new(),
            head: NodeId::word(head),
            deprel: deprel.to_string(),
            misc: None,
        }
    }

    fn she_sleeps() -> Sentence {
        Sentence::from_record(SentenceRecord {
            sent_id: "s1".to_string(),
            text: Some("sleeps .".to_string()),
            tokens: vec![
                token(1, "sleep", Upos::Verb, 0, "root"),
                token(2, ".", Upos::Punct, 1, "punct"),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_unknown_head_is_rejected() {
        let result = Sentence::from_record(SentenceRecord {
            sent_id: "bad".to_string(),
            text: None,
            tokens: vec![token(1, "go", Upos::Verb, 7, "root")],
        });
        assert!(matches!(result, Err(TreeError::UnknownHead { .. })));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let result = Sentence::from_record(SentenceRecord {
            sent_id: "dup".to_string(),
            text: None,
            tokens: vec![
                token(1, "go", Upos::Verb, 0, "root"),
                token(1, "went", Upos::Verb, 0, "root"),
            ],
        });
        assert_eq!(result.err(), Some(TreeError::DuplicateId(NodeId::word(1))));
    }

    #[test]
    fn test_synthetic_node_is_spliced_after_head() {
        let mut sentence = she_sleeps();
        let id = sentence
            .push_synthetic(NodeId::word(1), "nsubj", FeatureMap::new())
            .unwrap();
        assert_eq!(id, NodeId::synthetic(1, 1));

        // Not in the linear order yet
        assert_eq!(sentence.len(), 2);

        assert_eq!(sentence.splice_pending(), 1);
        assert_eq!(
            sentence.ids(),
            vec![NodeId::word(1), NodeId::synthetic(1, 1), NodeId::word(2)]
        );
        assert!(sentence.is_synthetic(id));
    }

    #[test]
    fn test_undecided_nodes_print_as_function_words() {
        let mut sentence = she_sleeps();
        sentence
            .set_bundle(NodeId::word(1), FeatureBundle::Features(FeatureMap::new()))
            .unwrap();

        let record = sentence.to_record();
        assert_eq!(record.tokens[0].ms_feats, "|");
        assert_eq!(record.tokens[1].ms_feats, "_");
    }

    #[test]
    fn test_fixed_lemmas_are_scratch() {
        let mut sentence = she_sleeps();
        sentence.set_fixed_lemma(NodeId::word(1), "as well as".to_string()).unwrap();
        assert_eq!(sentence.fixed_lemma(NodeId::word(1)).as_deref(), Some("as well as"));

        sentence.clear_fixed_lemmas();
        assert_eq!(sentence.fixed_lemma(NodeId::word(1)), None);
    }
}
