use std::collections::HashSet;

use msf_protocol::NodeId;

use crate::components::{FeatureBundle, TokenData};
use crate::{Sentence, TreeError};

/// Every node that kept features must still hang from a node that kept
/// features (or from the root).
pub fn verify_integrity(sentence: &Sentence) -> Result<(), TreeError> {
    let world = sentence.inner();

    // 1. Surviving set
    let mut surviving: HashSet<NodeId> = world
        .query::<(&TokenData, &FeatureBundle)>()
        .iter()
        .filter(|(_, (_, bundle))| bundle.is_content())
        .map(|(_, (data, _))| data.id)
        .collect();
    surviving.insert(NodeId::ROOT);

    // 2. Heads, in linear order so the first offender is reported
    for node in sentence.nodes() {
        if surviving.contains(&node.id) && !surviving.contains(&node.head) {
            return Err(TreeError::Disconnected { node: node.id, head: node.head });
        }
    }
    Ok(())
}
