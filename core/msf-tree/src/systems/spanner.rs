use std::collections::{HashMap, HashSet, VecDeque};

use msf_protocol::NodeId;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::{Sentence, TreeError};

/// A head and its direct dependents, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadChildren {
    pub head: NodeId,
    pub children: Vec<NodeId>,
}

/// Head -> dependent graph rooted at [`NodeId::ROOT`].
pub fn dependency_graph(
    sentence: &Sentence,
) -> Result<(DiGraph<NodeId, ()>, HashMap<NodeId, NodeIndex>), TreeError> {
    let mut graph = DiGraph::new();
    let mut index = HashMap::new();

    index.insert(NodeId::ROOT, graph.add_node(NodeId::ROOT));
    let nodes = sentence.nodes();
    for node in &nodes {
        index.insert(node.id, graph.add_node(node.id));
    }

    for node in &nodes {
        let head = *index
            .get(&node.head)
            .ok_or(TreeError::UnknownHead { node: node.id, head: node.head })?;
        graph.add_edge(head, index[&node.id], ());
    }

    Ok((graph, index))
}

/// Processing order for the engine: every head with its dependents, deepest
/// heads first, so a head is handled before the head that consumes it.
pub fn span(sentence: &Sentence) -> Result<Vec<HeadChildren>, TreeError> {
    let (graph, index) = dependency_graph(sentence)?;

    // 1. Structural checks
    if let Err(cycle) = toposort(&graph, None) {
        return Err(TreeError::Cycle(graph[cycle.node_id()]));
    }

    // 2. Breadth-first expansion from the root
    let mut pairs = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([index[&NodeId::ROOT]]);
    visited.insert(NodeId::ROOT);

    while let Some(current) = queue.pop_front() {
        let mut children: Vec<NodeIndex> =
            graph.neighbors_directed(current, Direction::Outgoing).collect();
        if children.is_empty() {
            continue;
        }
        children.sort_by_key(|child| graph[*child]);

        pairs.push(HeadChildren {
            head: graph[current],
            children: children.iter().map(|child| graph[*child]).collect(),
        });
        for child in children {
            visited.insert(graph[child]);
            queue.push_back(child);
        }
    }

    if let Some(orphan) = sentence.ids().into_iter().find(|id| !visited.contains(id)) {
        return Err(TreeError::Unreachable(orphan));
    }

    // 3. Deepest first
    pairs.reverse();
    verify_span(&pairs)?;

    log::trace!("{}: {} head-children pairs", sentence.sent_id(), pairs.len());
    Ok(pairs)
}

/// Checks that no head is scheduled after the expansion that lists it as a child.
pub fn verify_span(pairs: &[HeadChildren]) -> Result<(), TreeError> {
    let mut consumed = HashSet::new();
    for expansion in pairs {
        if consumed.contains(&expansion.head) {
            return Err(TreeError::HeadAfterChild(expansion.head));
        }
        consumed.extend(expansion.children.iter().copied());
    }
    Ok(())
}
