use msf_protocol::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatsError {
    #[error("malformed feature string {0:?}")]
    Invalid(String),
}

/// Structural problems with a sentence. Any of these is fatal for the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),

    #[error("node {node} points at unknown head {head}")]
    UnknownHead { node: NodeId, head: NodeId },

    #[error("no node with id {0}")]
    UnknownNode(NodeId),

    #[error("dependency cycle through node {0}")]
    Cycle(NodeId),

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),

    #[error("head {0} is scheduled after the head that consumes it")]
    HeadAfterChild(NodeId),

    #[error("node {node} keeps features but its head {head} was stripped")]
    Disconnected { node: NodeId, head: NodeId },

    #[error(transparent)]
    Feats(#[from] FeatsError),
}
