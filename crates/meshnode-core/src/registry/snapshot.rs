//! Immutable registry snapshots

use std::sync::Arc;

use crate::node::NodeRecord;
use crate::types::NodeNum;

/// Point-in-time view of the registry, in insertion order
///
/// Snapshots share records with the registry; a later update swaps in a new
/// record and never touches the ones a snapshot already holds.
#[derive(Debug, Clone, Default)]
pub struct NodeSnapshot {
    nodes: Arc<Vec<Arc<NodeRecord>>>,
}

impl NodeSnapshot {
    pub(crate) fn new(nodes: Vec<Arc<NodeRecord>>) -> Self {
        Self {
            nodes: Arc::new(nodes),
        }
    }

    pub fn get(&self, num: NodeNum) -> Option<Arc<NodeRecord>> {
        self.nodes.iter().find(|n| n.num() == num).cloned()
    }

    /// All records in insertion order
    pub fn all(&self) -> Vec<Arc<NodeRecord>> {
        self.nodes.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<NodeRecord>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Records with `own` moved to the front
    pub fn reindex_local_first(&self, own: NodeNum) -> Vec<Arc<NodeRecord>> {
        local_first(&self.nodes, own)
    }

    /// Node list order: `own` first, the rest by most recently heard
    pub fn display_order(&self, own: Option<NodeNum>) -> Vec<Arc<NodeRecord>> {
        display_order(&self.nodes, own)
    }
}

/// Move the record for `own` to the front, keeping the others in order
pub(crate) fn local_first(nodes: &[Arc<NodeRecord>], own: NodeNum) -> Vec<Arc<NodeRecord>> {
    let (mut first, rest): (Vec<_>, Vec<_>) =
        nodes.iter().cloned().partition(|n| n.num() == own);
    first.extend(rest);
    first
}

/// Local first, then everything after the head sorted by `last_heard`
/// descending. Without a local node the head keeps its place as well.
pub(crate) fn display_order(nodes: &[Arc<NodeRecord>], own: Option<NodeNum>) -> Vec<Arc<NodeRecord>> {
    let mut ordered = match own {
        Some(own) => local_first(nodes, own),
        None => nodes.to_vec(),
    };
    if ordered.len() > 1 {
        ordered[1..].sort_by(|a, b| b.last_heard().cmp(&a.last_heard()));
    }
    ordered
}
