//! Node Registry
//!
//! Holds exactly one record per node number, in the order nodes were first
//! seen. The registry has a single writer (`&mut self`); readers get shared
//! `Arc<NodeRecord>` values, immutable [`NodeSnapshot`]s through a `watch`
//! channel, and [`NodeChange`] notifications through a `broadcast` channel.
//!
//! Updates are copy-on-write: the current record is cloned, the update is
//! applied to the clone, and the new `Arc` replaces the old one. A reader
//! holding the old `Arc` keeps seeing the complete previous version.

pub mod snapshot;
pub mod update;

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace, warn};

use crate::anonymize::Anonymized;
use crate::node::NodeRecord;
use crate::persist::NodeRow;
use crate::types::{NodeNum, Timestamp};
use crate::wire::MeshEvent;

pub use snapshot::NodeSnapshot;
pub use update::{NodeChange, NodeUpdate};

/// Change notifications kept for slow subscribers before the oldest are dropped
pub const DEFAULT_CHANGE_CAPACITY: usize = 256;

pub type ChangeReceiver = broadcast::Receiver<NodeChange>;
pub type SnapshotReceiver = watch::Receiver<NodeSnapshot>;

// ----------------------------------------------------------------------------
// Registry Statistics
// ----------------------------------------------------------------------------

/// Counts over the current registry contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_nodes: usize,
    pub online_nodes: usize,
    pub with_identity: usize,
    pub with_valid_position: usize,
    pub with_device_metrics: usize,
    pub with_environment_metrics: usize,
}

// ----------------------------------------------------------------------------
// Node Registry
// ----------------------------------------------------------------------------

/// The live set of node records
#[derive(Debug)]
pub struct NodeRegistry {
    nodes: HashMap<NodeNum, Arc<NodeRecord>>,
    /// Node numbers in first-seen order
    order: Vec<NodeNum>,
    changes: broadcast::Sender<NodeChange>,
    snapshots: watch::Sender<NodeSnapshot>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::with_change_capacity(DEFAULT_CHANGE_CAPACITY)
    }

    /// Create an empty registry whose change channel buffers `capacity` entries
    pub fn with_change_capacity(capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(capacity.max(1));
        let (snapshots, _) = watch::channel(NodeSnapshot::default());
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            changes,
            snapshots,
        }
    }

    /// Rebuild a registry from persisted rows, keeping row order
    ///
    /// The rows are stored first and one snapshot is published at the end.
    pub fn from_rows<I: IntoIterator<Item = NodeRow>>(rows: I) -> Self {
        let mut registry = Self::new();
        for row in rows {
            let (num, update) = row.into_update();
            registry.store(num, &update);
        }
        registry.publish_snapshot();
        info!("Loaded {} nodes from persisted rows", registry.len());
        registry
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Create the record for `num` if unseen, then apply the parts `update` carries
    pub fn upsert(&mut self, num: NodeNum, update: NodeUpdate) -> NodeChange {
        let change = self.store(num, &update);

        // No subscribers is not an error
        let _ = self.changes.send(change);
        self.publish_snapshot();
        change
    }

    /// Swap in the next version of the record without notifying anyone
    fn store(&mut self, num: NodeNum, update: &NodeUpdate) -> NodeChange {
        match self.nodes.get_mut(&num) {
            Some(current) => {
                *current = Arc::new(current.with_update(update));
                debug!("Updated node {:?}", current);
                NodeChange::Updated(num)
            }
            None => {
                let record = Arc::new(NodeRecord::new(num).with_update(update));
                info!("New node {} first seen", Anonymized(&num));
                debug!("Created node {:?}", record);
                self.nodes.insert(num, record);
                self.order.push(num);
                NodeChange::Added(num)
            }
        }
    }

    /// Apply a decoded event, using `now` for timestamps the sender left out
    pub fn apply(&mut self, event: &MeshEvent, now: Timestamp) -> NodeChange {
        let num = event.num();
        let update = event.to_update(now);

        if let Some(position) = &update.position {
            if !position.is_valid() {
                warn!(
                    "Position for node {} is out of range, stored as invalid",
                    Anonymized(&num)
                );
            }
        }

        trace!("Applying {} event to node {}", event.kind(), Anonymized(&num));
        self.upsert(num, update)
    }

    fn publish_snapshot(&self) {
        let snapshot = NodeSnapshot::new(self.all());
        trace!("Publishing snapshot of {} nodes", snapshot.len());
        self.snapshots.send_replace(snapshot);
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn get(&self, num: NodeNum) -> Option<Arc<NodeRecord>> {
        self.nodes.get(&num).cloned()
    }

    /// All records in insertion order
    pub fn all(&self) -> Vec<Arc<NodeRecord>> {
        self.order
            .iter()
            .filter_map(|num| self.nodes.get(num).cloned())
            .collect()
    }

    pub fn contains(&self, num: NodeNum) -> bool {
        self.nodes.contains_key(&num)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records with `own` moved to the front; the registry is not reordered
    pub fn reindex_local_first(&self, own: NodeNum) -> Vec<Arc<NodeRecord>> {
        snapshot::local_first(&self.all(), own)
    }

    /// Node list order: `own` first, the rest by most recently heard
    pub fn display_order(&self, own: Option<NodeNum>) -> Vec<Arc<NodeRecord>> {
        snapshot::display_order(&self.all(), own)
    }

    pub fn stats(&self, now: Timestamp) -> RegistryStats {
        let nodes = self.nodes.values();
        let mut stats = RegistryStats {
            total_nodes: self.nodes.len(),
            online_nodes: 0,
            with_identity: 0,
            with_valid_position: 0,
            with_device_metrics: 0,
            with_environment_metrics: 0,
        };
        for node in nodes {
            stats.online_nodes += node.is_online(now) as usize;
            stats.with_identity += node.user().is_some() as usize;
            stats.with_valid_position += node.valid_position().is_some() as usize;
            stats.with_device_metrics += node.device_metrics().is_some() as usize;
            stats.with_environment_metrics += node.environment_metrics().is_some() as usize;
        }
        stats
    }

    // ------------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------------

    /// Receive a [`NodeChange`] for every upsert from now on
    pub fn subscribe_changes(&self) -> ChangeReceiver {
        self.changes.subscribe()
    }

    /// Receive the latest snapshot whenever the registry changes
    pub fn watch_snapshots(&self) -> SnapshotReceiver {
        self.snapshots.subscribe()
    }

    /// The current snapshot
    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshots.borrow().clone()
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Current records in the persisted row layout, insertion order
    pub fn export_rows(&self) -> Vec<NodeRow> {
        self.all().iter().map(|node| NodeRow::from_record(node)).collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
