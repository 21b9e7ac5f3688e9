//! Partial record updates and change notifications

use serde::{Deserialize, Serialize};

use crate::telemetry::{DeviceMetrics, EnvironmentMetrics, LinkQuality, MeshUser, Position};
use crate::types::NodeNum;

/// The parts of a record one message carries
///
/// Absent parts leave the stored record untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    pub user: Option<MeshUser>,
    pub position: Option<Position>,
    pub device_metrics: Option<DeviceMetrics>,
    pub environment_metrics: Option<EnvironmentMetrics>,
    pub link_quality: Option<LinkQuality>,
}

impl NodeUpdate {
    pub fn identity(user: MeshUser) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn device_metrics(metrics: DeviceMetrics) -> Self {
        Self {
            device_metrics: Some(metrics),
            ..Self::default()
        }
    }

    pub fn environment_metrics(metrics: EnvironmentMetrics) -> Self {
        Self {
            environment_metrics: Some(metrics),
            ..Self::default()
        }
    }

    pub fn link_quality(link: LinkQuality) -> Self {
        Self {
            link_quality: Some(link),
            ..Self::default()
        }
    }

    /// Whether the update carries no part at all
    pub fn is_empty(&self) -> bool {
        self.user.is_none()
            && self.position.is_none()
            && self.device_metrics.is_none()
            && self.environment_metrics.is_none()
            && self.link_quality.is_none()
    }
}

/// Notification published after each upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeChange {
    /// First record for this node
    Added(NodeNum),
    /// An existing record was replaced by a newer version
    Updated(NodeNum),
}

impl NodeChange {
    pub fn num(&self) -> NodeNum {
        match self {
            NodeChange::Added(num) | NodeChange::Updated(num) => *num,
        }
    }
}
