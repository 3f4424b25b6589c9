use super::map_node::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured step of a recorded route.
///
/// The contents are produced and consumed by the mobile recorder; the editor only
/// counts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub sequence: u32,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

/// A route recorded between two location nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationPath {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    pub start_location_id: NodeId,
    pub end_location_id: NodeId,
    pub created_at: DateTime<Utc>,
}

impl NavigationPath {
    #[must_use]
    pub fn new(
        id: &str,
        name: &str,
        start_location_id: impl Into<NodeId>,
        end_location_id: impl Into<NodeId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            waypoints: Vec::new(),
            start_location_id: start_location_id.into(),
            end_location_id: end_location_id.into(),
            created_at,
        }
    }

    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }
}
