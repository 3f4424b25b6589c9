use super::error::BackendError;
use crate::models::{FloorMap, MapNode, NavigationPath, NodeId, NodeUpdate};

/// Remote store of maps, nodes and recorded paths
#[allow(async_fn_in_trait)]
pub trait MapBackend {
    /// List every floor map
    async fn fetch_maps(&self) -> Result<Vec<FloorMap>, BackendError>;

    /// Load one floor map
    async fn fetch_map(&self, map_id: &str) -> Result<FloorMap, BackendError>;

    /// Load the nodes placed on a map
    async fn fetch_map_nodes(&self, map_id: &str) -> Result<Vec<MapNode>, BackendError>;

    /// Load every recorded path, across all maps
    async fn fetch_navigation_paths(&self) -> Result<Vec<NavigationPath>, BackendError>;

    async fn delete_navigation_path(&self, path_id: &str) -> Result<(), BackendError>;

    async fn delete_map_node(&self, node_id: &NodeId) -> Result<(), BackendError>;

    async fn update_map_node(&self, update: &NodeUpdate) -> Result<(), BackendError>;
}

/// The two endpoints handed to the path recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecordingRequest {
    pub start_node_id: NodeId,
    pub start_name: String,
    pub end_node_id: NodeId,
    pub end_name: String,
}

impl PathRecordingRequest {
    #[must_use]
    pub fn default_path_name(&self) -> String {
        format!("{} → {}", self.start_name, self.end_name)
    }
}

/// Records a route between two nodes.
///
/// `Ok(None)` means the recording was abandoned and nothing changed.
#[allow(async_fn_in_trait)]
pub trait PathRecorder {
    async fn record(&self, request: &PathRecordingRequest) -> Result<Option<NavigationPath>, BackendError>;
}
