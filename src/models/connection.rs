use super::map_node::{MapNode, NodeId};
use super::navigation_path::NavigationPath;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A view-only link between two nodes of the displayed map, backed by a recorded path.
///
/// The id is the backing path's id; deleting a connection means deleting that path.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub node_a_id: NodeId,
    pub node_b_id: NodeId,
    pub label: String,
    pub created_at: DateTime<Utc>,
    /// The backing path is registered but nobody has walked it yet
    pub awaiting_recording: bool,
}

impl Connection {
    #[must_use]
    pub fn involves(&self, node_id: &NodeId) -> bool {
        &self.node_a_id == node_id || &self.node_b_id == node_id
    }
}

/// Derive the connections visible on a map from every recorded path.
///
/// A path becomes a connection iff both its start and end ids name a node in
/// `nodes`. Output follows path order.
#[must_use]
pub fn derive_connections(nodes: &[MapNode], paths: &[NavigationPath]) -> Vec<Connection> {
    let index: IndexMap<NodeId, MapNode> = nodes
        .iter()
        .map(|node| (node.id.clone(), node.clone()))
        .collect();
    derive_connections_indexed(&index, paths)
}

/// Same as [`derive_connections`] for nodes already keyed by id.
#[must_use]
pub fn derive_connections_indexed(
    nodes: &IndexMap<NodeId, MapNode>,
    paths: &[NavigationPath],
) -> Vec<Connection> {
    let mut connections = Vec::with_capacity(paths.len());
    let mut dropped = 0usize;

    for path in paths {
        let (Some(start), Some(end)) = (
            nodes.get(&path.start_location_id),
            nodes.get(&path.end_location_id),
        ) else {
            dropped += 1;
            continue;
        };

        connections.push(Connection {
            id: path.id.clone(),
            node_a_id: start.id.clone(),
            node_b_id: end.id.clone(),
            label: format!("Path: {}", path.name),
            created_at: path.created_at,
            awaiting_recording: path.waypoints.is_empty(),
        });
    }

    crate::log!(
        "Derived {} connections from {} paths ({} belong elsewhere)",
        connections.len(),
        paths.len(),
        dropped
    );

    connections
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).single().expect("valid date")
    }

    fn nodes() -> Vec<MapNode> {
        vec![
            MapNode::new("a", "m1", "Entrance", (10.0, 10.0)),
            MapNode::new("b", "m1", "Reception", (100.0, 10.0)),
            MapNode::new("c", "m1", "Lift", (100.0, 80.0)),
        ]
    }

    fn paths() -> Vec<NavigationPath> {
        vec![
            NavigationPath::new("p1", "Entrance to Reception", "a", "b", at(9)),
            NavigationPath::new("p2", "Other floor", "a", "z", at(10)),
            NavigationPath::new("p3", "Reception to Lift", "B", " c ", at(11)),
            NavigationPath::new("p4", "Basement", "x", "y", at(12)),
        ]
    }

    #[test]
    fn test_only_fully_resolved_paths_become_connections() {
        let connections = derive_connections(&nodes(), &paths());

        let ids: Vec<&str> = connections.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(connections[1].node_a_id, NodeId::new("b"));
        assert_eq!(connections[1].node_b_id, NodeId::new("c"));
    }

    #[test]
    fn test_connection_carries_label_and_timestamp() {
        let connections = derive_connections(&nodes(), &paths());
        assert_eq!(connections[0].label, "Path: Entrance to Reception");
        assert_eq!(connections[0].created_at, at(9));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first = derive_connections(&nodes(), &paths());
        let second = derive_connections(&nodes(), &paths());
        assert_eq!(first, second);
    }

    #[test]
    fn test_removing_endpoint_drops_connection() {
        let mut remaining = nodes();
        remaining.retain(|n| n.id != NodeId::new("c"));

        let connections = derive_connections(&remaining, &paths());
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].id, "p1");
    }

    #[test]
    fn test_missing_either_endpoint_produces_nothing() {
        let only_start = vec![MapNode::new("a", "m1", "Entrance", (0.0, 0.0))];
        let path = vec![NavigationPath::new("p1", "A to B", "a", "b", at(9))];
        assert!(derive_connections(&only_start, &path).is_empty());

        let only_end = vec![MapNode::new("b", "m1", "Reception", (0.0, 0.0))];
        assert!(derive_connections(&only_end, &path).is_empty());
    }

    #[test]
    fn test_path_without_waypoints_awaits_recording() {
        let mut walked = NavigationPath::new("p1", "Entrance to Reception", "a", "b", at(9));
        walked.waypoints.push(crate::models::Waypoint { sequence: 0, heading: Some(90.0), embedding: None });
        let registered = NavigationPath::new("p2", "Entrance to Lift", "a", "c", at(10));

        let connections = derive_connections(&nodes(), &[walked, registered]);
        assert!(!connections[0].awaiting_recording);
        assert!(connections[1].awaiting_recording);
    }

    #[test]
    fn test_involves() {
        let connections = derive_connections(&nodes(), &paths());
        assert!(connections[0].involves(&NodeId::new("a")));
        assert!(!connections[0].involves(&NodeId::new("c")));
    }
}
