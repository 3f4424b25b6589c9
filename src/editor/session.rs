use super::connection_mode::{ConnectionMode, ModeNotice, SelectedNode};
use super::tap_routing::{self, HitTestConfig, TapOutcome};
use crate::api::{BackendError, PathRecordingRequest};
use crate::geometry::CanvasScale;
use crate::models::{derive_connections_indexed, Connection, FloorMap, MapNode, NavigationPath, NodeId, NodeUpdate};
use indexmap::IndexMap;

/// Identifies one load request; only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Everything fetched for one map-detail load
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub map: FloorMap,
    pub nodes: Vec<MapNode>,
    pub paths: Vec<NavigationPath>,
}

/// State behind one map-detail view.
///
/// Connections are always the join of `nodes` and `paths` and are rebuilt in
/// full whenever either changes.
#[derive(Debug, Clone, Default)]
pub struct MapEditorSession {
    map_id: String,
    map: Option<FloorMap>,
    nodes: IndexMap<NodeId, MapNode>,
    paths: Vec<NavigationPath>,
    connections: Vec<Connection>,
    mode: ConnectionMode,
    selected_connection: Option<String>,
    selected_node: Option<NodeId>,
    repositioning: Option<NodeId>,
    /// Nodes as they were before a local move the backend has not accepted yet
    unconfirmed_moves: IndexMap<NodeId, MapNode>,
    generation: u64,
    is_loading: bool,
}

impl MapEditorSession {
    #[must_use]
    pub fn for_map(map_id: &str) -> Self {
        Self {
            map_id: map_id.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    #[must_use]
    pub fn map(&self) -> Option<&FloorMap> {
        self.map.as_ref()
    }

    #[must_use]
    pub fn nodes(&self) -> &IndexMap<NodeId, MapNode> {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&MapNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn paths(&self) -> &[NavigationPath] {
        &self.paths
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[must_use]
    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn mode(&self) -> &ConnectionMode {
        &self.mode
    }

    #[must_use]
    pub fn selected_connection(&self) -> Option<&str> {
        self.selected_connection.as_deref()
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&MapNode> {
        self.selected_node.as_ref().and_then(|id| self.nodes.get(id))
    }

    #[must_use]
    pub fn repositioning(&self) -> Option<&NodeId> {
        self.repositioning.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Start a load; any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.is_loading = true;
        LoadTicket {
            generation: self.generation,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the result of the load identified by `ticket`.
    ///
    /// Returns `Ok(false)` without touching anything if a newer load has started.
    /// A failed load keeps the previous nodes, paths and connections.
    ///
    /// # Errors
    ///
    /// Returns the load's own error when the ticket is current.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MapSnapshot, BackendError>,
    ) -> Result<bool, BackendError> {
        if !self.is_current(ticket) {
            crate::log!(
                "Discarding stale load {} (current {})",
                ticket.generation,
                self.generation
            );
            return Ok(false);
        }

        self.is_loading = false;
        let snapshot = result?;

        self.map = Some(snapshot.map);
        self.nodes = snapshot
            .nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        self.paths = snapshot.paths;
        self.rederive();
        Ok(true)
    }

    /// Rebuild connections and drop any selection that no longer resolves.
    fn rederive(&mut self) {
        self.connections = derive_connections_indexed(&self.nodes, &self.paths);

        if let Some(id) = &self.selected_connection {
            if self.connection(id).is_none() {
                self.selected_connection = None;
            }
        }
        if self.selected_node.as_ref().is_some_and(|id| !self.nodes.contains_key(id)) {
            self.selected_node = None;
        }
        if self.repositioning.as_ref().is_some_and(|id| !self.nodes.contains_key(id)) {
            self.repositioning = None;
        }
        if let ConnectionMode::AwaitingEnd { start } = &self.mode {
            if !self.nodes.contains_key(&start.id) {
                self.mode = ConnectionMode::AwaitingStart;
            }
        }
    }

    pub fn toggle_connection_mode(&mut self) -> Option<ModeNotice> {
        let (mode, notice) = std::mem::take(&mut self.mode).toggle();
        self.mode = mode;
        self.selected_connection = None;
        self.selected_node = None;
        self.repositioning = None;
        notice
    }

    /// Handle a tap on a node marker.
    ///
    /// In connection mode the tap drives endpoint selection; otherwise it selects
    /// the node for editing. Unknown ids are ignored.
    pub fn tap_node(&mut self, node_id: &NodeId) -> Option<ModeNotice> {
        let node = self.nodes.get(node_id)?;
        let selected = SelectedNode {
            id: node.id.clone(),
            name: node.display_name(),
        };

        if self.mode.is_active() {
            let (mode, notice) = std::mem::take(&mut self.mode).tap_node(selected);
            self.mode = mode;
            return notice;
        }

        self.selected_connection = None;
        self.selected_node = Some(selected.id);
        None
    }

    /// Request handed to the recorder once both endpoints are confirmed
    #[must_use]
    pub fn recording_request(&self) -> Option<PathRecordingRequest> {
        self.mode.pending_pair().map(|(start, end)| PathRecordingRequest {
            start_node_id: start.id.clone(),
            start_name: start.name.clone(),
            end_node_id: end.id.clone(),
            end_name: end.name.clone(),
        })
    }

    /// Take the confirmed pair for the recorder and return to `AwaitingStart`
    pub fn take_recording_request(&mut self) -> Option<PathRecordingRequest> {
        let request = self.recording_request()?;
        self.finish_recording();
        Some(request)
    }

    pub fn cancel_recording(&mut self) -> Option<ModeNotice> {
        let (mode, notice) = std::mem::take(&mut self.mode).cancel_recording();
        self.mode = mode;
        notice
    }

    pub fn finish_recording(&mut self) {
        self.mode = std::mem::take(&mut self.mode).finish_recording();
    }

    pub fn begin_repositioning(&mut self, node_id: &NodeId) -> bool {
        if !self.nodes.contains_key(node_id) {
            return false;
        }
        self.repositioning = Some(node_id.clone());
        self.selected_connection = None;
        true
    }

    pub fn cancel_repositioning(&mut self) {
        self.repositioning = None;
    }

    /// Forget the pre-move copy of a node once the backend holds the new position
    pub fn confirm_node_update(&mut self, node_id: &NodeId) {
        self.unconfirmed_moves.shift_remove(node_id);
    }

    /// Put a node back where it was before an unaccepted local move.
    ///
    /// Returns `false` when there was no pending move for the node.
    pub fn rollback_node_update(&mut self, node_id: &NodeId) -> bool {
        let Some(original) = self.unconfirmed_moves.shift_remove(node_id) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(node_id) {
            *node = original;
        }
        true
    }

    /// Select a connection from the list rather than the canvas
    pub fn select_connection(&mut self, connection_id: &str) -> bool {
        if self.connection(connection_id).is_none() {
            return false;
        }
        self.selected_connection = Some(connection_id.to_string());
        self.selected_node = None;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_connection = None;
        self.selected_node = None;
    }

    /// Route a tap that landed on the canvas paint layer.
    ///
    /// A reposition moves the node locally, leaves repositioning mode and
    /// returns the update to persist.
    pub fn handle_canvas_tap(
        &mut self,
        tap: (f64, f64),
        scale: CanvasScale,
        config: HitTestConfig,
    ) -> (TapOutcome, Option<NodeUpdate>) {
        let outcome = tap_routing::route_tap(
            tap,
            scale,
            self.repositioning.as_ref(),
            &self.connections,
            &self.nodes,
            config,
        );

        let update = match &outcome {
            TapOutcome::Reposition { node_id, position } => {
                self.repositioning = None;
                match self.nodes.get_mut(node_id) {
                    Some(node) => {
                        self.unconfirmed_moves
                            .entry(node_id.clone())
                            .or_insert_with(|| node.clone());
                        let update = node.moved_to(*position);
                        update.apply_to(node);
                        Some(update)
                    }
                    None => None,
                }
            }
            TapOutcome::ConnectionSelected { connection_id, .. } => {
                self.selected_connection = Some(connection_id.clone());
                self.selected_node = None;
                None
            }
            TapOutcome::Deselect => {
                self.clear_selection();
                None
            }
        };

        (outcome, update)
    }

    /// Connections touching `node_id`, shown before a node is deleted
    #[must_use]
    pub fn connections_for_node(&self, node_id: &NodeId) -> Vec<&Connection> {
        self.connections.iter().filter(|c| c.involves(node_id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn snapshot() -> MapSnapshot {
        let created = Utc.with_ymd_and_hms(2024, 2, 2, 9, 0, 0).single().expect("valid date");
        MapSnapshot {
            map: FloorMap {
                id: "m1".to_string(),
                name: "Ground".to_string(),
                image_url: "plan.png".to_string(),
                image_size: (200.0, 100.0),
            },
            nodes: vec![
                MapNode::new("a", "m1", "Entrance", (10.0, 10.0)),
                MapNode::new("b", "m1", "Reception", (100.0, 10.0)),
            ],
            paths: vec![NavigationPath::new("p1", "Entrance to Reception", "a", "b", created)],
        }
    }

    fn loaded() -> MapEditorSession {
        let mut session = MapEditorSession::for_map("m1");
        let ticket = session.begin_load();
        assert_eq!(session.apply_load(ticket, Ok(snapshot())).ok(), Some(true));
        session
    }

    #[test]
    fn test_apply_load_derives_connections() {
        let session = loaded();
        assert!(!session.is_loading());
        assert_eq!(session.nodes().len(), 2);
        assert_eq!(session.connections().len(), 1);
        assert_eq!(session.connections()[0].id, "p1");
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut session = MapEditorSession::for_map("m1");
        let first = session.begin_load();
        let second = session.begin_load();

        let mut other = snapshot();
        other.nodes.clear();
        assert_eq!(session.apply_load(first, Ok(other)).ok(), Some(false));
        assert!(session.is_loading());
        assert!(session.nodes().is_empty());

        assert_eq!(session.apply_load(second, Ok(snapshot())).ok(), Some(true));
        assert_eq!(session.connections().len(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut session = loaded();
        let ticket = session.begin_load();
        let result = session.apply_load(ticket, Err(BackendError::NotFound("Map m1".to_string())));

        assert!(result.is_err());
        assert!(!session.is_loading());
        assert_eq!(session.connections().len(), 1);
    }

    #[test]
    fn test_reload_drops_selection_of_removed_connection() {
        let mut session = loaded();
        let (outcome, _) = session.handle_canvas_tap((55.0, 10.0), CanvasScale::IDENTITY, HitTestConfig::default());
        assert!(matches!(outcome, TapOutcome::ConnectionSelected { .. }));
        assert_eq!(session.selected_connection(), Some("p1"));

        let mut without_b = snapshot();
        without_b.nodes.retain(|n| n.id != NodeId::new("b"));
        let ticket = session.begin_load();
        session.apply_load(ticket, Ok(without_b)).expect("load applies");

        assert!(session.connections().is_empty());
        assert_eq!(session.selected_connection(), None);
    }

    #[test]
    fn test_full_connection_flow() {
        let mut session = loaded();
        assert_eq!(session.toggle_connection_mode(), Some(ModeNotice::Entered));

        let notice = session.tap_node(&NodeId::new("a"));
        assert_eq!(notice, Some(ModeNotice::StartSelected { name: "Entrance".to_string() }));

        let notice = session.tap_node(&NodeId::new("b"));
        assert!(matches!(notice, Some(ModeNotice::ConfirmRecording { .. })));

        let request = session.recording_request().expect("pair selected");
        assert_eq!(request.start_node_id, NodeId::new("a"));
        assert_eq!(request.end_name, "Reception");

        session.finish_recording();
        assert_eq!(session.mode(), &ConnectionMode::AwaitingStart);
        assert!(session.recording_request().is_none());
    }

    #[test]
    fn test_take_recording_request_hands_out_pair_once() {
        let mut session = loaded();
        session.toggle_connection_mode();
        session.tap_node(&NodeId::new("a"));
        session.tap_node(&NodeId::new("b"));

        let request = session.take_recording_request().expect("pair selected");
        assert_eq!(request.end_node_id, NodeId::new("b"));
        assert_eq!(session.mode(), &ConnectionMode::AwaitingStart);
        assert!(session.take_recording_request().is_none());
    }

    #[test]
    fn test_tap_node_outside_connection_mode_selects_for_editing() {
        let mut session = loaded();
        assert!(session.tap_node(&NodeId::new("b")).is_none());
        assert_eq!(session.selected_node().map(|n| n.name.as_str()), Some("Reception"));
        assert_eq!(session.mode(), &ConnectionMode::Idle);
    }

    #[test]
    fn test_unknown_node_tap_is_ignored() {
        let mut session = loaded();
        session.toggle_connection_mode();
        assert!(session.tap_node(&NodeId::new("zzz")).is_none());
        assert_eq!(session.mode(), &ConnectionMode::AwaitingStart);
    }

    #[test]
    fn test_reposition_moves_node_and_exits_mode() {
        let mut session = loaded();
        assert!(session.begin_repositioning(&NodeId::new("a")));

        let scale = CanvasScale::new(2.0, 2.0);
        let (outcome, update) = session.handle_canvas_tap((55.0, 10.0), scale, HitTestConfig::default());

        assert!(matches!(outcome, TapOutcome::Reposition { .. }));
        let update = update.expect("node exists");
        assert_eq!(update.position, (27.5, 5.0));
        assert_eq!(session.node(&NodeId::new("a")).map(|n| n.position), Some((27.5, 5.0)));
        assert!(session.repositioning().is_none());
    }

    #[test]
    fn test_rollback_restores_position_before_first_move() {
        let mut session = loaded();
        let a = NodeId::new("a");

        session.begin_repositioning(&a);
        session.handle_canvas_tap((40.0, 40.0), CanvasScale::IDENTITY, HitTestConfig::default());
        session.begin_repositioning(&a);
        session.handle_canvas_tap((60.0, 60.0), CanvasScale::IDENTITY, HitTestConfig::default());
        assert_eq!(session.node(&a).map(|n| n.position), Some((60.0, 60.0)));

        assert!(session.rollback_node_update(&a));
        assert_eq!(session.node(&a).map(|n| n.position), Some((10.0, 10.0)));
        assert!(!session.rollback_node_update(&a));
    }

    #[test]
    fn test_confirmed_move_is_not_rolled_back() {
        let mut session = loaded();
        let a = NodeId::new("a");

        session.begin_repositioning(&a);
        session.handle_canvas_tap((40.0, 40.0), CanvasScale::IDENTITY, HitTestConfig::default());
        session.confirm_node_update(&a);

        assert!(!session.rollback_node_update(&a));
        assert_eq!(session.node(&a).map(|n| n.position), Some((40.0, 40.0)));
    }

    #[test]
    fn test_empty_tap_clears_selection() {
        let mut session = loaded();
        session.tap_node(&NodeId::new("a"));
        let (outcome, update) = session.handle_canvas_tap((150.0, 90.0), CanvasScale::IDENTITY, HitTestConfig::default());

        assert_eq!(outcome, TapOutcome::Deselect);
        assert!(update.is_none());
        assert!(session.selected_node().is_none());
    }

    #[test]
    fn test_toggle_clears_editing_state() {
        let mut session = loaded();
        session.begin_repositioning(&NodeId::new("a"));
        session.toggle_connection_mode();
        assert!(session.repositioning().is_none());
        assert!(session.mode().is_active());
    }

    #[test]
    fn test_select_connection_from_list() {
        let mut session = loaded();
        session.tap_node(&NodeId::new("a"));

        assert!(session.select_connection("p1"));
        assert_eq!(session.selected_connection(), Some("p1"));
        assert!(session.selected_node().is_none());
        assert!(!session.select_connection("missing"));
    }

    #[test]
    fn test_connections_for_node() {
        let session = loaded();
        assert_eq!(session.connections_for_node(&NodeId::new("a")).len(), 1);
        assert!(session.connections_for_node(&NodeId::new("zzz")).is_empty());
    }
}
