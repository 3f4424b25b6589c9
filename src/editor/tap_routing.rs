use crate::geometry::{self, CanvasScale};
use crate::models::{Connection, EditorSettings, HitPolicy, MapNode, NodeId};
use indexmap::IndexMap;

/// Tolerance and tie-break rule used when hit-testing connections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestConfig {
    pub tolerance_px: f64,
    pub policy: HitPolicy,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            tolerance_px: crate::constants::CONNECTION_HIT_TOLERANCE_PX,
            policy: HitPolicy::FirstWithinTolerance,
        }
    }
}

impl From<&EditorSettings> for HitTestConfig {
    fn from(settings: &EditorSettings) -> Self {
        Self {
            tolerance_px: settings.hit_tolerance_px,
            policy: settings.hit_policy,
        }
    }
}

/// What a canvas tap resolved to
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// The node being repositioned moves to `position` (source-image pixels)
    Reposition { node_id: NodeId, position: (f64, f64) },
    ConnectionSelected { connection_id: String, distance: f64 },
    /// Empty space; clear the current selection
    Deselect,
}

/// Decide what a tap on the canvas paint layer hit.
///
/// Node markers sit above the canvas and handle their own taps, so this only
/// sees taps that missed every marker. `tap` is in canvas pixels.
#[must_use]
pub fn route_tap(
    tap: (f64, f64),
    scale: CanvasScale,
    repositioning: Option<&NodeId>,
    connections: &[Connection],
    nodes: &IndexMap<NodeId, MapNode>,
    config: HitTestConfig,
) -> TapOutcome {
    if let Some(node_id) = repositioning {
        return TapOutcome::Reposition {
            node_id: node_id.clone(),
            position: scale.to_source(tap),
        };
    }

    match find_connection_at(tap, scale, connections, nodes, config) {
        Some((connection, distance)) => TapOutcome::ConnectionSelected {
            connection_id: connection.id.clone(),
            distance,
        },
        None => TapOutcome::Deselect,
    }
}

/// Find the connection under `tap` according to `config.policy`.
#[must_use]
pub fn find_connection_at<'a>(
    tap: (f64, f64),
    scale: CanvasScale,
    connections: &'a [Connection],
    nodes: &IndexMap<NodeId, MapNode>,
    config: HitTestConfig,
) -> Option<(&'a Connection, f64)> {
    let mut best: Option<(&Connection, f64)> = None;

    for connection in connections {
        let Some(segment) = connection_segment(connection, scale, nodes) else {
            continue;
        };

        let distance = geometry::point_to_segment_distance(tap, segment.0, segment.1);
        if distance >= config.tolerance_px {
            continue;
        }

        match config.policy {
            HitPolicy::FirstWithinTolerance => return Some((connection, distance)),
            HitPolicy::Nearest => {
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((connection, distance));
                }
            }
        }
    }

    best
}

/// Canvas-space endpoints of a connection, or `None` if either node is gone.
#[must_use]
pub fn connection_segment(
    connection: &Connection,
    scale: CanvasScale,
    nodes: &IndexMap<NodeId, MapNode>,
) -> Option<((f64, f64), (f64, f64))> {
    let a = nodes.get(&connection.node_a_id)?;
    let b = nodes.get(&connection.node_b_id)?;
    Some((scale.to_canvas(a.position), scale.to_canvas(b.position)))
}

/// Topmost node marker under `tap`, if any.
///
/// Markers are drawn in node order so the last one wins when they overlap.
#[must_use]
pub fn node_at<'a>(
    tap: (f64, f64),
    scale: CanvasScale,
    nodes: &'a IndexMap<NodeId, MapNode>,
    marker_radius_px: f64,
) -> Option<&'a MapNode> {
    nodes
        .values()
        .rev()
        .find(|node| geometry::distance(tap, scale.to_canvas(node.position)) <= marker_radius_px)
}
