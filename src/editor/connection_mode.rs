use crate::models::NodeId;

/// A node as seen by the connection-mode state machine: its id plus the name to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedNode {
    pub id: NodeId,
    pub name: String,
}

impl SelectedNode {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
        }
    }
}

/// Start/end selection implied by a [`ConnectionMode`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub start_node_id: Option<NodeId>,
    pub end_node_id: Option<NodeId>,
}

/// Transient message a transition asks the UI to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeNotice {
    Entered,
    Exited,
    StartSelected { name: String },
    Cancelled,
    ConfirmRecording { start_name: String, end_name: String },
}

impl ModeNotice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ModeNotice::Entered => "Connection mode: tap the start node".to_string(),
            ModeNotice::Exited => "Connection mode off".to_string(),
            ModeNotice::StartSelected { name } => {
                format!("Start: {name}. Tap the destination node")
            }
            ModeNotice::Cancelled => "Selection cancelled".to_string(),
            ModeNotice::ConfirmRecording { start_name, end_name } => {
                format!("Record a path from {start_name} to {end_name}?")
            }
        }
    }
}

/// Node-linking interaction mode.
///
/// Transitions consume the current state and return the next one together with
/// an optional notice; nothing is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionMode {
    #[default]
    Idle,
    AwaitingStart,
    AwaitingEnd {
        start: SelectedNode,
    },
    PathRecordingRequested {
        start: SelectedNode,
        end: SelectedNode,
    },
}

impl ConnectionMode {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, ConnectionMode::Idle)
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        match self {
            ConnectionMode::Idle | ConnectionMode::AwaitingStart => SelectionState::default(),
            ConnectionMode::AwaitingEnd { start } => SelectionState {
                start_node_id: Some(start.id.clone()),
                end_node_id: None,
            },
            ConnectionMode::PathRecordingRequested { start, end } => SelectionState {
                start_node_id: Some(start.id.clone()),
                end_node_id: Some(end.id.clone()),
            },
        }
    }

    /// Switch connection mode on or off. Any selection is discarded either way.
    #[must_use]
    pub fn toggle(self) -> (Self, Option<ModeNotice>) {
        match self {
            ConnectionMode::Idle => (ConnectionMode::AwaitingStart, Some(ModeNotice::Entered)),
            _ => (ConnectionMode::Idle, Some(ModeNotice::Exited)),
        }
    }

    /// Interpret a tap on a node marker.
    #[must_use]
    pub fn tap_node(self, node: SelectedNode) -> (Self, Option<ModeNotice>) {
        match self {
            ConnectionMode::AwaitingStart => {
                let notice = ModeNotice::StartSelected { name: node.name.clone() };
                (ConnectionMode::AwaitingEnd { start: node }, Some(notice))
            }
            ConnectionMode::AwaitingEnd { start } if start.id == node.id => {
                (ConnectionMode::AwaitingStart, Some(ModeNotice::Cancelled))
            }
            ConnectionMode::AwaitingEnd { start } => {
                let notice = ModeNotice::ConfirmRecording {
                    start_name: start.name.clone(),
                    end_name: node.name.clone(),
                };
                (ConnectionMode::PathRecordingRequested { start, end: node }, Some(notice))
            }
            idle_or_pending => (idle_or_pending, None),
        }
    }

    /// Leave `PathRecordingRequested` after the recorder returned, whatever it returned.
    #[must_use]
    pub fn finish_recording(self) -> Self {
        match self {
            ConnectionMode::PathRecordingRequested { .. } => ConnectionMode::AwaitingStart,
            other => other,
        }
    }

    /// Decline the confirmation prompt.
    #[must_use]
    pub fn cancel_recording(self) -> (Self, Option<ModeNotice>) {
        match self {
            ConnectionMode::PathRecordingRequested { .. } => {
                (ConnectionMode::AwaitingStart, Some(ModeNotice::Cancelled))
            }
            other => (other, None),
        }
    }

    /// The selected pair, once both ends are chosen and distinct
    #[must_use]
    pub fn pending_pair(&self) -> Option<(&SelectedNode, &SelectedNode)> {
        match self {
            ConnectionMode::PathRecordingRequested { start, end } if start.id != end.id => {
                Some((start, end))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> SelectedNode {
        SelectedNode::new(id, &id.to_uppercase())
    }

    #[test]
    fn test_toggle_enters_and_exits() {
        let (mode, notice) = ConnectionMode::Idle.toggle();
        assert_eq!(mode, ConnectionMode::AwaitingStart);
        assert_eq!(notice, Some(ModeNotice::Entered));

        let (mode, notice) = mode.toggle();
        assert_eq!(mode, ConnectionMode::Idle);
        assert_eq!(notice, Some(ModeNotice::Exited));
    }

    #[test]
    fn test_toggle_resets_stale_selection() {
        let stale = ConnectionMode::AwaitingEnd { start: node("a") };
        let (off, _) = stale.toggle();
        let (on, _) = off.toggle();

        assert_eq!(on, ConnectionMode::AwaitingStart);
        assert_eq!(on.selection(), SelectionState::default());
    }

    #[test]
    fn test_tap_while_idle_is_ignored() {
        let (mode, notice) = ConnectionMode::Idle.tap_node(node("a"));
        assert_eq!(mode, ConnectionMode::Idle);
        assert!(notice.is_none());
    }

    #[test]
    fn test_first_tap_selects_start() {
        let (mode, notice) = ConnectionMode::AwaitingStart.tap_node(node("a"));
        assert_eq!(mode, ConnectionMode::AwaitingEnd { start: node("a") });
        assert_eq!(notice, Some(ModeNotice::StartSelected { name: "A".to_string() }));
        assert_eq!(mode.selection().start_node_id, Some(NodeId::new("a")));
    }

    #[test]
    fn test_retapping_start_cancels_every_time() {
        for _ in 0..3 {
            let (mode, _) = ConnectionMode::AwaitingStart.tap_node(node("a"));
            let (mode, notice) = mode.tap_node(node("a"));
            assert_eq!(mode, ConnectionMode::AwaitingStart);
            assert_eq!(notice, Some(ModeNotice::Cancelled));
            assert_eq!(mode.selection(), SelectionState::default());
        }
    }

    #[test]
    fn test_cancel_matches_canonical_id() {
        let (mode, _) = ConnectionMode::AwaitingStart.tap_node(SelectedNode::new("Lobby", "Lobby"));
        let (mode, notice) = mode.tap_node(SelectedNode::new(" LOBBY", "Lobby"));
        assert_eq!(mode, ConnectionMode::AwaitingStart);
        assert_eq!(notice, Some(ModeNotice::Cancelled));
    }

    #[test]
    fn test_second_distinct_tap_requests_recording() {
        let (mode, _) = ConnectionMode::AwaitingStart.tap_node(node("a"));
        let (mode, notice) = mode.tap_node(node("b"));

        assert_eq!(
            notice,
            Some(ModeNotice::ConfirmRecording {
                start_name: "A".to_string(),
                end_name: "B".to_string(),
            })
        );
        let (start, end) = mode.pending_pair().expect("pair selected");
        assert_eq!(start.id, NodeId::new("a"));
        assert_eq!(end.id, NodeId::new("b"));
        assert_eq!(
            mode.selection(),
            SelectionState {
                start_node_id: Some(NodeId::new("a")),
                end_node_id: Some(NodeId::new("b")),
            }
        );
    }

    #[test]
    fn test_taps_ignored_while_recording_pending() {
        let pending = ConnectionMode::PathRecordingRequested { start: node("a"), end: node("b") };
        let (mode, notice) = pending.clone().tap_node(node("c"));
        assert_eq!(mode, pending);
        assert!(notice.is_none());
    }

    #[test]
    fn test_recording_completion_returns_to_awaiting_start() {
        let pending = ConnectionMode::PathRecordingRequested { start: node("a"), end: node("b") };
        assert_eq!(pending.clone().finish_recording(), ConnectionMode::AwaitingStart);

        let (mode, notice) = pending.cancel_recording();
        assert_eq!(mode, ConnectionMode::AwaitingStart);
        assert_eq!(notice, Some(ModeNotice::Cancelled));
    }

    #[test]
    fn test_notice_messages_name_nodes() {
        let notice = ModeNotice::ConfirmRecording {
            start_name: "Entrance".to_string(),
            end_name: "Lift".to_string(),
        };
        assert_eq!(notice.message(), "Record a path from Entrance to Lift?");
    }
}
