pub mod actions;
mod connection_mode;
mod session;
pub mod tap_routing;

pub use connection_mode::{ConnectionMode, ModeNotice, SelectedNode, SelectionState};
pub use session::{LoadTicket, MapEditorSession, MapSnapshot};
pub use tap_routing::{HitTestConfig, TapOutcome};
