mod connection;
mod editor_settings;
mod floor_map;
mod map_node;
mod navigation_path;

pub use connection::{derive_connections, derive_connections_indexed, Connection};
pub use editor_settings::{BackendSettings, EditorSettings, HitPolicy};
pub use floor_map::FloorMap;
pub use map_node::{MapNode, NodeId, NodeUpdate};
pub use navigation_path::{NavigationPath, Waypoint};
