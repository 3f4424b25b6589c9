use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of a location node.
///
/// Identifiers arrive from several tables (map nodes, path endpoints) that do not
/// agree on casing or padding. Equality, ordering and hashing use the canonical
/// form (surrounding whitespace trimmed, ASCII lowercased); the raw string is
/// kept for talking to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NodeId {
    raw: String,
    canonical: String,
}

impl NodeId {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            canonical: raw.trim().to_ascii_lowercase(),
        }
    }

    /// The identifier exactly as the backend supplied it
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.raw
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A named point of interest placed on a floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: NodeId,
    pub map_id: String,
    pub name: String,
    /// Position in source-image pixels
    pub position: (f64, f64),
    /// Compass bearing in degrees captured when the node was recorded
    #[serde(default)]
    pub reference_direction: Option<f64>,
}

impl MapNode {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, map_id: &str, name: &str, position: (f64, f64)) -> Self {
        Self {
            id: id.into(),
            map_id: map_id.to_string(),
            name: name.to_string(),
            position,
            reference_direction: None,
        }
    }

    #[must_use]
    pub fn with_reference_direction(mut self, degrees: f64) -> Self {
        self.reference_direction = Some(degrees);
        self
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "Unnamed node".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Reference direction wrapped into `[0, 360)`, ignoring non-finite values.
    #[must_use]
    pub fn normalized_direction(&self) -> Option<f64> {
        self.reference_direction
            .filter(|d| d.is_finite())
            .map(|d| d.rem_euclid(360.0))
    }

    /// Build the update that moves this node to `position`, keeping everything else.
    #[must_use]
    pub fn moved_to(&self, position: (f64, f64)) -> NodeUpdate {
        NodeUpdate {
            id: self.id.clone(),
            name: self.name.clone(),
            position,
            reference_direction: self.reference_direction,
        }
    }
}

/// Full replacement of a node's editable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUpdate {
    pub id: NodeId,
    pub name: String,
    pub position: (f64, f64),
    pub reference_direction: Option<f64>,
}

impl NodeUpdate {
    pub fn apply_to(&self, node: &mut MapNode) {
        node.name.clone_from(&self.name);
        node.position = self.position;
        node.reference_direction = self.reference_direction;
    }
}
