use serde::{Deserialize, Serialize};

/// A floor plan image that location nodes are placed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorMap {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Width and height of the source image in pixels
    pub image_size: (f64, f64),
}
