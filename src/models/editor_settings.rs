use serde::{Deserialize, Serialize};

/// Default tap tolerance around a connection, in canvas pixels
pub const DEFAULT_HIT_TOLERANCE_PX: f64 = 20.0;
/// Default radius of the tappable node markers, in canvas pixels
pub const DEFAULT_NODE_MARKER_RADIUS_PX: f64 = 14.0;
/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION_MS: u32 = 2500;

/// How a tap picks between several connections that are all within tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// First connection in list order that is within tolerance
    #[default]
    FirstWithinTolerance,
    /// Closest connection within tolerance, list order breaking ties
    Nearest,
}

impl HitPolicy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HitPolicy::FirstWithinTolerance => "First match",
            HitPolicy::Nearest => "Nearest",
        }
    }
}

/// Where the backend lives and how to authenticate against it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
}

impl BackendSettings {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Base URL without trailing slashes
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}

/// Editor configuration persisted in the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance_px: f64,
    #[serde(default)]
    pub hit_policy: HitPolicy,
    #[serde(default = "default_node_marker_radius")]
    pub node_marker_radius_px: f64,
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u32,
}

fn default_hit_tolerance() -> f64 {
    DEFAULT_HIT_TOLERANCE_PX
}

fn default_node_marker_radius() -> f64 {
    DEFAULT_NODE_MARKER_RADIUS_PX
}

fn default_toast_duration() -> u32 {
    DEFAULT_TOAST_DURATION_MS
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            hit_tolerance_px: DEFAULT_HIT_TOLERANCE_PX,
            hit_policy: HitPolicy::default(),
            node_marker_radius_px: DEFAULT_NODE_MARKER_RADIUS_PX,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl EditorSettings {
    /// Copy with out-of-range values pulled back into usable bounds
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.hit_tolerance_px.is_finite() || self.hit_tolerance_px <= 0.0 {
            self.hit_tolerance_px = DEFAULT_HIT_TOLERANCE_PX;
        }
        self.hit_tolerance_px = self.hit_tolerance_px.min(200.0);
        if !self.node_marker_radius_px.is_finite() || self.node_marker_radius_px <= 0.0 {
            self.node_marker_radius_px = DEFAULT_NODE_MARKER_RADIUS_PX;
        }
        self
    }
}
