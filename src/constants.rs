/// Distance from a connection, in canvas pixels, within which a tap selects it
pub const CONNECTION_HIT_TOLERANCE_PX: f64 = 20.0;

/// Width the floor plan canvas is laid out at before the image size is known
pub const DEFAULT_CANVAS_WIDTH: f64 = 960.0;

/// Arrow head wing length, in canvas pixels
pub const ARROW_HEAD_LENGTH: f64 = 12.0;

/// Arrow head half-angle, in radians
pub const ARROW_HEAD_SPREAD: f64 = std::f64::consts::PI / 7.0;
