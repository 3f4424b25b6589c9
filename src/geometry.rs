/// Calculates the minimum distance from a point to a closed line segment.
///
/// The point is projected onto the line through the segment and the projection
/// parameter is clamped to `[0, 1]`, so points beyond either end measure to the
/// nearest endpoint. A degenerate segment (both endpoints equal) is treated as
/// the single point `seg_start`.
///
/// # Arguments
/// * `point` - The point to measure from
/// * `seg_start` - Starting point of the line segment
/// * `seg_end` - Ending point of the line segment
///
/// # Examples
/// ```
/// use wayfinder_admin::geometry::point_to_segment_distance;
///
/// let d = point_to_segment_distance((5.0, 5.0), (0.0, 0.0), (10.0, 0.0));
/// assert!((d - 5.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn point_to_segment_distance(point: (f64, f64), seg_start: (f64, f64), seg_end: (f64, f64)) -> f64 {
    let dx = seg_end.0 - seg_start.0;
    let dy = seg_end.1 - seg_start.1;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((point.0 - seg_start.0) * dx + (point.1 - seg_start.1) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let closest_x = seg_start.0 + t * dx;
    let closest_y = seg_start.1 + t * dy;

    let px = point.0 - closest_x;
    let py = point.1 - closest_y;
    (px * px + py * py).sqrt()
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Computes the two wing points of an arrow head drawn at `to`, pointing away from `from`.
///
/// Returns `None` when the segment has no length, since no direction exists.
///
/// # Arguments
/// * `from` - Tail of the edge
/// * `to` - Tip of the edge (where the arrow head sits)
/// * `length` - Length of each wing in the same units as the points
/// * `spread` - Half-angle between the shaft and each wing, in radians
#[must_use]
pub fn arrow_head(from: (f64, f64), to: (f64, f64), length: f64, spread: f64) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    let angle = dy.atan2(dx);
    let left = (
        to.0 - length * (angle - spread).cos(),
        to.1 - length * (angle - spread).sin(),
    );
    let right = (
        to.0 - length * (angle + spread).cos(),
        to.1 - length * (angle + spread).sin(),
    );
    Some((left, right))
}

/// Scale factors between canvas pixels and source-image pixels.
///
/// Each axis is scaled independently (`canvas = source * factor`), which is how
/// a floor plan stretched into a canvas of a different aspect ratio behaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasScale {
    pub x: f64,
    pub y: f64,
}

impl Default for CanvasScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CanvasScale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: sanitize_factor(x),
            y: sanitize_factor(y),
        }
    }

    /// Build the scale that stretches an image of `image_size` into `canvas_size`.
    ///
    /// Axes with a zero or non-finite image dimension fall back to 1.0.
    #[must_use]
    pub fn fit(image_size: (f64, f64), canvas_size: (f64, f64)) -> Self {
        Self::new(canvas_size.0 / image_size.0, canvas_size.1 / image_size.1)
    }

    #[must_use]
    pub fn to_canvas(&self, source: (f64, f64)) -> (f64, f64) {
        (source.0 * self.x, source.1 * self.y)
    }

    #[must_use]
    pub fn to_source(&self, canvas: (f64, f64)) -> (f64, f64) {
        (canvas.0 / self.x, canvas.1 / self.y)
    }
}

fn sanitize_factor(factor: f64) -> f64 {
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        1.0
    }
}
