//! Plane geometry helpers: points, frame rotation, clamping and grid snapping.

use serde::{Deserialize, Serialize};

/// A point in surface coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotate about the origin by `degrees` (clockwise on screen).
    ///
    /// Whole quarter turns are exact, so a shape turned by a multiple of
    /// 90 degrees covers exactly the pixels of its unrotated mask.
    #[must_use]
    pub fn rotated(self, degrees: f64) -> Self {
        let (sin, cos) = quarter_turn(degrees).unwrap_or_else(|| degrees.to_radians().sin_cos());
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Express `self` in a frame centered at `center` and rotated by
    /// `rotation_degrees`.
    #[must_use]
    pub fn to_local(self, center: Point, rotation_degrees: f64) -> Self {
        Self::new(self.x - center.x, self.y - center.y).rotated(-rotation_degrees)
    }

    /// Inverse of [`Point::to_local`].
    #[must_use]
    pub fn to_world(self, center: Point, rotation_degrees: f64) -> Self {
        let world = self.rotated(rotation_degrees);
        Self::new(world.x + center.x, world.y + center.y)
    }
}

/// Exact `(sin, cos)` for whole multiples of 90 degrees.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn quarter_turn(degrees: f64) -> Option<(f64, f64)> {
    let turns = degrees / 90.0;
    if !turns.is_finite() || turns.fract() != 0.0 {
        return None;
    }
    match (turns as i64).rem_euclid(4) {
        0 => Some((0.0, 1.0)),
        1 => Some((1.0, 0.0)),
        2 => Some((0.0, -1.0)),
        _ => Some((-1.0, 0.0)),
    }
}

/// Clamp `value` into `[min, max]`. A degenerate range yields `min`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Snap a coordinate to the nearest grid line.
#[must_use]
pub fn snap_to_grid(coord: f64, pitch: f64) -> f64 {
    (coord / pitch).round() * pitch
}

/// Snap a coordinate to the nearest grid line whose position keeps a shape
/// of the given radius inside `[0, size]`.
///
/// Falls back to plain clamping when no grid line fits.
#[must_use]
pub fn snap_within(coord: f64, pitch: f64, radius: f64, size: f64) -> f64 {
    let lowest = (radius / pitch).ceil() * pitch;
    let highest = ((size - radius) / pitch).floor() * pitch;
    if lowest > highest {
        return clamp(coord, radius, size - radius);
    }
    clamp(snap_to_grid(coord, pitch), lowest, highest)
}

/// Inclusive pixel rectangle, already clipped to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    /// Leftmost column.
    pub min_x: u32,
    /// Topmost row.
    pub min_y: u32,
    /// Rightmost column.
    pub max_x: u32,
    /// Bottom row.
    pub max_y: u32,
}

impl PixelBounds {
    /// Square box of `radius` around `center`, clipped to a `size`x`size`
    /// surface. Returns `None` when the box misses the surface entirely.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn around(center: Point, radius: f64, size: u32) -> Option<Self> {
        if size == 0 {
            return None;
        }
        let last = f64::from(size - 1);
        let min_x = (center.x - radius).floor();
        let max_x = (center.x + radius).ceil();
        let min_y = (center.y - radius).floor();
        let max_y = (center.y + radius).ceil();
        if max_x < 0.0 || max_y < 0.0 || min_x > last || min_y > last {
            return None;
        }
        Some(Self {
            min_x: clamp(min_x, 0.0, last) as u32,
            min_y: clamp(min_y, 0.0, last) as u32,
            max_x: clamp(max_x, 0.0, last) as u32,
            max_y: clamp(max_y, 0.0, last) as u32,
        })
    }

    /// Whether the pixel lies inside the box.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
