//! Placed shapes - the primitives whose overlap parity forms the region.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{DEFAULT_SIZE_LEVEL, DEFAULT_TRIANGLE_SIZE, SCALE_VALUES, SIZE_LEVELS, UNIT_PX};
use crate::geometry::{PixelBounds, Point};

/// Unique identifier for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Create a new unique shape ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of placeable primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Circle; `base_size` is the diameter.
    Circle,
    /// Square; `base_size` is the side.
    Square,
    /// Isosceles triangle centered on its centroid; `base_size` is the side.
    Triangle,
}

impl ShapeKind {
    /// Rotation applied by one rotate step, in degrees. Zero means the kind
    /// is rotation-invariant.
    #[must_use]
    pub fn rotation_step(self) -> u32 {
        match self {
            Self::Circle => 0,
            Self::Square => 45,
            Self::Triangle => 60,
        }
    }

    /// Sizing a freshly created shape of this kind starts with.
    #[must_use]
    pub fn default_sizing(self) -> Sizing {
        match self {
            Self::Circle | Self::Square => Sizing::Level(DEFAULT_SIZE_LEVEL),
            Self::Triangle => Sizing::Scale(1.0),
        }
    }

    /// Base size of a freshly created shape of this kind.
    #[must_use]
    pub fn default_base_size(self) -> f64 {
        match self {
            Self::Circle | Self::Square => f64::from(DEFAULT_SIZE_LEVEL) * UNIT_PX,
            Self::Triangle => DEFAULT_TRIANGLE_SIZE,
        }
    }

    /// Bounding radius of a shape of this kind with the given scaled size.
    ///
    /// Circle: half the diameter. Square: half the diagonal, so any rotation
    /// stays inside. Triangle: circumradius.
    #[must_use]
    pub fn radius_for(self, scaled_size: f64) -> f64 {
        match self {
            Self::Circle => scaled_size / 2.0,
            Self::Square => scaled_size / std::f64::consts::SQRT_2,
            Self::Triangle => scaled_size / 3.0_f64.sqrt(),
        }
    }

    /// Bounding radius of a freshly created shape of this kind.
    #[must_use]
    pub fn default_radius(self) -> f64 {
        self.radius_for(self.default_base_size())
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// How a shape's size is expressed. Exactly one form applies per kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Sizing {
    /// Discrete level from [`SIZE_LEVELS`], in 20px units (circle, square).
    Level(u32),
    /// Multiplier from [`SCALE_VALUES`] applied to the base size (triangle).
    Scale(f64),
}

impl Sizing {
    /// Multiplier applied on top of the base size.
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Level(_) => 1.0,
            Self::Scale(scale) => scale,
        }
    }

    /// Position on the relevant ladder. Values not on the ladder map to 0.
    #[must_use]
    pub fn ladder_index(self) -> usize {
        match self {
            Self::Level(level) => SIZE_LEVELS.iter().position(|&l| l == level),
            #[allow(clippy::float_cmp)] // Ladder values are exact literals
            Self::Scale(scale) => SCALE_VALUES.iter().position(|&s| s == scale),
        }
        .unwrap_or(0)
    }

    /// The sizing one ladder step in `direction` (sign only), clamped to the
    /// ladder ends.
    #[must_use]
    pub fn stepped(self, direction: i32) -> Self {
        let index = self.ladder_index();
        let len = match self {
            Self::Level(_) => SIZE_LEVELS.len(),
            Self::Scale(_) => SCALE_VALUES.len(),
        };
        let next = match direction.signum() {
            1 => (index + 1).min(len - 1),
            -1 => index.saturating_sub(1),
            _ => index,
        };
        match self {
            Self::Level(_) => Self::Level(SIZE_LEVELS[next]),
            Self::Scale(_) => Self::Scale(SCALE_VALUES[next]),
        }
    }
}

/// A placed geometric primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier.
    pub id: ShapeId,
    /// Primitive kind.
    pub kind: ShapeKind,
    /// Center in surface coordinates (centroid for triangles).
    pub center: Point,
    /// Nominal size before scaling.
    pub base_size: f64,
    /// Level or scale, depending on kind.
    pub sizing: Sizing,
    /// Rotation in degrees, always a multiple of the kind's step, in `[0, 360)`.
    pub rotation_degrees: u32,
}

impl Shape {
    /// Create a shape of the given kind with its default size at `center`.
    #[must_use]
    pub fn new(kind: ShapeKind, center: Point) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            center,
            base_size: kind.default_base_size(),
            sizing: kind.default_sizing(),
            rotation_degrees: 0,
        }
    }

    /// Set the rotation, normalized into `[0, 360)`.
    #[must_use]
    pub fn with_rotation(mut self, degrees: u32) -> Self {
        self.rotation_degrees = degrees % 360;
        self
    }

    /// Set the sizing, updating the base size for level sizing.
    #[must_use]
    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.apply_sizing(sizing);
        self
    }

    /// Size actually used for containment.
    #[must_use]
    pub fn scaled_size(&self) -> f64 {
        self.base_size * self.sizing.scale()
    }

    /// Bounding radius used for bounds checks and incremental updates.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.kind.radius_for(self.scaled_size())
    }

    /// Whether the shape's bounding circle lies within `[0, size]` on both axes.
    #[must_use]
    pub fn fits_within(&self, size: f64) -> bool {
        fits(self.center, self.radius(), size)
    }

    /// Pixel box covering the shape on a `size`x`size` surface.
    #[must_use]
    pub fn pixel_bounds(&self, size: u32) -> Option<PixelBounds> {
        PixelBounds::around(self.center, self.radius(), size)
    }

    /// Containment test for the point `(px, py)`.
    ///
    /// The point is moved into the shape's unrotated local frame and tested
    /// against the axis-aligned primitive there.
    #[must_use]
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        let s = self.scaled_size();
        let local =
            Point::new(px, py).to_local(self.center, f64::from(self.rotation_degrees));

        match self.kind {
            ShapeKind::Circle => {
                let r = s / 2.0;
                local.x * local.x + local.y * local.y <= r * r
            }
            ShapeKind::Square => local.x.abs() <= s / 2.0 && local.y.abs() <= s / 2.0,
            ShapeKind::Triangle => {
                // Apex sits twice as far from the centroid as the base.
                let apex_y = -(3.0_f64.sqrt() / 3.0) * s;
                let base_y = (3.0_f64.sqrt() / 6.0) * s;
                if local.y < apex_y || local.y > base_y {
                    return false;
                }
                let ratio = (local.y - apex_y) / (base_y - apex_y);
                local.x.abs() <= ratio * s / 2.0
            }
        }
    }

    /// Rotate by the kind's step. Returns `false` for rotation-invariant kinds.
    pub fn rotate_step(&mut self) -> bool {
        let step = self.kind.rotation_step();
        if step == 0 {
            return false;
        }
        self.rotation_degrees = (self.rotation_degrees + step) % 360;
        true
    }

    /// Step the size ladder in `direction`, refusing changes that would push
    /// the bounding circle past a `surface_size` edge.
    ///
    /// Returns whether the shape changed.
    pub fn resize_step(&mut self, direction: i32, surface_size: f64) -> bool {
        let next = self.sizing.stepped(direction);
        if next == self.sizing {
            return false;
        }

        let mut candidate = self.clone();
        candidate.apply_sizing(next);
        if !candidate.fits_within(surface_size) {
            tracing::debug!(
                shape = %self.id,
                "Resize rejected: radius {:.1} leaves surface",
                candidate.radius()
            );
            return false;
        }

        self.apply_sizing(next);
        true
    }

    /// Outline vertices in local (unrotated, centered) coordinates.
    ///
    /// Circles are approximated with `segments` vertices. Coordinates are
    /// rounded to whole pixels the way the outline is stroked.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn outline(&self, segments: usize) -> Vec<Point> {
        let s = self.scaled_size();
        match self.kind {
            ShapeKind::Circle => {
                let r = s / 2.0;
                (0..segments.max(3))
                    .map(|i| {
                        let t = std::f64::consts::TAU * i as f64 / segments.max(3) as f64;
                        Point::new(r * t.cos(), r * t.sin())
                    })
                    .collect()
            }
            ShapeKind::Square => {
                let h = (s / 2.0).round();
                vec![
                    Point::new(-h, -h),
                    Point::new(-h + s, -h),
                    Point::new(-h + s, -h + s),
                    Point::new(-h, -h + s),
                ]
            }
            ShapeKind::Triangle => {
                let apex = (-(3.0_f64.sqrt() / 3.0) * s).round();
                let base = ((3.0_f64.sqrt() / 6.0) * s).round();
                vec![
                    Point::new(0.0, apex),
                    Point::new((-0.5 * s).round(), base),
                    Point::new((0.5 * s).round(), base),
                ]
            }
        }
    }

    fn apply_sizing(&mut self, sizing: Sizing) {
        if let Sizing::Level(level) = sizing {
            self.base_size = f64::from(level) * UNIT_PX;
        }
        self.sizing = sizing;
    }
}

/// Whether a circle of `radius` at `center` fits within `[0, size]` on both axes.
#[must_use]
pub fn fits(center: Point, radius: f64, size: f64) -> bool {
    let max = size - radius;
    center.x >= radius && center.x <= max && center.y >= radius && center.y <= max
}
