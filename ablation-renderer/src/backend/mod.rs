//! Drawing surfaces the renderer targets.

pub mod software;

use ablation_core::Point;

use crate::RenderResult;

/// RGBA color, 8 bits per channel, straight alpha.
pub type Rgba = [u8; 4];

/// Placement of local polygon coordinates on the surface: rotate, then
/// translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Surface position of the local origin.
    pub translate: Point,
    /// Clockwise rotation in degrees.
    pub rotation_degrees: f64,
}

impl Transform {
    /// Map a local point onto the surface.
    #[must_use]
    pub fn apply(&self, local: Point) -> Point {
        local.to_world(self.translate, self.rotation_degrees)
    }
}

/// A square RGBA pixel target.
///
/// Hosts that draw somewhere other than a plain buffer implement this and
/// hand it to [`Renderer::render_into`](crate::Renderer::render_into).
pub trait Surface {
    /// Side length in pixels.
    fn size(&self) -> u32;

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Rgba);

    /// Replace every pixel with row-major RGBA data.
    ///
    /// # Errors
    ///
    /// Returns an error if `rgba` is not `size * size * 4` bytes long.
    fn blit_rgba(&mut self, rgba: &[u8]) -> RenderResult<()>;

    /// Stroke a closed polygon given in local coordinates.
    fn stroke_polygon(&mut self, points: &[Point], transform: Transform, color: Rgba, width: f64);

    /// Fill a circle, blending by the color's alpha.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Row-major RGBA pixel data.
    fn pixels(&self) -> &[u8];

    /// Mutable row-major RGBA pixel data.
    fn pixels_mut(&mut self) -> &mut [u8];
}
