//! Software RGBA surface for hosts without a native drawing context.
//!
//! Everything is drawn on the CPU into a row-major `Vec<u8>`. Coverage is
//! decided per pixel center, so strokes and dots are aliased.

use ablation_core::Point;

use super::{Rgba, Surface, Transform};
use crate::{RenderError, RenderResult};

/// In-memory square RGBA surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    size: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Create a transparent surface of `size`x`size` pixels.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; byte_len(size)],
        }
    }

    /// Color of one pixel, `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Source-over blend of `color` into one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.offset(x, y);
        let alpha = u16::from(color[3]);
        if alpha == 255 {
            self.pixels[i..i + 4].copy_from_slice(&color);
            return;
        }
        let (rgb, a) = self.pixels[i..i + 4].split_at_mut(3);
        for (dst, &src) in rgb.iter_mut().zip(&color[..3]) {
            *dst = mix(src, *dst, alpha);
        }
        a[0] = mix(255, a[0], alpha);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.size as usize + x as usize) * 4
    }

    /// Blend `color` into every pixel of the box whose center passes `covered`.
    fn fill_where(
        &mut self,
        min: Point,
        max: Point,
        color: Rgba,
        covered: impl Fn(Point) -> bool,
    ) {
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(min.x, max.x, self.size),
            pixel_span(min.y, max.y, self.size),
        ) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if covered(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> u32 {
        self.size
    }

    fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    fn blit_rgba(&mut self, rgba: &[u8]) -> RenderResult<()> {
        if rgba.len() != self.pixels.len() {
            return Err(RenderError::Surface(format!(
                "expected {} bytes for a {}x{} surface, got {}",
                self.pixels.len(),
                self.size,
                self.size,
                rgba.len()
            )));
        }
        self.pixels.copy_from_slice(rgba);
        Ok(())
    }

    fn stroke_polygon(&mut self, points: &[Point], transform: Transform, color: Rgba, width: f64) {
        if points.len() < 2 {
            return;
        }
        let world: Vec<Point> = points.iter().map(|&p| transform.apply(p)).collect();
        let half = width / 2.0;

        let (mut min, mut max) = (world[0], world[0]);
        for p in &world {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }

        let edges: Vec<(Point, Point)> = world
            .iter()
            .zip(world.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
            .collect();

        self.fill_where(
            min.offset(-half, -half),
            max.offset(half, half),
            color,
            |p| edges.iter().any(|&(a, b)| segment_distance(p, a, b) <= half),
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let r2 = radius * radius;
        self.fill_where(
            center.offset(-radius, -radius),
            center.offset(radius, radius),
            color,
            |p| {
                let (dx, dy) = (p.x - center.x, p.y - center.y);
                dx * dx + dy * dy <= r2
            },
        );
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

fn byte_len(size: u32) -> usize {
    size as usize * size as usize * 4
}

fn mix(src: u8, dst: u8, alpha: u16) -> u8 {
    let value = (u16::from(src) * alpha + u16::from(dst) * (255 - alpha) + 127) / 255;
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Inclusive pixel range touched by `[min, max]`, clipped to the surface.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_span(min: f64, max: f64, size: u32) -> Option<(u32, u32)> {
    let limit = f64::from(size);
    if size == 0 || max < 0.0 || min >= limit || min > max {
        return None;
    }
    let lo = min.floor().max(0.0) as u32;
    let hi = (max.ceil().min(limit - 1.0)) as u32;
    Some((lo, hi))
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 <= f64::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * abx, a.y + t * aby);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
