//! # Stacked Ablation Renderer
//!
//! Software renderer that turns an engine's state into an RGBA frame.
//!
//! ## Frame Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  3. Grid points (grid mode only)            │
//! ├─────────────────────────────────────────────┤
//! │  2. Active shape outline                    │
//! ├─────────────────────────────────────────────┤
//! │  1. Parity region (lit / background)        │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
#[cfg(feature = "export")]
pub mod export;

pub use backend::software::PixelSurface;
pub use backend::{Rgba, Surface, Transform};
pub use error::{RenderError, RenderResult};

use ablation_core::{AblationEngine, Point, Shape};

/// Vertices used to approximate a circle outline.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Colors and stroke settings for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Color of lit (odd-parity) pixels.
    pub lit_color: Rgba,
    /// Color of unlit pixels. Transparent by default.
    pub background_color: Rgba,
    /// Active shape outline color.
    pub outline_color: Rgba,
    /// Active shape outline width in pixels.
    pub outline_width: f64,
    /// Grid point color, alpha-blended over the frame.
    pub grid_point_color: Rgba,
    /// Grid point radius in pixels.
    pub grid_point_radius: f64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            lit_color: [255, 255, 255, 255],
            background_color: [0, 0, 0, 0],
            outline_color: [255, 0, 0, 255], // #FF0000
            outline_width: 2.5,
            grid_point_color: [255, 255, 255, 153], // 60% white
            grid_point_radius: 2.5,
        }
    }
}

impl RendererConfig {
    /// Replace the color of unlit pixels.
    #[must_use]
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }
}

/// Draws engine frames into a surface.
pub struct Renderer {
    config: RendererConfig,
    surface: Box<dyn Surface>,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer with its own software surface of `size` pixels.
    #[must_use]
    pub fn new(config: RendererConfig, size: u32) -> Self {
        Self::with_surface(config, Box::new(PixelSurface::new(size)))
    }

    /// Create a renderer drawing into a host-provided surface.
    #[must_use]
    pub fn with_surface(config: RendererConfig, surface: Box<dyn Surface>) -> Self {
        Self {
            config,
            surface,
            frame_count: 0,
        }
    }

    /// Render the engine's current state into the owned surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface size differs from the engine's.
    pub fn render(&mut self, engine: &mut AblationEngine) -> RenderResult<()> {
        Self::draw(&self.config, engine, self.surface.as_mut())?;
        self.frame_count += 1;
        Ok(())
    }

    /// Render the engine's current state into any surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface size differs from the engine's.
    pub fn render_into(
        &mut self,
        engine: &mut AblationEngine,
        surface: &mut dyn Surface,
    ) -> RenderResult<()> {
        Self::draw(&self.config, engine, surface)?;
        self.frame_count += 1;
        Ok(())
    }

    /// The owned surface holding the last frame.
    #[must_use]
    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    fn draw(
        config: &RendererConfig,
        engine: &mut AblationEngine,
        surface: &mut dyn Surface,
    ) -> RenderResult<()> {
        let size = engine.config().surface_size;
        if surface.size() != size {
            return Err(RenderError::Surface(format!(
                "surface is {}px but the engine draws {size}px",
                surface.size()
            )));
        }

        let rgba = engine
            .region()
            .to_rgba(config.lit_color, config.background_color);
        surface.blit_rgba(&rgba)?;

        if let Some(shape) = engine.active_shape() {
            draw_outline(config, shape, surface);
        }

        if let Some(pitch) = engine.config().grid_pitch {
            draw_grid_points(config, pitch, size, surface);
        }

        tracing::trace!(shapes = engine.shapes().len(), "Frame rendered");
        Ok(())
    }
}

/// Stroke `shape`'s outline around its rounded center.
pub fn draw_outline(config: &RendererConfig, shape: &Shape, surface: &mut dyn Surface) {
    let transform = Transform {
        translate: Point::new(shape.center.x.round(), shape.center.y.round()),
        rotation_degrees: f64::from(shape.rotation_degrees),
    };
    surface.stroke_polygon(
        &shape.outline(CIRCLE_SEGMENTS),
        transform,
        config.outline_color,
        config.outline_width,
    );
}

/// Dot every grid intersection, edges included.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn draw_grid_points(config: &RendererConfig, pitch: f64, size: u32, surface: &mut dyn Surface) {
    if pitch <= 0.0 {
        return;
    }
    let lines = (f64::from(size) / pitch).round() as u32;
    for i in 0..=lines {
        for j in 0..=lines {
            let center = Point::new(f64::from(i) * pitch, f64::from(j) * pitch);
            surface.fill_circle(center, config.grid_point_radius, config.grid_point_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ablation_core::{EngineConfig, ShapeKind};

    const BLACK: Rgba = [0, 0, 0, 255];

    fn small_engine(config: EngineConfig) -> AblationEngine {
        AblationEngine::new(config.with_surface_size(120)).expect("valid config")
    }

    fn opaque() -> RendererConfig {
        RendererConfig::default().with_background(BLACK)
    }

    #[test]
    fn test_empty_free_frame_is_transparent() {
        let mut engine = small_engine(EngineConfig::free());
        let mut renderer = Renderer::new(RendererConfig::default(), 120);
        renderer.render(&mut engine).expect("render");

        assert_eq!(renderer.frame_count(), 1);
        assert!(renderer
            .surface()
            .pixels()
            .chunks_exact(4)
            .all(|px| px == [0, 0, 0, 0]));
    }

    #[test]
    fn test_background_override() {
        let mut engine = small_engine(EngineConfig::free());
        let mut renderer = Renderer::new(opaque(), 120);
        renderer.render(&mut engine).expect("render");
        assert_eq!(renderer.config().background_color, BLACK);
        assert!(renderer
            .surface()
            .pixels()
            .chunks_exact(4)
            .all(|px| px == BLACK));
    }

    #[test]
    fn test_size_mismatch_is_error() {
        let mut engine = small_engine(EngineConfig::free());
        let mut renderer = Renderer::new(RendererConfig::default(), 64);
        assert!(matches!(
            renderer.render(&mut engine),
            Err(RenderError::Surface(_))
        ));
        assert_eq!(renderer.frame_count(), 0);
    }

    #[test]
    fn test_active_shape_gets_outline() {
        let mut engine = small_engine(EngineConfig::free());
        engine.create_shape(ShapeKind::Square, Point::new(60.0, 60.0));
        let mut surface = PixelSurface::new(120);
        let mut renderer = Renderer::new(opaque(), 120);
        renderer
            .render_into(&mut engine, &mut surface)
            .expect("render");

        // Square of side 80 spans 20..100; its interior stays lit.
        assert_eq!(surface.pixel(60, 60), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(20, 60), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(5, 5), Some(BLACK));
    }

    #[test]
    fn test_grid_points_only_in_grid_mode() {
        let config = opaque();
        let mut grid = AblationEngine::new(EngineConfig::grid()).expect("valid config");
        let mut surface = PixelSurface::new(600);
        Renderer::new(config.clone(), 600)
            .render_into(&mut grid, &mut surface)
            .expect("render");
        // Pitch is 20; (20, 20) is a grid point, (30, 30) lies between points.
        assert_eq!(surface.pixel(20, 20), Some([153, 153, 153, 255]));
        assert_eq!(surface.pixel(0, 0), Some([153, 153, 153, 255]));
        assert_eq!(surface.pixel(30, 30), Some(BLACK));

        let mut free = small_engine(EngineConfig::free());
        let mut renderer = Renderer::new(config, 120);
        renderer.render(&mut free).expect("render");
        let surface = renderer.surface();
        assert!(surface.pixels().chunks_exact(4).all(|px| px == BLACK));
    }
}
