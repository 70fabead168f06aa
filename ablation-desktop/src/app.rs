//! Desktop application on a minifb framebuffer window.

use std::time::Instant;

use ablation_core::{ArrowKey, Intent, Session, ShapeKind};
use ablation_renderer::Renderer;
use anyhow::Result;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Scale, Window, WindowOptions};

use crate::input::{InputSnapshot, PointerTracker};
use crate::{DesktopConfig, WindowScale};

const ARROWS: [(Key, ArrowKey); 4] = [
    (Key::Up, ArrowKey::Up),
    (Key::Down, ArrowKey::Down),
    (Key::Left, ArrowKey::Left),
    (Key::Right, ArrowKey::Right),
];

/// Desktop ablation application.
///
/// Owns the window, the two-mode session and the renderer. Each loop
/// iteration polls the window, routes hotkeys and pointer input to the
/// current engine and redraws only when something changed.
pub struct AblationDesktopApp {
    config: DesktopConfig,
    session: Session,
    renderer: Renderer,
    window: Window,
    tracker: PointerTracker,
    frame: Vec<u32>,
    started: Instant,
}

impl AblationDesktopApp {
    /// Open the window and build the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the window cannot
    /// be created.
    pub fn new(config: DesktopConfig) -> Result<Self> {
        let session = config.session()?;
        let size = config.surface_size as usize;

        let options = WindowOptions {
            scale: window_scale(config.scale),
            ..WindowOptions::default()
        };
        let mut window = Window::new(&config.title, size, size, options)
            .map_err(|e| anyhow::anyhow!("Failed to create window: {e}"))?;
        window.set_target_fps(60);
        tracing::info!(size, scale = ?config.scale, "Window created");

        Ok(Self {
            renderer: Renderer::new(config.renderer_config(), config.surface_size),
            session,
            window,
            tracker: PointerTracker::new(),
            frame: Vec::with_capacity(size * size),
            started: Instant::now(),
            config,
        })
    }

    /// Run until the window is closed or Escape is pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or presenting a frame fails.
    pub fn run(&mut self) -> Result<()> {
        self.update_title();
        let mut dirty = true;

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            dirty |= self.handle_hotkeys();

            let snapshot = self.poll();
            let now = self.elapsed_ms();
            for event in self.tracker.translate(&snapshot, now) {
                dirty |= self.session.current_mut().handle_input(&event);
            }

            if dirty {
                self.present()?;
                dirty = false;
            } else {
                self.window.update();
            }
        }

        let stats = self.session.current().cache_stats();
        tracing::info!(
            frames = self.renderer.frame_count(),
            full = stats.full_recomputes,
            incremental = stats.incremental_updates,
            hits = stats.cache_hits,
            "Window closed"
        );
        Ok(())
    }

    /// Mode, shape-type and clearing shortcuts. Returns whether a redraw is
    /// needed.
    fn handle_hotkeys(&mut self) -> bool {
        let pressed = |key| self.window.is_key_pressed(key, KeyRepeat::No);

        let mut intent = None;
        if pressed(Key::Key1) {
            intent = Some(Intent::SelectShapeType {
                kind: ShapeKind::Circle,
            });
        } else if pressed(Key::Key2) {
            intent = Some(Intent::SelectShapeType {
                kind: ShapeKind::Square,
            });
        } else if pressed(Key::Key3) {
            intent = Some(Intent::SelectShapeType {
                kind: ShapeKind::Triangle,
            });
        } else if pressed(Key::Delete) || pressed(Key::Backspace) {
            intent = Some(Intent::DeleteActive);
        }

        let toggle = pressed(Key::M);
        let clear = pressed(Key::C);

        let mut dirty = intent.is_some_and(|i| self.session.current_mut().apply(&i));
        if toggle {
            self.session.switch_mode(self.session.mode().toggled());
            self.update_title();
            dirty = true;
        }
        if clear {
            self.session.clear_current();
            dirty = true;
        }
        dirty
    }

    fn poll(&self) -> InputSnapshot {
        let window = &self.window;
        InputSnapshot {
            pointer: window.get_mouse_pos(MouseMode::Discard),
            primary: window.get_mouse_down(MouseButton::Left),
            secondary: window.get_mouse_down(MouseButton::Right),
            middle: window.get_mouse_down(MouseButton::Middle),
            scroll_y: window.get_scroll_wheel().map(|(_, y)| y),
            arrows: ARROWS
                .iter()
                .filter(|(key, _)| window.is_key_pressed(*key, KeyRepeat::Yes))
                .map(|&(_, arrow)| arrow)
                .collect(),
        }
    }

    fn present(&mut self) -> Result<()> {
        self.renderer.render(self.session.current_mut())?;
        pack_rgb(self.renderer.surface().pixels(), &mut self.frame);

        let size = self.config.surface_size as usize;
        self.window
            .update_with_buffer(&self.frame, size, size)
            .map_err(|e| anyhow::anyhow!("Failed to present frame: {e}"))
    }

    fn update_title(&mut self) {
        let title = format!("{} - {:?}", self.config.title, self.session.mode());
        self.window.set_title(&title);
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

fn window_scale(scale: WindowScale) -> Scale {
    match scale {
        WindowScale::X1 => Scale::X1,
        WindowScale::X2 => Scale::X2,
        WindowScale::X4 => Scale::X4,
    }
}

/// Convert RGBA bytes to minifb's `0RGB` words.
fn pack_rgb(rgba: &[u8], out: &mut Vec<u32>) {
    out.clear();
    out.extend(
        rgba.chunks_exact(4)
            .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])),
    );
}
