//! # Stacked Ablation Core
//!
//! Places circles, squares and triangles on a square surface and computes
//! their even-odd overlap: a pixel is lit when it lies inside an odd number
//! of shapes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               ablation-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Interaction     │  Cache Manager           │
//! │  - Select/create │  - Full region           │
//! │  - Drag/rotate   │  - Background (N-1)      │
//! │  - Triple-click  │  - Incremental XOR       │
//! ├─────────────────────────────────────────────┤
//! │  Compositor      │  Geometry                │
//! │  - Parity scan   │  - Local-frame tests     │
//! │  - XOR update    │  - Clamp / grid snap     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: an intent mutates the shape list or the active
//! shape, the cache decides between a full or incremental recompute, and
//! the compositor produces the region the host draws.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
mod input;
pub mod interaction;
pub mod region;
pub mod scene;
pub mod session;
pub mod shape;

pub use cache::{CacheManager, CacheState, CacheStats, Recompute};
pub use compositor::Compositor;
pub use config::EngineConfig;
pub use engine::{AblationEngine, SelectOutcome};
pub use error::{EngineError, EngineResult};
pub use event::{ArrowKey, InputEvent, Intent, PointerButton};
pub use geometry::{PixelBounds, Point};
pub use interaction::{ClickChain, InteractionState, Press};
pub use region::Region;
pub use scene::ShapeList;
pub use session::{Mode, Session};
pub use shape::{Shape, ShapeId, ShapeKind, Sizing};

/// Ablation core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
