//! A minimal immediate-mode drawing surface.
//!
//! A [`Canvas`] owns a fixed-size pixel buffer, draws points, lines, rectangles,
//! discs, rings and text into it, and pushes it to a [`DisplaySink`] either after
//! every call or only when asked to.

/// The drawing facade tying everything together
pub mod canvas;

/// TOML configuration
pub mod config;

/// Where frames go: a window, or nowhere in particular
pub mod display;

pub mod error;

/// Positions and sizes in integer pixels
pub mod geometry;

/// Graphics primitives, such as typeface and color
pub mod graphics;

/// Pacing for frame-by-frame animation
pub mod pause;

/// Rendering engine implementation
pub mod render;

pub mod repaint;

pub mod state;

pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use display::{DisplaySink, Headless, PointerEvent};
pub use error::CanvasError;
pub use graphics::{named, Color, Font, MonoSize};
