//! # Particle Renderer
//!
//! Draws the emergence simulations onto a 2D canvas: fading trails by
//! low-alpha overpaint, additive glow, and per-entity dashes, dots and links.
//! `PixelCanvas` is the software surface the host presents; it also makes
//! every renderer testable without a window.

pub mod camera;
pub mod canvas;
pub mod color;
pub mod flock_renderer;
pub mod gravity_renderer;
pub mod network_renderer;
pub mod orbital_renderer;
pub mod pair_renderer;
pub mod pixel_canvas;
pub mod renderer;
pub mod session;

pub use camera::*;
pub use canvas::*;
pub use color::*;
pub use flock_renderer::*;
pub use gravity_renderer::*;
pub use network_renderer::*;
pub use orbital_renderer::*;
pub use pair_renderer::*;
pub use pixel_canvas::*;
pub use renderer::*;
pub use session::*;
