//! Pixel-space geometry feeding the shared layout.
//!
//! Canonical CPU space:
//! - physical pixels
//! - origin top-left, +X right, +Y down
//!
//! `RenderParameters::orthographic` converts this space to clip space.

mod quad;
mod size;

pub use quad::{pixel_quad, unit_quad, QUAD_VERTEX_COUNT};
pub use size::RenderSize;
