//! CPU/GPU shared data layout.
//!
//! Every type here is uploaded to the GPU as raw bytes and read back by WGSL
//! under the declarations generated in [`wgsl`]. They are flat `#[repr(C)]`
//! values: no pointers, no optional or variable-length fields.
//!
//! Binding contract used by the renderer:
//! - group 0, binding 0: `RenderParameters` (uniform, vertex stage)
//! - group 0, binding 1: `FieldParameters` (uniform, fragment stage)
//! - group 0, binding 2: `array<Ball>` (read-only storage, fragment stage)
//! - vertex buffer 0: `Vertex` (per-vertex)

mod ball;
mod bytes;
mod params;
mod vertex;

pub mod wgsl;

pub use ball::Ball;
pub use bytes::{as_bytes, read_balls, read_slice, read_value, LayoutError};
pub use params::{FieldParameters, RenderParameters};
pub use vertex::Vertex;

use static_assertions::{assert_eq_align, assert_eq_size, const_assert_eq};

assert_eq_size!(Ball, [f32; 3]);
assert_eq_align!(Ball, f32);

assert_eq_size!(Vertex, [[f32; 2]; 2]);
assert_eq_align!(Vertex, f32);

assert_eq_size!(RenderParameters, [f32; 16]);
const_assert_eq!(std::mem::align_of::<RenderParameters>(), 16);

assert_eq_size!(FieldParameters, [u32; 4]);
