use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use crate::coords::RenderSize;

/// Per-frame uniform block for the vertex stage.
///
/// `projection` is stored column-major (`projection[c][r]`), which is the
/// memory order of WGSL `mat4x4<f32>` and of `glam::Mat4`. The vertex stage
/// computes `projection * vec4(position, 0.0, 1.0)`; [`project`](Self::project)
/// is the CPU equivalent.
///
/// 64 bytes, 16-byte aligned to match the uniform address space.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RenderParameters {
    pub projection: [[f32; 4]; 4],
}

impl RenderParameters {
    #[inline]
    pub fn identity() -> Self {
        Self::from(Mat4::IDENTITY)
    }

    /// Pixel-space orthographic projection for a drawable of `size`.
    ///
    /// Origin top-left, +Y down: `(0, 0)` maps to clip `(-1, 1)` and
    /// `(w, h)` to `(1, -1)`. Near/far are `-1`/`1` with a `[0, 1]` depth range.
    pub fn orthographic(size: RenderSize) -> Self {
        let w = size.width.max(1) as f32;
        let h = size.height.max(1) as f32;
        Self::from(Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0))
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection)
    }

    /// Transforms a vertex position into homogeneous clip space.
    #[inline]
    pub fn project(&self, position: [f32; 2]) -> [f32; 4] {
        (self.matrix() * Vec4::new(position[0], position[1], 0.0, 1.0)).to_array()
    }
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Mat4> for RenderParameters {
    #[inline]
    fn from(m: Mat4) -> Self {
        Self { projection: m.to_cols_array_2d() }
    }
}

/// Fragment-stage uniform describing the ball array.
///
/// GPU bindings cannot be zero-sized, so the ball storage buffer always holds at
/// least one element. `ball_count` is the authoritative length; shaders must
/// loop over `ball_count`, never `arrayLength`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct FieldParameters {
    /// Render size in physical pixels.
    pub size: [u32; 2],
    pub ball_count: u32,
    pub _pad: u32,
}

impl FieldParameters {
    #[inline]
    pub fn new(size: RenderSize, ball_count: u32) -> Self {
        Self {
            size: [size.width, size.height],
            ball_count,
            _pad: 0,
        }
    }
}
