use bytemuck::{Pod, Zeroable};

/// One field source: center `(x, y)` and influence radius `r`.
///
/// Layout (12 bytes, align 4):
///
///  offset 0  x  f32
///  offset 4  y  f32
///  offset 8  r  f32
///
/// Balls are uploaded as a tightly packed `array<Ball>` storage buffer, so the
/// array stride is also 12 bytes. Do not switch to `vec3<f32>` on the shader
/// side: its 16-byte alignment would introduce a stride mismatch.
///
/// The sign of `r` is not checked here. Negative radii only make sense if the
/// field evaluator defines repulsion.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Ball {
    #[inline]
    pub const fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    #[inline]
    pub const fn center(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Axis-aligned box of the influence disc as `(min, max)` corners.
    ///
    /// Uses `|r|` so a repelling source still reports a non-inverted box.
    #[inline]
    pub fn bounds(self) -> ([f32; 2], [f32; 2]) {
        let [x, y] = self.center();
        let r = self.r.abs();
        ([x - r, y - r], [x + r, y + r])
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.r.is_finite()
    }
}

impl From<[f32; 3]> for Ball {
    #[inline]
    fn from([x, y, r]: [f32; 3]) -> Self {
        Self { x, y, r }
    }
}

impl From<Ball> for [f32; 3] {
    #[inline]
    fn from(b: Ball) -> Self {
        [b.x, b.y, b.r]
    }
}
