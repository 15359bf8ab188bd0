use winit::dpi::PhysicalSize;

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
}

impl RenderSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Minimized windows report a zero dimension; nothing can be drawn then.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn to_f32(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

impl From<PhysicalSize<u32>> for RenderSize {
    #[inline]
    fn from(s: PhysicalSize<u32>) -> Self {
        Self::new(s.width, s.height)
    }
}

impl std::fmt::Display for RenderSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
