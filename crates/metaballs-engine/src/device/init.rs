/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features. The metaballs pipeline needs none.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// The fragment stage reads balls from a storage buffer, so the limits must
    /// allow at least one storage buffer per stage.
    pub required_limits: wgpu::Limits,

    /// Maximum number of frames queued ahead of the GPU.
    ///
    /// `2` keeps one frame in flight while the host prepares the next one's
    /// balls and parameters.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
