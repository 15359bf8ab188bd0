use bytemuck::{Pod, Zeroable};

/// Screen-space vertex of the quad the field is rasterized on.
///
/// Layout (16 bytes):
///
///  offset 0  position            [f32; 2]   loc 0
///  offset 8  texture_coordinate  [f32; 2]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub texture_coordinate: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2  // texture_coordinate
    ];

    #[inline]
    pub const fn new(position: [f32; 2], texture_coordinate: [f32; 2]) -> Self {
        Self { position, texture_coordinate }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
