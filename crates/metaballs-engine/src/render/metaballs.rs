use std::num::NonZeroU64;

use anyhow::Result;
use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::coords::{pixel_quad, RenderSize, QUAD_VERTEX_COUNT};
use crate::layout::{wgsl, Ball, FieldParameters, RenderParameters, Vertex};
use crate::render::{RenderCtx, RenderTarget};

use super::{BallBuffer, FieldShader};

/// Draws the field over a full-drawable quad.
///
/// Per frame the host calls [`prepare`](Self::prepare) with that frame's
/// projection and balls, then [`render`](Self::render). Pipelines are rebuilt
/// when the surface format changes and the quad when the drawable is resized.
pub struct MetaballsRenderer {
    shader: FieldShader,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    render_ubo: Option<wgpu::Buffer>,
    field_ubo: Option<wgpu::Buffer>,
    balls: Option<BallBuffer>,

    quad_size: Option<RenderSize>,
    quad_vbo: Option<wgpu::Buffer>,
}

impl MetaballsRenderer {
    /// Creates a renderer for the given fragment stage.
    ///
    /// Fails if the Rust layout and the generated WGSL declarations disagree.
    pub fn new(shader: FieldShader) -> Result<Self> {
        wgsl::verify()?;
        Ok(Self {
            shader,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            render_ubo: None,
            field_ubo: None,
            balls: None,
            quad_size: None,
            quad_vbo: None,
        })
    }

    /// Uploads one frame's data.
    ///
    /// `balls` may be empty: the count uploaded is zero and the previous
    /// storage contents are left untouched but unreachable.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, parameters: &RenderParameters, balls: &[Ball]) {
        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx);
        self.ensure_quad(ctx);

        let Some(ball_buffer) = self.balls.as_mut() else { return };
        if ball_buffer.write(ctx.device, ctx.queue, balls) {
            self.bind_group = None;
        }
        self.ensure_bindings(ctx);

        let ball_count = u32::try_from(balls.len()).unwrap_or(u32::MAX);
        write_uniform(ctx, self.render_ubo.as_ref(), parameters);
        write_uniform(ctx, self.field_ubo.as_ref(), &FieldParameters::new(ctx.size, ball_count));
    }

    /// Records the draw into `target`, on top of its current contents.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if ctx.size.is_empty() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("metaballs field pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.draw(0..QUAD_VERTEX_COUNT, 0..1);
    }

    /// Number of balls uploaded by the last [`prepare`](Self::prepare).
    pub fn ball_count(&self) -> usize {
        self.balls.as_ref().map_or(0, BallBuffer::len)
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        log::debug!(
            "building metaballs pipeline '{}' for {:?}",
            self.shader.label(),
            ctx.surface_format
        );

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.shader.label()),
            source: wgpu::ShaderSource::Wgsl(self.shader.module_source().into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("metaballs bgl"),
                entries: &[
                    layout_entry::<RenderParameters>(
                        0,
                        wgpu::ShaderStages::VERTEX,
                        wgpu::BufferBindingType::Uniform,
                    ),
                    layout_entry::<FieldParameters>(
                        1,
                        wgpu::ShaderStages::FRAGMENT,
                        wgpu::BufferBindingType::Uniform,
                    ),
                    layout_entry::<Ball>(
                        2,
                        wgpu::ShaderStages::FRAGMENT,
                        wgpu::BufferBindingType::Storage { read_only: true },
                    ),
                ],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("metaballs pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("metaballs pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(self.shader.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection flips winding; draw both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.render_ubo.is_none() {
            self.render_ubo = Some(create_uniform::<RenderParameters>(ctx, "metaballs render ubo"));
        }
        if self.field_ubo.is_none() {
            self.field_ubo = Some(create_uniform::<FieldParameters>(ctx, "metaballs field ubo"));
        }
        if self.balls.is_none() {
            self.balls = Some(BallBuffer::new(ctx.device));
        }
    }

    fn ensure_quad(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_size == Some(ctx.size) && self.quad_vbo.is_some() {
            return;
        }
        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("metaballs quad vbo"),
            contents: bytemuck::cast_slice(&pixel_quad(ctx.size)),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_size = Some(ctx.size);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(render_ubo) = self.render_ubo.as_ref() else { return };
        let Some(field_ubo) = self.field_ubo.as_ref() else { return };
        let Some(balls) = self.balls.as_ref() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("metaballs bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: render_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: field_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: balls.buffer().as_entire_binding(),
                },
            ],
        }));
    }
}

// ── binding helpers ───────────────────────────────────────────────────────

fn min_binding_size<T>() -> Option<NonZeroU64> {
    NonZeroU64::new(std::mem::size_of::<T>() as u64)
}

fn layout_entry<T>(
    binding: u32,
    visibility: wgpu::ShaderStages,
    ty: wgpu::BufferBindingType,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: min_binding_size::<T>(),
        },
        count: None,
    }
}

fn create_uniform<T>(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn write_uniform<T: Pod>(ctx: &RenderCtx<'_>, ubo: Option<&wgpu::Buffer>, value: &T) {
    let Some(ubo) = ubo else { return };
    ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(value));
}
