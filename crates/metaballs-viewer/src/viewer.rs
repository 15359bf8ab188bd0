use anyhow::Result;
use metaballs_engine::coords::RenderSize;
use metaballs_engine::core::{App, AppControl, FrameCtx};
use metaballs_engine::layout::{Ball, RenderParameters};
use metaballs_engine::render::{FieldShader, MetaballsRenderer};

use crate::config::{AppearanceConfig, ViewerConfig};

const FIELD_WGSL: &str = include_str!("shaders/field.wgsl");

/// Host-side producer: owns the balls and the projection, uploads both every frame.
pub struct Viewer {
    renderer: MetaballsRenderer,
    balls: Vec<Ball>,
    parameters: RenderParameters,
    clear: wgpu::Color,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let shader = FieldShader::new("metaballs viewer field", field_source(&config.appearance));
        let balls = config.balls();
        log::info!("viewer starting with {} ball(s)", balls.len());

        Ok(Self {
            renderer: MetaballsRenderer::new(shader)?,
            balls,
            parameters: RenderParameters::identity(),
            clear: to_wgpu_color(config.appearance.background),
        })
    }
}

impl App for Viewer {
    fn on_resize(&mut self, size: RenderSize) {
        self.parameters = RenderParameters::orthographic(size);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { renderer, balls, parameters, clear } = self;

        let control = ctx.render(*clear, |rctx, target| {
            renderer.prepare(rctx, parameters, balls);
            renderer.render(rctx, target);
        });

        if ctx.frame_index == 0 {
            log::debug!("first frame at {}", ctx.size());
        }
        control
    }
}

fn wgsl_vec4(c: [f32; 4]) -> String {
    let [r, g, b, a] = c.map(|x| x.clamp(0.0, 1.0));
    format!("vec4<f32>({r:.6}, {g:.6}, {b:.6}, {a:.6})")
}

/// Fragment source with the appearance baked in as WGSL constants.
fn field_source(appearance: &AppearanceConfig) -> String {
    let mut src = format!("const COLOR_STYLE: u32 = {}u;\n", appearance.style.shader_id());
    for (i, c) in appearance.colors.iter().enumerate() {
        src.push_str(&format!("const COLOR{i}: vec4<f32> = {};\n", wgsl_vec4(*c)));
    }
    src.push('\n');
    src.push_str(FIELD_WGSL);
    src
}

fn to_wgpu_color(c: [f32; 4]) -> wgpu::Color {
    let [r, g, b, a] = c.map(|x| f64::from(x.clamp(0.0, 1.0)));
    wgpu::Color { r, g, b, a }
}
