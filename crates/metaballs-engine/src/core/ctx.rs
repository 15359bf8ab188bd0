use winit::window::Window;

use crate::coords::RenderSize;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub fn size(&self) -> RenderSize {
        self.gpu.size()
    }

    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`]
    /// and [`RenderTarget`], then presents the frame.
    ///
    /// Skips the frame while the drawable is empty (minimized window).
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let size = self.gpu.size();
        if size.is_empty() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        AppControl::Continue
                    }
                };
            }
        };

        // Clear pass, dropped before the encoder is moved into submit().
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("metaballs clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            size,
        );

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
