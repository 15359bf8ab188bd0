use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::coords::RenderSize;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Host-side producer driven by the runtime.
pub trait App {
    /// Called for window events the runtime does not consume itself.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once the surface exists and on every drawable resize.
    ///
    /// This is where size-dependent values such as the projection are
    /// recomputed.
    fn on_resize(&mut self, size: RenderSize);

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
