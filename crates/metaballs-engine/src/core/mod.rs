//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the host-side
//! producer that fills the shared layout each frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
