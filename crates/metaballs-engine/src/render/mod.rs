//! GPU rendering subsystem.
//!
//! The host uploads the shared layout types each frame and the renderer binds
//! them for the shader stage.
//!
//! Convention:
//! - CPU geometry is in physical pixels (top-left origin, +Y down).
//! - The vertex stage converts to clip space with `RenderParameters.projection`.

mod ball_buffer;
mod ctx;
mod field_shader;
mod metaballs;

pub use ball_buffer::BallBuffer;
pub use ctx::{RenderCtx, RenderTarget};
pub use field_shader::FieldShader;
pub use metaballs::MetaballsRenderer;
