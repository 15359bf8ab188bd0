//! Metaballs engine crate.
//!
//! The center of this crate is [`layout`]: the `#[repr(C)]` types shared
//! byte-for-byte between the host and the WGSL shader stage. The other modules
//! are the wgpu/winit plumbing that uploads them.

pub mod coords;
pub mod core;
pub mod device;
pub mod layout;
pub mod logging;
pub mod render;
pub mod window;
