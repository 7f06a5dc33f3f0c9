//! Rasterization of a [`crate::draw::DrawList`] into an RGBA8 frame.

pub mod backend;
pub mod cpu;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend};
