//! Immediate-mode drawing: a per-frame [`DrawList`] rebuilt from scratch every frame, and a
//! perspective [`Camera`] that flattens world-space points into canvas space.

pub mod camera;
pub mod list;

pub use camera::{Camera, Projected};
pub use list::{DrawList, DrawOp};
