//! The shared sketch skeleton: a [`Sketch`] strategy plugged into one [`FrameDriver`].

pub mod frame;
pub mod registry;
pub mod sketch;

pub use frame::{DriverConfig, FrameDriver, FrameStats};
pub use registry::{find_sketch, sketches};
pub use sketch::{EvaluatedLayer, FrameContext, Sketch, SketchDescriptor};
