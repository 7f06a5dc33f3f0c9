use crate::draw::DrawList;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SketchError, SketchResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** by default; the `premultiplied` flag makes this explicit
/// at API boundaries (video sinks and PNG export un-premultiply or flatten as needed).
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub(crate) fn validate_len(&self) -> SketchResult<()> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(SketchError::validation(format!(
                "frame data is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Something that turns a frame's draw list into pixels.
pub trait RenderBackend {
    fn render(&mut self, canvas: Canvas, list: &DrawList) -> SketchResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, the target is cleared to this color before the draw list runs.
    pub clear_rgba: Option<Rgba8>,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SketchResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}
