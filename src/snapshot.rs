//! Still-image export of a rendered frame.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::SketchResult;
use crate::record::ffmpeg::ensure_parent_dir;
use crate::render::backend::FrameRGBA;

/// Write `frame` as a straight-alpha RGBA PNG, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> SketchResult<()> {
    frame.validate_len()?;
    ensure_parent_dir(path)?;
    let data = frame.to_straight_rgba8();
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Default snapshot file name for a sketch at a given tick.
pub fn png_file_name(file_stem: &str, tick: u64) -> String {
    format!("{file_stem}_{tick:06}.png")
}
