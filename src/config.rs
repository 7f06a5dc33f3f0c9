//! JSON sketch configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::driver::frame::{DriverConfig, FrameDriver};
use crate::driver::registry::find_sketch;
use crate::driver::sketch::SketchDescriptor;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{SketchError, SketchResult};
use crate::record::recorder::RecordingSettings;
use crate::record::sink::Container;
use crate::render::backend::BackendKind;

/// Recording section of [`SketchConfig`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordingConfig {
    pub max_frames: u64,
    /// Bits per second.
    pub bitrate: u32,
    pub keyframe_interval: u32,
    /// Defaults to the output extension, then MP4.
    pub container: Option<Container>,
    /// Defaults to `<file_stem>.<ext>` of the sketch.
    pub out: Option<PathBuf>,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        let d = RecordingSettings::default();
        Self {
            max_frames: d.max_frames,
            bitrate: d.bitrate,
            keyframe_interval: d.keyframe_interval,
            container: None,
            out: None,
        }
    }
}

/// A sketch run: which sketch, and any overrides of its registered defaults.
///
/// ```json
/// { "sketch": "bronze-flow", "seed": 7, "recording": { "max_frames": 600 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    pub sketch: String,
    pub canvas: Option<Canvas>,
    pub fps: Option<Fps>,
    pub clock_increment: Option<f64>,
    pub seed: u64,
    pub parallel: bool,
    /// `#rrggbb` or `#rrggbbaa`.
    pub background: Option<String>,
    pub recording: RecordingConfig,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::for_sketch("orbit-dust")
    }
}

impl SketchConfig {
    pub fn for_sketch(name: impl Into<String>) -> Self {
        Self {
            sketch: name.into(),
            canvas: None,
            fps: None,
            clock_increment: None,
            seed: 0,
            parallel: false,
            background: None,
            recording: RecordingConfig::default(),
        }
    }

    pub fn from_json_str(s: &str) -> SketchResult<Self> {
        serde_json::from_str(s).map_err(|e| SketchError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> SketchResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|e| SketchError::serde(format!("{}: {e}", path.display())))
    }

    pub fn descriptor(&self) -> SketchResult<&'static SketchDescriptor> {
        find_sketch(&self.sketch)
    }

    pub fn canvas(&self) -> SketchResult<Canvas> {
        Ok(self.canvas.unwrap_or(self.descriptor()?.canvas))
    }

    pub fn background(&self) -> SketchResult<Option<Rgba8>> {
        self.background.as_deref().map(Rgba8::from_hex).transpose()
    }

    /// Explicit container, else the output extension, else MP4.
    pub fn container(&self) -> Container {
        self.recording
            .container
            .or_else(|| self.recording.out.as_deref().and_then(Container::from_path))
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> SketchResult<PathBuf> {
        match &self.recording.out {
            Some(p) => Ok(p.clone()),
            None => Ok(PathBuf::from(format!(
                "{}.{}",
                self.descriptor()?.file_stem,
                self.container().extension()
            ))),
        }
    }

    pub fn recording_settings(&self) -> SketchResult<RecordingSettings> {
        Ok(RecordingSettings {
            fps: self.fps.unwrap_or(self.descriptor()?.fps),
            max_frames: self.recording.max_frames,
            bitrate: self.recording.bitrate,
            keyframe_interval: self.recording.keyframe_interval,
            container: self.container(),
        })
    }

    pub fn validate(&self) -> SketchResult<()> {
        let desc = self.descriptor()?;
        self.canvas()?.validate()?;
        if let Some(fps) = self.fps {
            fps.validate()?;
        }
        let inc = self.clock_increment.unwrap_or(desc.clock_increment);
        if !inc.is_finite() || inc <= 0.0 {
            return Err(SketchError::validation(
                "clock_increment must be finite and > 0",
            ));
        }
        self.background()?;
        self.recording_settings()?.validate()?;
        if let (Some(explicit), Some(out)) = (self.recording.container, &self.recording.out)
            && let Some(from_ext) = Container::from_path(out)
            && explicit != from_ext
        {
            return Err(SketchError::validation(format!(
                "container '{explicit}' does not match output '{}'",
                out.display()
            )));
        }
        Ok(())
    }

    pub fn driver_config(&self) -> SketchResult<DriverConfig> {
        self.validate()?;
        let desc = self.descriptor()?;
        Ok(DriverConfig {
            canvas: self.canvas()?,
            clock_increment: self.clock_increment.unwrap_or(desc.clock_increment),
            seed: self.seed,
            palette: None,
            parallel: self.parallel,
            background: self.background()?,
            recording: self.recording_settings()?,
            backend: BackendKind::Cpu,
        })
    }

    pub fn build_driver(&self) -> SketchResult<FrameDriver> {
        let cfg = self.driver_config()?;
        FrameDriver::new(self.descriptor()?.create()?, cfg)
    }
}
