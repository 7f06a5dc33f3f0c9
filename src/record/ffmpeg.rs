use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{SyncSender, sync_channel};
use std::thread::JoinHandle;

use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::mul_div255_u16;
use crate::record::sink::{Container, SinkConfig, SinkOutput, TimedFrame, VideoSink};

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Background used to flatten alpha (straight alpha).
    pub bg: Rgba8,
    /// Frames buffered between the render loop and the encoder process.
    pub queue_depth: usize,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg: Rgba8::BLACK,
            queue_depth: 8,
        }
    }

    pub fn with_background(mut self, bg: Rgba8) -> Self {
        self.bg = bg;
        self
    }
}

struct FrameWriter {
    tx: SyncSender<Vec<u8>>,
    handle: JoinHandle<std::io::Result<()>>,
}

/// Sink that spawns the system `ffmpeg` and streams flattened RGBA frames into its stdin.
///
/// Writes happen on a dedicated thread behind a bounded queue, so `push_frame` only blocks when
/// the encoder falls `queue_depth` frames behind. A dead encoder surfaces as
/// [`SketchError::EncoderFault`] on the next push or at `end`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    writer: Option<FrameWriter>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    frames: u64,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            writer: None,
            stderr_drain: None,
            cfg: None,
            last_idx: None,
            frames: 0,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn join_writer(writer: FrameWriter) -> SketchResult<()> {
        drop(writer.tx);
        writer
            .handle
            .join()
            .map_err(|_| SketchError::encoder_fault("ffmpeg writer thread panicked"))?
            .map_err(|e| {
                SketchError::encoder_fault(format!("failed to write frame to ffmpeg: {e}"))
            })
    }

    fn stderr_text(&mut self) -> String {
        match self.stderr_drain.take().map(|h| h.join()) {
            Some(Ok(Ok(bytes))) => String::from_utf8_lossy(&bytes).trim().to_string(),
            _ => String::new(),
        }
    }
}

impl VideoSink for FfmpegSink {
    fn begin(&mut self, cfg: &SinkConfig) -> SketchResult<()> {
        cfg.validate()?;
        if self.child.is_some() {
            return Err(SketchError::state("ffmpeg sink already started"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SketchError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SketchError::unsupported_encoder(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .args(ffmpeg_args(cfg, self.opts.overwrite))
            .arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SketchError::unsupported_encoder(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take();
        let (Some(mut stdin), Some(mut stderr)) = (stdin, stderr) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SketchError::encoder_fault(
                "failed to open ffmpeg stdio (unexpected)",
            ));
        };

        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        let (tx, rx) = sync_channel::<Vec<u8>>(self.opts.queue_depth.max(1));
        let handle = std::thread::spawn(move || {
            for buf in rx {
                stdin.write_all(&buf)?;
            }
            stdin.flush()
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            container = %cfg.container,
            "ffmpeg sink started"
        );

        self.child = Some(child);
        self.writer = Some(FrameWriter { tx, handle });
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg.clone());
        self.last_idx = None;
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: TimedFrame<'_>) -> SketchResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SketchError::state("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && frame.index <= last
        {
            return Err(SketchError::encoder_fault(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        let f = frame.frame;
        if f.width != cfg.width || f.height != cfg.height {
            return Err(SketchError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                f.width, f.height, cfg.width, cfg.height
            )));
        }
        f.validate_len()?;

        let mut buf = vec![0u8; f.data.len()];
        if f.premultiplied {
            flatten_premul_over_bg_to_opaque_rgba8(&mut buf, &f.data, self.opts.bg)?;
        } else {
            flatten_straight_over_bg_to_opaque_rgba8(&mut buf, &f.data, self.opts.bg)?;
        }

        let sent = match self.writer.as_ref() {
            Some(w) => w.tx.send(buf).is_ok(),
            None => return Err(SketchError::state("ffmpeg sink is already finalized")),
        };
        if !sent {
            // The writer thread only exits early on a write error; report that error.
            let detail = match self.writer.take().map(Self::join_writer) {
                Some(Err(e)) => e.to_string(),
                _ => "ffmpeg stopped accepting frames".to_string(),
            };
            let stderr = self.stderr_text();
            return Err(SketchError::encoder_fault(if stderr.is_empty() {
                detail
            } else {
                format!("{detail}: {stderr}")
            }));
        }

        self.last_idx = Some(frame.index);
        self.frames += 1;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(frames = self.frames))]
    fn end(&mut self) -> SketchResult<SinkOutput> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| SketchError::state("ffmpeg sink not started"))?;
        let write_result = Self::join_writer(writer);

        let mut child = self
            .child
            .take()
            .ok_or_else(|| SketchError::state("ffmpeg sink not started"))?;
        let status = child.wait().map_err(|e| {
            SketchError::encoder_fault(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr = self.stderr_text();
        self.cfg = None;

        write_result?;
        if !status.success() {
            return Err(SketchError::encoder_fault(format!(
                "ffmpeg exited with status {status}: {stderr}"
            )));
        }

        let bytes = std::fs::metadata(&self.opts.out_path).ok().map(|m| m.len());
        Ok(SinkOutput {
            path: Some(self.opts.out_path.clone()),
            frames: self.frames,
            bytes,
        })
    }

    fn abort(&mut self) {
        if let Some(writer) = self.writer.take() {
            drop(writer.tx);
            let _ = writer.handle.join();
        }
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = self.stderr_text();
        self.cfg = None;
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

/// `ffmpeg` arguments up to (not including) the output path.
pub fn ffmpeg_args(cfg: &SinkConfig, overwrite: bool) -> Vec<String> {
    let mut args: Vec<String> = vec![if overwrite { "-y" } else { "-n" }.into()];
    args.extend(
        [
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
        ]
        .map(String::from),
    );
    args.push(format!("{}x{}", cfg.width, cfg.height));
    // Input rate goes before `-i` for rawvideo.
    args.push("-r".into());
    args.push(format!("{}/{}", cfg.fps.num, cfg.fps.den));
    args.extend(["-i", "pipe:0", "-an", "-c:v"].map(String::from));
    args.push(
        match cfg.container {
            Container::Mp4 => "libx264",
            Container::WebM => "libvpx-vp9",
        }
        .into(),
    );
    args.extend(["-pix_fmt", "yuv420p", "-b:v"].map(String::from));
    args.push(cfg.bitrate.to_string());
    args.push("-g".into());
    args.push(cfg.keyframe_interval.to_string());
    match cfg.container {
        Container::Mp4 => args.extend(["-movflags", "+faststart"].map(String::from)),
        Container::WebM => args.extend(["-f", "webm"].map(String::from)),
    }
    args
}

fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg: Rgba8,
) -> SketchResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(SketchError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    let [bg_r, bg_g, bg_b, _] = bg.to_array().map(u16::from);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        d[0] = (u16::from(s[0]) + mul_div255_u16(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255_u16(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255_u16(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }
    Ok(())
}

fn flatten_straight_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    bg: Rgba8,
) -> SketchResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SketchError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    let [bg_r, bg_g, bg_b, _] = bg.to_array().map(u16::from);

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        let mix = |c: u8, bg: u16| {
            (mul_div255_u16(u16::from(c), a) + mul_div255_u16(bg, inv)).min(255) as u8
        };
        d[0] = mix(s[0], bg_r);
        d[1] = mix(s[1], bg_g);
        d[2] = mix(s[2], bg_b);
        d[3] = 255;
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> SketchResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/record/ffmpeg.rs"]
mod tests;
