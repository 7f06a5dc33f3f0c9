use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sketchreel::{CaptureOutcome, Container, FfmpegSink, FfmpegSinkOpts, SketchConfig};

#[derive(Parser, Debug)]
#[command(name = "sketchreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in sketches.
    List,
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Record a video (requires `ffmpeg` on PATH).
    Record(RecordArgs),
}

#[derive(Parser, Debug)]
struct SketchArgs {
    /// Built-in sketch name (see `list`).
    #[arg(long, conflicts_with = "config")]
    sketch: Option<String>,

    /// Sketch configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Entity seed; overrides the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate entity layers on the rayon pool.
    #[arg(long)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sketch: SketchArgs,

    /// Clock ticks to skip before rendering (0-based frame number).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path. Defaults to `<file_stem>_<tick>.png`.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    sketch: SketchArgs,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Output video path. Defaults to `<file_stem>.<container>`.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum)]
    container: Option<ContainerChoice>,

    /// Target bitrate in bits per second.
    #[arg(long)]
    bitrate: Option<u32>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ContainerChoice {
    Mp4,
    Webm,
}

impl From<ContainerChoice> for Container {
    fn from(c: ContainerChoice) -> Self {
        match c {
            ContainerChoice::Mp4 => Container::Mp4,
            ContainerChoice::Webm => Container::WebM,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn load_config(args: &SketchArgs) -> anyhow::Result<SketchConfig> {
    let mut cfg = match (&args.config, &args.sketch) {
        (Some(path), _) => SketchConfig::from_path(path)?,
        (None, Some(name)) => SketchConfig::for_sketch(name.as_str()),
        (None, None) => SketchConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    cfg.parallel |= args.parallel;
    Ok(cfg)
}

fn cmd_list() -> anyhow::Result<()> {
    for d in sketchreel::sketches() {
        println!(
            "{:<16} {}x{} @ {}/{}  {}",
            d.name, d.canvas.width, d.canvas.height, d.fps.num, d.fps.den, d.summary
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.sketch)?;
    let mut driver = cfg.build_driver()?;
    driver.seek(args.frame);
    let stats = driver.on_frame();
    if let Some(fault) = stats.fault {
        anyhow::bail!("render failed at tick {}: {fault}", stats.tick);
    }

    let out = match args.out {
        Some(p) => p,
        None => PathBuf::from(sketchreel::snapshot::png_file_name(
            cfg.descriptor()?.file_stem,
            stats.tick,
        )),
    };
    driver
        .snapshot(&out)
        .with_context(|| format!("snapshot '{}'", out.display()))?;

    tracing::info!(
        tick = stats.tick,
        drawn = stats.drawn,
        dropped = stats.dropped,
        malformed = stats.malformed,
        "frame rendered"
    );
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.sketch)?;
    if let Some(n) = args.max_frames {
        cfg.recording.max_frames = n;
    }
    if let Some(out) = args.out {
        cfg.recording.out = Some(out);
    }
    if let Some(c) = args.container {
        cfg.recording.container = Some(c.into());
    }
    if let Some(b) = args.bitrate {
        cfg.recording.bitrate = b;
    }

    let out = cfg.output_path()?;
    let mut driver = cfg.build_driver()?;
    let mut opts = FfmpegSinkOpts::new(out.clone());
    if let Some(bg) = cfg.background()? {
        opts = opts.with_background(bg);
    }
    opts.overwrite = !args.no_overwrite;
    driver.start_recording(Box::new(FfmpegSink::new(opts)))?;

    loop {
        let stats = driver.on_frame();
        if let Some(fault) = stats.fault {
            anyhow::bail!(
                "recording failed at tick {}: {fault} ({})",
                stats.tick,
                driver.recorder().status()
            );
        }
        match stats.capture {
            CaptureOutcome::Finished(output) => {
                eprintln!(
                    "wrote {} ({} frames, {:.2}s, {} bytes)",
                    output.sink.path.as_deref().unwrap_or(&out).display(),
                    output.frames,
                    output.duration_secs(),
                    output.sink.bytes.unwrap_or(0)
                );
                return Ok(());
            }
            CaptureOutcome::Captured { index, .. } if index.0 % 60 == 0 => {
                tracing::info!("{}", driver.recorder().status());
            }
            CaptureOutcome::Captured { .. } | CaptureOutcome::Skipped => {}
        }
    }
}
