use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framescrub", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preload every scheduled frame and report how many loaded.
    Preload(PreloadArgs),
    /// Render the frame shown at one scroll progress as a PNG.
    Frame(FrameArgs),
    /// Render evenly spaced scroll positions as a numbered PNG sequence.
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct PreloadArgs {
    /// Sequence config JSON. Frame paths resolve against its directory.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Sequence config JSON. Frame paths resolve against its directory.
    #[arg(long)]
    config: PathBuf,

    /// Viewport width in layout pixels.
    #[arg(long)]
    width: f64,

    /// Viewport height in layout pixels.
    #[arg(long)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Force the reduced device profile regardless of width.
    #[arg(long)]
    reduced: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Number of evenly spaced positions from 0 to 1 (inclusive).
    #[arg(long, default_value_t = 11)]
    steps: u32,

    /// Output directory for `scrub-NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Preload(args) => cmd_preload(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: &Path) -> anyhow::Result<framescrub::SequenceConfig> {
    let cfg = framescrub::SequenceConfig::from_path(path)?;
    cfg.validate()
        .with_context(|| format!("validate config '{}'", path.display()))?;
    Ok(cfg)
}

fn frame_source(config_path: &Path) -> Arc<dyn framescrub::FrameSource> {
    let root = config_path.parent().unwrap_or_else(|| Path::new("."));
    Arc::new(framescrub::DirSource::new(root))
}

fn preload(
    cfg: &framescrub::SequenceConfig,
    config_path: &Path,
    stride: u32,
) -> anyhow::Result<Arc<framescrub::FrameSet>> {
    let mut pre = framescrub::Preloader::start(
        cfg.preload_request(stride)?,
        frame_source(config_path),
        cfg.preload_opts(),
    )?;
    pre.wait();
    pre.frames()
        .context("preload finished without publishing frames (bug)")
}

/// Active player with a surface sized for the requested viewport.
fn build_player(args: &SurfaceArgs) -> anyhow::Result<framescrub::Player> {
    let cfg = read_config(&args.config)?;
    let viewport = framescrub::Viewport::new(args.width, args.height)?;
    let profile = if args.reduced {
        framescrub::DeviceProfile::Reduced
    } else {
        framescrub::DeviceProfile::for_viewport(viewport)
    };
    let canvas = framescrub::Canvas::for_viewport(viewport, profile.effective_dpr(args.dpr))?;
    let frames = preload(&cfg, &args.config, profile.stride(cfg.stride))?;
    tracing::debug!(?profile, slots = frames.len(), "frames ready");

    let mut player = framescrub::Player::new(framescrub::PlayerOpts {
        last_frame_index: cfg.last_frame_index,
        addressing: profile.addressing(),
    });
    player.attach_surface(framescrub::Surface::new(canvas, framescrub::BLACK));
    player.activate(frames)?;
    Ok(player)
}

fn cmd_preload(args: PreloadArgs) -> anyhow::Result<()> {
    let cfg = read_config(&args.config)?;
    let frames = preload(&cfg, &args.config, cfg.stride)?;
    println!(
        "loaded {} of {} frames ({} failed)",
        frames.loaded_count(),
        frames.len(),
        frames.failed_count()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.progress) {
        anyhow::bail!("--progress must be within [0, 1], got {}", args.progress);
    }
    let mut player = build_player(&args.surface)?;
    let tick = player
        .update(args.progress, &mut framescrub::NoEffect)
        .context("player is not active (bug)")?;
    tracing::debug!(frame = tick.frame, repainted = tick.repainted, "frame mapped");

    let surface = player.surface().context("player lost its surface (bug)")?;
    surface.save_png(&args.out)?;
    eprintln!("wrote {} (frame {})", args.out.display(), tick.frame);
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("--steps must be >= 2, got {}", args.steps);
    }
    let mut player = build_player(&args.surface)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let last = args.steps - 1;
    for i in 0..args.steps {
        let progress = f64::from(i) / f64::from(last);
        player
            .update(progress, &mut framescrub::NoEffect)
            .context("player is not active (bug)")?;
        let surface = player.surface().context("player lost its surface (bug)")?;
        surface.save_png(&args.out_dir.join(format!("scrub-{i:04}.png")))?;
    }

    eprintln!(
        "wrote {} frames to {} ({} repaints)",
        args.steps,
        args.out_dir.display(),
        player.paint_count()
    );
    Ok(())
}
