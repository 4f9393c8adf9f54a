use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "nottie", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an SVG drawing into a project JSON.
    Import(ImportArgs),
    /// Write a Lottie animation from a project JSON or an SVG drawing.
    Export(ExportArgs),
    /// Print the path data of every visible path at one frame.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output project JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Total frame count.
    #[arg(long)]
    frames: Option<u64>,

    /// Frames per second (1-120).
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input project JSON, or an SVG (`.svg`) exported as a static animation.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output Lottie JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Animation name written to the document.
    #[arg(long)]
    name: Option<String>,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.cmd {
        Command::Import(args) => cmd_import(args),
        Command::Export(args) => cmd_export(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn read_state(path: &Path) -> anyhow::Result<nottie::AnimationState> {
    let text = read_text(path)?;
    if is_svg(path) {
        let mut state = nottie::AnimationState::default();
        state
            .import_svg(&text)
            .with_context(|| format!("import svg '{}'", path.display()))?;
        return Ok(state);
    }
    nottie::AnimationState::from_json(&text)
        .with_context(|| format!("load project '{}'", path.display()))
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let svg = read_text(&args.in_path)?;
    let mut state = nottie::AnimationState::default();
    state
        .import_svg(&svg)
        .with_context(|| format!("import svg '{}'", args.in_path.display()))?;
    if let Some(frames) = args.frames {
        state.set_total_frames(frames);
    }
    if let Some(fps) = args.fps {
        state.set_fps(fps);
    }

    write_text(&args.out, &state.to_json(true)?)?;
    let paths: usize = state.layers.iter().map(|l| l.paths.len()).sum();
    eprintln!("wrote {} ({paths} paths)", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let state = read_state(&args.in_path)?;
    let mut opts = nottie::ExportOptions::default();
    if let Some(name) = args.name {
        opts.name = name;
    }

    let animation = nottie::export_animation(&state, &opts);
    let json = nottie::to_json(&animation, args.pretty).context("serialize lottie JSON")?;
    write_text(&args.out, &json)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let state = read_state(&args.in_path)?;
    if args.frame >= state.total_frames {
        anyhow::bail!(
            "frame {} is outside 0..{}",
            args.frame,
            state.total_frames
        );
    }

    for path in state.paths_at(nottie::FrameIndex(args.frame)) {
        println!(
            "{}\t{}",
            path.id,
            nottie::commands_to_path_string(&path.commands)
        );
    }
    Ok(())
}
