use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod server;

use reelkit::{
    AssetResolver, CommandBackend, CommandBackendOpts, CompositionId, CompositionProps,
    DerivedScene, Evaluator, FrameDumpBackend, FrameIndex, FrameRange, Registry,
    RenderBackend, RenderRequest, RenderThreading,
};

#[derive(Parser, Debug)]
#[command(name = "reelkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered compositions.
    List,
    /// Print the frame count of a composition for the given props.
    Duration(PropsArgs),
    /// Print the evaluated state of one frame as JSON.
    Frame(FrameArgs),
    /// Render a composition through a backend.
    Render(RenderArgs),
    /// Serve the HTTP render API.
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct PropsArgs {
    /// Composition id, e.g. `SlotMachine`.
    composition: CompositionId,

    /// Inline props JSON.
    #[arg(long, conflicts_with = "props_file")]
    props: Option<String>,

    /// Props JSON file.
    #[arg(long)]
    props_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MediaArgs {
    /// Directory served under `/media/`.
    #[arg(long, default_value = "/data/media")]
    media_dir: PathBuf,

    /// Port of the media server that local media URLs point at.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    props: PropsArgs,

    #[command(flatten)]
    media: MediaArgs,

    /// Frame indices (0-based). Repeat to print several frames.
    #[arg(long = "at", required = true)]
    at: Vec<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BackendKind {
    /// Hand the job to an external renderer process.
    Command,
    /// Write newline-delimited JSON frame states.
    FrameDump,
}

#[derive(Parser, Debug)]
struct BackendArgs {
    /// Render backend.
    #[arg(long, value_enum, default_value_t = BackendKind::Command)]
    backend: BackendKind,

    /// Renderer executable (command backend).
    #[arg(long, default_value = "npx")]
    renderer: PathBuf,

    /// Renderer leading argument (command backend). Repeatable; replaces the defaults.
    #[arg(long = "renderer-arg", allow_hyphen_values = true)]
    renderer_args: Vec<String>,

    /// Video codec (command backend).
    #[arg(long, default_value = "h264")]
    codec: String,

    /// Evaluate frames in parallel (frame-dump backend).
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

impl BackendArgs {
    fn build(&self) -> Box<dyn RenderBackend> {
        match self.backend {
            BackendKind::Command => {
                let defaults = CommandBackendOpts::default();
                let args = if self.renderer_args.is_empty() {
                    defaults.args.clone()
                } else {
                    self.renderer_args.clone()
                };
                Box::new(CommandBackend::new(CommandBackendOpts {
                    program: self.renderer.clone(),
                    args,
                    codec: self.codec.clone(),
                    ..defaults
                }))
            }
            BackendKind::FrameDump => Box::new(FrameDumpBackend::new(RenderThreading {
                parallel: self.parallel,
                threads: self.threads,
            })),
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    props: PropsArgs,

    #[command(flatten)]
    media: MediaArgs,

    #[command(flatten)]
    backend: BackendArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// First frame to render.
    #[arg(long)]
    start: Option<u64>,

    /// One past the last frame to render.
    #[arg(long)]
    end: Option<u64>,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    #[command(flatten)]
    media: MediaArgs,

    #[command(flatten)]
    backend: BackendArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Duration(args) => cmd_duration(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_props(args: &PropsArgs) -> anyhow::Result<CompositionProps> {
    let value = match (&args.props, &args.props_file) {
        (Some(inline), _) => serde_json::from_str(inline).context("parse --props")?,
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read props file '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse props file '{}'", path.display()))?
        }
        (None, None) => serde_json::Value::Null,
    };
    Ok(CompositionProps::from_json(args.composition, value)?)
}

fn resolver(media: &MediaArgs) -> AssetResolver {
    AssetResolver::for_server(&media.media_dir, media.port)
}

fn cmd_list() -> anyhow::Result<()> {
    for entry in Registry::builtin().entries() {
        let c = entry.config;
        let duration = (entry.duration)(&CompositionProps::defaults(entry.id));
        println!(
            "{}\t{}x{}\t{}/{} fps\t{} frames by default",
            entry.id, c.width, c.height, c.fps.num, c.fps.den, duration
        );
    }
    Ok(())
}

fn cmd_duration(args: PropsArgs) -> anyhow::Result<()> {
    let props = load_props(&args)?;
    let frames = Registry::builtin().duration_for(&props)?;
    println!("{frames}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let props = load_props(&args.props)?;
    let scene = DerivedScene::derive(&Registry::builtin(), &props, &resolver(&args.media))?;

    for at in args.at {
        let state = Evaluator::eval_frame(&scene, FrameIndex(at))?;
        println!("{}", serde_json::to_string(&state)?);
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let props = load_props(&args.props)?;
    let frames = match (args.start, args.end) {
        (None, None) => None,
        (start, end) => {
            let duration = Registry::builtin().duration_for(&props)?;
            Some(FrameRange::new(
                FrameIndex(start.unwrap_or(0)),
                FrameIndex(end.unwrap_or(duration)),
            )?)
        }
    };
    let req = RenderRequest {
        composition_id: args.props.composition.to_string(),
        props: props.to_json()?,
        output_path: args.out,
        frames,
    };

    let backend = args.backend.build();
    let resp = reelkit::render_request(
        &Registry::builtin(),
        &resolver(&args.media),
        backend.as_ref(),
        req,
    );
    println!("{}", serde_json::to_string(&resp)?);
    if !resp.success {
        anyhow::bail!("render failed: {}", resp.error.unwrap_or_default());
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let opts = server::ServerOpts {
        port: args.media.port,
        media_dir: args.media.media_dir,
    };
    server::serve(&opts, args.backend.build())
}
