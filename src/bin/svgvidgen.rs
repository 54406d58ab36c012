use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use svgvidgen::pipeline::{PipelineRunner, RunState, RunnerOpts, WallClock};
use svgvidgen::prefs::{FsStore, PreferenceStore};
use svgvidgen::render::{RenderDefaults, RenderRequest, RenderServer, SvgTemplate};
use svgvidgen::ui::{Checkbox, UiState};
use svgvidgen::upload::{self, FileMeta, ValidationResult};
use svgvidgen::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "svgvidgen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the SVG render stub over HTTP.
    Serve(ServeArgs),
    /// Render one SVG locally.
    Render(RenderArgs),
    /// Inspect or change stored run preferences.
    Prefs {
        #[command(subcommand)]
        cmd: PrefsCommand,
    },
    /// Check a configuration file against the upload rules.
    CheckUpload(CheckUploadArgs),
    /// Save preferences and run the simulated pipeline.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long)]
    addr: Option<String>,

    /// Port to bind (0 picks a free port).
    #[arg(long)]
    port: Option<u16>,

    /// Template used for renders.
    #[arg(long, value_enum)]
    template: Option<TemplateChoice>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Image width (0 means the default).
    #[arg(long)]
    width: Option<f64>,

    /// Image height (0 means the default).
    #[arg(long)]
    height: Option<f64>,

    /// Caption text.
    #[arg(long)]
    message: Option<String>,

    /// Template to draw.
    #[arg(long, value_enum, default_value_t = TemplateChoice::Banner)]
    template: TemplateChoice,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    /// Print the stored record as JSON.
    Show(StoreArgs),
    /// Update stored checkboxes; unspecified ones keep their current value.
    Set {
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        checks: CheckboxArgs,
    },
}

#[derive(Parser, Debug)]
struct StoreArgs {
    /// Directory of the preference store.
    #[arg(long, default_value = ".svgvidgen")]
    store_dir: PathBuf,
}

#[derive(Parser, Debug, Default)]
struct CheckboxArgs {
    /// Enable the scene agent.
    #[arg(long)]
    scene_agent: Option<bool>,
    /// Enable the color agent.
    #[arg(long)]
    color_agent: Option<bool>,
    /// Request MP4 output.
    #[arg(long)]
    output_mp4: Option<bool>,
    /// Request GIF output.
    #[arg(long)]
    output_gif: Option<bool>,
    /// Request PNG frame output.
    #[arg(long)]
    output_png: Option<bool>,
}

impl CheckboxArgs {
    fn apply(&self, ui: &mut UiState) {
        let pairs = [
            (Checkbox::SceneAgent, self.scene_agent),
            (Checkbox::ColorAgent, self.color_agent),
            (Checkbox::OutputMp4, self.output_mp4),
            (Checkbox::OutputGif, self.output_gif),
            (Checkbox::OutputPng, self.output_png),
        ];
        for (checkbox, value) in pairs {
            if let Some(on) = value {
                ui.set_checked(checkbox, on);
            }
        }
    }
}

#[derive(Parser, Debug)]
struct CheckUploadArgs {
    /// File to check.
    path: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    checks: CheckboxArgs,

    /// Configuration file to attach; must pass the upload rules.
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Completion delay in milliseconds.
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TemplateChoice {
    Banner,
    Frame,
}

impl From<TemplateChoice> for SvgTemplate {
    fn from(choice: TemplateChoice) -> Self {
        match choice {
            TemplateChoice::Banner => SvgTemplate::Banner,
            TemplateChoice::Frame => SvgTemplate::Frame,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Render(args) => cmd_render(args),
        Command::Prefs { cmd } => cmd_prefs(cmd),
        Command::CheckUpload(args) => cmd_check_upload(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => ServerConfig::from_path(path)?,
        None => ServerConfig::default(),
    };
    if let Some(addr) = args.addr {
        cfg.addr = addr;
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(template) = args.template {
        cfg.template = template.into();
    }

    let server = RenderServer::bind(&cfg)?;
    eprintln!("serving svgvidgen at http://{}/", server.local_addr()?);
    server.serve()?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = RenderRequest {
        width: args.width,
        height: args.height,
        message: args.message,
    };
    let params = req.resolve(&RenderDefaults::default())?;
    let svg = SvgTemplate::from(args.template).render(&params);

    match &args.out {
        Some(out) => {
            ensure_parent_dir(out)?;
            std::fs::write(out, &svg).with_context(|| format!("write svg '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => std::io::stdout()
            .write_all(svg.as_bytes())
            .context("write svg to stdout")?,
    }
    Ok(())
}

fn cmd_prefs(cmd: PrefsCommand) -> anyhow::Result<()> {
    match cmd {
        PrefsCommand::Show(store) => {
            let prefs = PreferenceStore::new(FsStore::new(&store.store_dir));
            match prefs.load() {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => eprintln!("no preferences stored in {}", store.store_dir.display()),
            }
        }
        PrefsCommand::Set { store, checks } => {
            let mut prefs = PreferenceStore::new(FsStore::new(&store.store_dir));
            let mut ui = UiState::new();
            prefs.restore_into(&mut ui);
            checks.apply(&mut ui);
            prefs.save(&ui.preferences())?;
            println!("{}", serde_json::to_string_pretty(&ui.preferences())?);
        }
    }
    Ok(())
}

fn cmd_check_upload(args: CheckUploadArgs) -> anyhow::Result<()> {
    let meta = FileMeta::from_path(&args.path)?;
    match upload::validate(&meta) {
        ValidationResult::Accepted => {
            println!("accepted {} ({} bytes)", args.path.display(), meta.size);
            Ok(())
        }
        ValidationResult::Rejected(reason) => anyhow::bail!("{reason}"),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut prefs = PreferenceStore::new(FsStore::new(&args.store.store_dir));
    let mut ui = UiState::new();
    prefs.restore_into(&mut ui);
    args.checks.apply(&mut ui);

    if let Some(path) = &args.config_file {
        let meta = FileMeta::from_path(path)?;
        upload::on_change(&mut ui, Some(meta));
        if ui.config_file.is_none() {
            anyhow::bail!("{}: {}", path.display(), ui.file_error);
        }
    }

    let opts = RunnerOpts {
        completion_delay: Duration::from_millis(args.delay_ms),
    };
    let mut runner = PipelineRunner::simulated(opts);
    let mut clock = WallClock::new();

    runner.run(&mut ui, &mut prefs, &mut clock)?;
    eprintln!("[{:>4}] {}", ui.progress_width(), ui.status);

    let state = runner.drain(&mut ui, &mut clock)?;
    eprintln!("[{:>4}] {}", ui.progress_width(), ui.status);

    if state == RunState::Failed {
        anyhow::bail!("pipeline run failed");
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
