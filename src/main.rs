// main.rs - Command-line entry point
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};

use xr_scenes::{
    assignments::{self, ASSIGNMENT_NAMES},
    RunnerConfig, XrError, XrRunner,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "xr-scenes")]
#[command(about = "Interactive 3D scene assignments", long_about = None)]
struct Cli {
    /// Assignment to run
    #[arg(short, long, default_value = "basic")]
    assignment: String,

    /// TOML file with runner settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Step the scene without opening a window
    #[arg(long)]
    headless: bool,

    /// Frame count for headless runs
    #[arg(long)]
    frames: Option<u64>,

    /// Print the available assignments and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path)
            .map_err(XrError::from)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RunnerConfig::default(),
    };
    if let Some(frames) = cli.frames {
        config.headless.frames = frames;
    }

    Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str())).init();

    if cli.list {
        for name in ASSIGNMENT_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    let app = assignments::with_config(&cli.assignment, &config)
        .ok_or_else(|| XrError::UnknownAssignment(cli.assignment.clone()))?;
    let mut runner = XrRunner::new(app, config);

    if cli.headless {
        let scene = runner.run_headless();
        let stats = scene.statistics();
        println!(
            "{}: {} meshes, {} triangles after {} frames",
            cli.assignment,
            stats.mesh_count,
            stats.total_triangles,
            runner.config().headless.frames
        );
        return Ok(());
    }

    runner
        .run()
        .with_context(|| format!("running assignment '{}'", cli.assignment))
}
