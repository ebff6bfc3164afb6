use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use stagecraft_engine::{Engine, EngineSettings, populate_sandbox};
use stagecraft_input::Key;
use stagecraft_render::{DebugTextRenderer, Renderer, Viewport};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagecraft-cli", about = "Headless stagecraft tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default settings
    Info,
    /// Run the sandbox scene headless and print the last frame
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Movement keys to hold for the whole run, e.g. `wd`
        #[arg(long, default_value = "")]
        hold: String,
        /// JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Serve a directory of static files
    Serve {
        #[arg(short, long, default_value_t = stagecraft_serve::DEFAULT_PORT)]
        port: u16,
        #[arg(short, long, default_value = stagecraft_serve::DEFAULT_ROOT)]
        root: PathBuf,
    },
}

fn load_settings(config: Option<&PathBuf>) -> anyhow::Result<EngineSettings> {
    match config {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(EngineSettings::default()),
    }
}

fn parse_keys(hold: &str) -> anyhow::Result<Vec<Key>> {
    hold.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match Key::from_name(&c.to_string()) {
            Some(key) => Ok(key),
            None => bail!("unknown key `{c}`, expected some of w, a, s, d"),
        })
        .collect()
}

/// Outcome of a headless sandbox run.
struct SimulationReport {
    last_frame: Option<String>,
    frames: u64,
    cube: Option<[f32; 3]>,
}

fn run_sandbox(settings: EngineSettings, keys: &[Key], frames: u64) -> SimulationReport {
    let viewport = Viewport::new(settings.window.width, settings.window.height);
    let mut engine = Engine::new(settings, DebugTextRenderer::with_viewport(viewport));
    let sandbox = populate_sandbox(&mut engine);
    engine.start();
    for key in keys {
        engine.context_mut().input.key_down(*key);
    }
    tracing::info!(frames, held = keys.len(), "simulating sandbox");

    let mut last_frame = None;
    for _ in 0..frames {
        last_frame = engine.update();
    }

    let cube = engine
        .context()
        .physics
        .body_position(sandbox.cube_body)
        .map(|p| p.to_array());
    tracing::info!(frames = engine.frame_count(), ?cube, "simulation finished");
    SimulationReport {
        last_frame,
        frames: engine.frame_count(),
        cube,
    }
}

fn simulate(frames: u64, hold: &str, config: Option<&PathBuf>) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let keys = parse_keys(hold)?;
    let report = run_sandbox(settings, &keys, frames);

    if let Some(frame) = &report.last_frame {
        print!("{frame}");
    }
    if let Some([x, y, z]) = report.cube {
        println!(
            "cube after {} frames: ({x:.3}, {y:.3}, {z:.3})",
            report.frames
        );
    }
    Ok(())
}

fn serve(port: u16, root: PathBuf) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    tracing::info!(%addr, root = %root.display(), "starting static server");
    runtime.block_on(stagecraft_serve::serve(addr, root))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let settings = EngineSettings::default();
            println!("stagecraft-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "camera: fov={} near={} far={}",
                settings.camera.fov, settings.camera.near, settings.camera.far
            );
            println!(
                "physics: gravity={:?} time_step={:.5}",
                settings.physics.gravity.to_array(),
                settings.physics.time_step
            );
            println!(
                "window: \"{}\" {}x{}",
                settings.window.title, settings.window.width, settings.window.height
            );
            println!(
                "headless viewport: {:?}",
                DebugTextRenderer::new().viewport()
            );
            println!(
                "serve: port {} root {}/",
                stagecraft_serve::DEFAULT_PORT,
                stagecraft_serve::DEFAULT_ROOT
            );
        }
        Commands::Simulate {
            frames,
            hold,
            config,
        } => simulate(frames, &hold, config.as_ref())?,
        Commands::Serve { port, root } => serve(port, root)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_parses_movement_keys() {
        assert_eq!(parse_keys("wd").unwrap(), vec![Key::Forward, Key::Right]);
        assert_eq!(parse_keys("a, S").unwrap(), vec![Key::Left, Key::Back]);
        assert!(parse_keys("").unwrap().is_empty());
        assert!(parse_keys("x").is_err());
    }

    #[test]
    fn sandbox_run_reports_frames_and_cube() {
        let report = run_sandbox(EngineSettings::default(), &[Key::Right], 30);
        assert_eq!(report.frames, 30);
        assert!(report.last_frame.is_some());
        let [x, y, _] = report.cube.unwrap();
        assert!(x > 0.0, "held `d` should push the cube along +x, x={x}");
        assert!(y < 10.0, "the cube should be falling, y={y}");
    }

    #[test]
    fn sandbox_run_without_frames_renders_nothing() {
        let report = run_sandbox(EngineSettings::default(), &[], 0);
        assert_eq!(report.frames, 0);
        assert!(report.last_frame.is_none());
        assert_eq!(report.cube, Some([0.0, 10.0, 0.0]));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["stagecraft-cli", "simulate", "--frames", "10", "--hold", "d"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Simulate { frames: 10, ref hold, config: None } if hold == "d"
        ));

        let cli = Cli::try_parse_from(["stagecraft-cli", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve { port: 3500, ref root } if root == &PathBuf::from("public")
        ));
    }
}
