//! Legwork command-line driver.
//!
//! Provides three modes of operation:
//! - `walk`: Run a scripted input pattern headlessly and print a summary
//! - `config`: Print the default character configuration as TOML
//! - `info`: Print workspace crate versions

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use legwork_body::{Character, command_from_input};
use legwork_core::config::CharacterConfig;
use legwork_core::math::ground_basis;
use legwork_core::types::Foot;
use nalgebra::{Vector2, Vector3};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Procedural biped legs, driven from the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a character with scripted input and print what happened.
    Walk {
        /// Character config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: u32,

        /// Frame delta time in seconds.
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Input pattern to feed the character.
        #[arg(short, long, value_enum, default_value_t = Script::Forward)]
        script: Script,
    },

    /// Print the default configuration as TOML.
    Config,

    /// Print crate information.
    Info,
}

/// Scripted planar input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Script {
    /// Hold forward.
    Forward,
    /// Hold back.
    Back,
    /// Hold right.
    Strafe,
    /// Hold forward while the camera yaws around.
    Circle,
    /// Alternate two seconds of walking with two seconds of rest.
    StopGo,
}

impl Script {
    /// Input and camera yaw at `time` seconds.
    fn sample(self, time: f32) -> (Vector2<f32>, f32) {
        match self {
            Self::Forward => (Vector2::new(0.0, 1.0), 0.0),
            Self::Back => (Vector2::new(0.0, -1.0), 0.0),
            Self::Strafe => (Vector2::new(1.0, 0.0), 0.0),
            Self::Circle => (Vector2::new(0.0, 1.0), 30.0 * time),
            Self::StopGo => {
                let walking = (time / 2.0).rem_euclid(2.0) < 1.0;
                (Vector2::new(0.0, if walking { 1.0 } else { 0.0 }), 0.0)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct WalkSummary {
    started: u32,
    landed: u32,
    undrawable: u32,
    distance: f32,
}

#[allow(clippy::cast_precision_loss)]
fn run_walk(config: Option<PathBuf>, frames: u32, dt: f32, script: Script) -> Result<(), Box<dyn Error>> {
    let config = match config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            CharacterConfig::from_file(path)?
        }
        None => CharacterConfig::default(),
    };
    let up = config.gait.up();
    let reference = ground_basis(&up).1;
    let mut character = Character::new(config, Vector3::zeros(), reference)?;
    let start = character.position();

    let mut summary = WalkSummary::default();
    let mut previous = start;
    for frame_index in 0..frames {
        let time = frame_index as f32 * dt;
        let (input, yaw) = script.sample(time);
        let command = command_from_input(input, yaw, &reference, &up);
        let frame = character.update(command, dt);

        if frame.started {
            summary.started += 1;
            if let Some(target) = character.machine().target() {
                debug!(frame = frame_index, target = ?target.position, "step started");
            }
        }
        if frame.stopped {
            summary.landed += 1;
            debug!(frame = frame_index, position = ?frame.position, "step landed");
        }
        let skipped: Vec<Foot> = [Foot::Left, Foot::Right]
            .into_iter()
            .filter(|&foot| !frame.leg(foot).is_drawable())
            .collect();
        if !skipped.is_empty() {
            summary.undrawable += 1;
            warn!(frame = frame_index, legs = ?skipped, "leg skipped: degenerate plane");
        }
        summary.distance += (frame.position - previous).norm();
        previous = frame.position;
    }

    let end = character.position();
    println!("script={script:?}, frames={frames}, dt={dt:.4}");
    println!(
        "steps: started={}, landed={}, idle state={:?}",
        summary.started,
        summary.landed,
        character.idle().state()
    );
    println!(
        "position: ({:.3}, {:.3}, {:.3}), displacement={:.3}, travelled={:.3}",
        end.x,
        end.y,
        end.z,
        (end - start).norm(),
        summary.distance
    );
    println!("undrawable leg frames: {}", summary.undrawable);
    Ok(())
}

fn run_config() -> Result<(), Box<dyn Error>> {
    print!("{}", toml::to_string(&CharacterConfig::default())?);
    Ok(())
}

fn run_info() {
    println!("legwork v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  legwork-core {}", env!("CARGO_PKG_VERSION"));
    println!("  legwork-ik   {}", env!("CARGO_PKG_VERSION"));
    println!("  legwork-gait {}", env!("CARGO_PKG_VERSION"));
    println!("  legwork-body {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("edition: 2024");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Some(Commands::Walk {
            config,
            frames,
            dt,
            script,
        }) => run_walk(config, frames, dt, script),
        Some(Commands::Config) => run_config(),
        Some(Commands::Info) => {
            run_info();
            Ok(())
        }
        // Default: a short forward walk with defaults
        None => run_walk(None, 600, 1.0 / 60.0, Script::Forward),
    }
}
