//! Looprace CLI - build, query and race closed spline tracks

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, lap, sample, simulate};
use looprace_track::Lane;

#[derive(Parser)]
#[command(name = "looprace")]
#[command(about = "Closed-loop spline track generator and headless racer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a track and print its summary or point loops
    Generate {
        /// Path to a .track.toml file (built-in loop when omitted)
        track: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Sample a lane at a distance along the track
    Sample {
        /// Path to a .track.toml file (built-in loop when omitted)
        track: Option<String>,

        /// Distance along the centreline
        #[arg(long, allow_hyphen_values = true)]
        distance: f32,

        /// Lane to sample (left, centre or right)
        #[arg(long, default_value = "centre")]
        lane: Lane,
    },

    /// Print the lap index for a distance travelled
    Lap {
        /// Path to a .track.toml file (built-in loop when omitted)
        track: Option<String>,

        /// Distance travelled along the centreline
        #[arg(long, allow_hyphen_values = true)]
        distance: f32,
    },

    /// Run a race without a window and print the final HUD
    Simulate {
        /// Path to a .track.toml file (built-in loop when omitted)
        track: Option<String>,

        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Frame time in milliseconds
        #[arg(long, default_value = "16.0")]
        dt: f64,

        /// Lane to hold for the whole run
        #[arg(long, default_value = "centre")]
        steer: Lane,

        /// Seed for pick-up targets
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a session tuning TOML file
        #[arg(long)]
        session: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            track,
            format,
            output,
        } => generate::run(track.as_deref(), &format, output.as_deref()),
        Commands::Sample {
            track,
            distance,
            lane,
        } => sample::run(track.as_deref(), distance, lane),
        Commands::Lap { track, distance } => lap::run(track.as_deref(), distance),
        Commands::Simulate {
            track,
            frames,
            dt,
            steer,
            seed,
            session,
        } => simulate::run(simulate::SimulateArgs {
            track,
            frames,
            dt,
            steer,
            seed,
            session,
        }),
    }
}
