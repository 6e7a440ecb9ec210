//! gatemaze
//!
//! Generates a chain of linked rooms and prints it as ASCII or JSON.

mod canvas;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gm_core::{generate, GenerationReport, Maze, MazeConfig, MazeRng};

use canvas::AsciiCanvas;

/// Procedural room and gateway generator
#[derive(Parser, Debug)]
#[command(name = "gatemaze")]
#[command(author, version, about = "Generate linked rooms with walls, gateways and barriers", long_about = None)]
struct Args {
    /// Seed for reproducible output (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Override the number of rooms
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<u32>,

    /// Override the room frame size
    #[arg(short = 'f', long = "frame-size")]
    frame_size: Option<u32>,

    /// Print the generated maze as JSON instead of ASCII
    #[arg(long = "json")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<MazeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            MazeConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => MazeConfig::default(),
    };
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }
    if let Some(size) = args.frame_size {
        config.frame_size = size;
    }
    Ok(config)
}

fn print_summary(maze: &Maze, report: &GenerationReport) {
    println!(
        "seed {} | {} rooms, {} cells, {} gateways, {} barriers",
        report.seed,
        maze.rooms.len(),
        maze.cell_count(),
        maze.gateways.len(),
        report.barriers_placed
    );
    if report.replaced_cells > 0 {
        println!("{} cells replaced by overlapping units", report.replaced_cells);
    }
    if report.barrier_attempts_failed > 0 {
        println!("{} barrier attempts found no spot", report.barrier_attempts_failed);
    }
    match maze.gateways.iter().find(|g| g.is_terminal()) {
        Some(exit) => println!("exit from room {} at {:?}", exit.from_room.0, exit.from_screen),
        None => println!("no exit"),
    }
    for failure in &report.link_failures {
        match failure.to_room {
            Some(to) => warn!(from = failure.from_room.0, to = to.0, "rooms left unlinked"),
            None => warn!(room = failure.from_room.0, "last room has no exit"),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let mut rng = match args.seed {
        Some(seed) => MazeRng::new(seed),
        None => MazeRng::from_entropy(),
    };

    let (maze, report) = generate(&config, &mut rng).context("Generation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&maze).context("Failed to serialize maze")?;
        println!("{json}");
        return Ok(());
    }

    let mut canvas = AsciiCanvas::new(config.barrier.codes);
    maze.spawn_into(&mut canvas);
    print!("{canvas}");
    print_summary(&maze, &report);
    Ok(())
}
