//! Headless autoplay runner
//!
//! Drives a session with a random placement policy and prints the final
//! board. Useful for soak-testing the engine and for eyeballing logs.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use tetris_srs::{Bag, Command, Outcome, Playfield, Session, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless SRS Tetris autoplay", long_about = None)]
struct Cli {
    /// Bag seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of pieces to drop (overrides the settings file)
    #[arg(long)]
    pieces: Option<u32>,
    /// Settings file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final board as JSON
    #[arg(long)]
    json: bool,
}

/// Get the temp directory for logs, creating it if needed
fn log_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetris-srs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if let Some(seed) = cli.seed {
        settings.randomizer.seed = Some(seed);
    }
    if let Some(pieces) = cli.pieces {
        settings.autoplay.pieces = pieces;
    }
    let seed = settings.randomizer.seed.unwrap_or_else(rand::random);

    // Setup tracing to log file
    let dir = log_dir();
    let log_file = format!("{:016x}.log", seed);
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!("autoplay starting, seed={:016x}, log={}", seed, dir.join(&log_file).display());

    let board = Playfield::with_size(settings.board.visible_rows, settings.board.columns);
    let mut session = Session::with_parts(board, Bag::with_seed(seed));
    let mut policy = ChaCha8Rng::seed_from_u64(seed.rotate_left(32));

    for _ in 0..settings.autoplay.pieces {
        if play_piece(&mut session, &mut policy) == Outcome::GameOver {
            break;
        }
    }

    tracing::info!(
        lines = session.lines(),
        pieces = session.pieces_locked(),
        over = session.is_over(),
        "autoplay finished"
    );

    if cli.json {
        let snapshot = session.board().snapshot();
        let text = serde_json::to_string_pretty(&snapshot).map_err(io::Error::other)?;
        println!("{}", text);
    } else {
        print!("{}", session.board());
        println!(
            "Seed: {:016x} | Pieces: {} | Lines: {}{}",
            seed,
            session.pieces_locked(),
            session.lines(),
            if session.is_over() { " | Game over" } else { "" }
        );
    }

    Ok(())
}

/// Rotate a random number of times, shift to a random column and hard drop
fn play_piece(session: &mut Session, rng: &mut ChaCha8Rng) -> Outcome {
    for _ in 0..rng.gen_range(0..4) {
        session.apply(Command::RotateCw);
    }

    let shift: i32 = rng.gen_range(-5..=5);
    let command = if shift < 0 {
        Command::MoveLeft
    } else {
        Command::MoveRight
    };
    for _ in 0..shift.unsigned_abs() {
        if session.apply(command) == Outcome::Blocked {
            break;
        }
    }

    session.apply(Command::HardDrop)
}
