use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slide_2048::config::Config;
use slide_2048::engine::Direction;
use slide_2048::input::direction_from_key;
use slide_2048::session::GameSession;
use slide_2048::store::{BestScoreStore, FileBestScore, MemoryBestScore};

#[derive(Parser, Debug)]
#[command(name = "slide-2048", version, about = "Play the 2048 sliding-tile puzzle in the terminal")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed the tile RNG for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
    /// Persist the best score in this file
    #[arg(long, value_name = "FILE")]
    best_score_file: Option<PathBuf>,
    /// Print every move outcome as JSON
    #[arg(long)]
    events: bool,
    /// Tracing filter, e.g. "info", "debug"
    #[arg(long, default_value = "warn")]
    log: String,
}

enum Command {
    Move(Direction),
    Undo,
    NewGame,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let word = line.trim();
    match word {
        "u" | "undo" => Some(Command::Undo),
        "n" | "new" => Some(Command::NewGame),
        "?" | "help" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => direction_from_key(word).map(Command::Move),
    }
}

const HELP: &str = "moves: w/a/s/d, h/j/k/l or up/down/left/right | u: undo | n: new game | q: quit";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    let seed = args.seed.or(config.seed);
    let rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let store: Box<dyn BestScoreStore> = match args.best_score_file.or(config.best_score_file) {
        Some(path) => Box::new(FileBestScore::new(path)),
        None => Box::new(MemoryBestScore::default()),
    };
    info!(?seed, "starting");

    let mut game = GameSession::with_rng(store, rng).with_history_limit(config.history_limit);
    game.new_game();
    render(&game)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        match parse_command(&line) {
            Some(Command::Move(dir)) => {
                let outcome = game.make_move(dir);
                if args.events {
                    println!("{}", serde_json::to_string(&outcome)?);
                }
                if !outcome.board_changed && !game.is_game_over() {
                    continue;
                }
            }
            Some(Command::Undo) => {
                if !game.undo() {
                    println!("nothing to undo");
                    continue;
                }
            }
            Some(Command::NewGame) => game.new_game(),
            Some(Command::Help) => {
                println!("{HELP}");
                continue;
            }
            Some(Command::Quit) => break,
            None => {
                println!("unknown command '{}' ({HELP})", line.trim());
                continue;
            }
        }
        render(&game)?;
    }
    Ok(())
}

fn render<S: BestScoreStore, R: rand::Rng>(game: &GameSession<S, R>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", game.board())?;
    writeln!(out, "Score: {}   Best: {}", game.score(), game.best_score())?;
    if game.is_game_over() {
        writeln!(out, "Game over! n = new game, u = undo")?;
    }
    write!(out, "> ")?;
    out.flush()
}
