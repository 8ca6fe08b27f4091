use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};

use connect_four::ai::MinimaxAgent;
use connect_four::config::AppConfig;
use connect_four::error::GameError;
use connect_four::game::{Board, Game, Player, Seat};
use connect_four::ui::{HumanInput, TerminalRenderer};

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Search depth for the computer player (1-8)
    #[arg(long)]
    depth: Option<usize>,

    /// Human player name
    #[arg(long)]
    name: Option<String>,

    /// Computer player name
    #[arg(long)]
    ainame: Option<String>,

    /// Let the computer make the first move
    #[arg(long)]
    aifirst: bool,

    /// Number of columns
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Trace the search (same as RUST_LOG=connect_four=trace)
    #[arg(long)]
    debug: bool,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if debug {
        builder.filter_module("connect_four", LevelFilter::Trace);
    }
    builder.parse_default_env().format_timestamp(None).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(name) = cli.name {
        config.players.human_name = name;
    }
    if let Some(name) = cli.ainame {
        config.players.ai_name = name;
    }
    if cli.aifirst {
        config.players.ai_first = true;
    }
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    config.validate().context("invalid settings")?;
    debug!("{config:?}");

    let board = Board::new(config.board.width, config.board.height)?;
    let (ai_side, human_side) = if config.players.ai_first {
        (Player::Red, Player::Yellow)
    } else {
        (Player::Yellow, Player::Red)
    };

    let computer = Seat::new(
        config.players.ai_name.clone(),
        ai_side,
        Box::new(MinimaxAgent::new(config.search.depth, ai_side)),
    );
    let human = Seat::new(
        config.players.human_name.clone(),
        human_side,
        Box::new(HumanInput::new(io::stdin().lock(), io::stdout())),
    );
    let mut game = if config.players.ai_first {
        Game::new(board, computer, human)
    } else {
        Game::new(board, human, computer)
    };

    let mut renderer = TerminalRenderer::new(io::stdout());
    loop {
        match game.play(&mut renderer) {
            Ok(status) => debug!("game finished: {status:?}"),
            Err(GameError::Abandoned(name)) => {
                println!("\n{name} left the game.");
                return Ok(());
            }
            Err(err) => return Err(err).context("game loop failed"),
        }

        if !game.rematch_requested() {
            return Ok(());
        }
        game.reset();
    }
}
