//! Terminal front end for the move highlighter.
//!
//! Usage: cargo run -- [--fen "<placement> [w|b]"] [--turn b] [--json]
//!
//! Each line on stdin is one click, either `row col` (`6 0`) or a square in
//! algebraic notation (`a2`). `quit` or end of input stops the session.

use std::io::{self, BufRead};

use chess_highlight::{Color, Game, GameConfig, Position, Snapshot, Transition};
use chrono::prelude::*;
use clap::Parser;
use color_eyre::eyre::Result;
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess_highlight")]
#[command(about = "Highlight reachable squares and play moves by clicking squares")]
struct Args {
    /// Starting position as FEN (placement field, optionally followed by `w` or `b`)
    #[arg(long)]
    fen: Option<String>,

    /// Side to move first, `w` or `b`; overrides the FEN side-to-move field
    #[arg(long)]
    turn: Option<char>,

    /// Print one JSON snapshot per click instead of drawing the board
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Click { row: i32, col: i32 },
    Square(Position),
    Quit,
    Blank,
}

fn parse_input(line: &str) -> chess_highlight::Result<Input> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    match tokens.as_slice() {
        [] => Ok(Input::Blank),
        ["quit"] | ["exit"] => Ok(Input::Quit),
        [row, col] => match (row.parse::<i32>(), col.parse::<i32>()) {
            (Ok(row), Ok(col)) => Ok(Input::Click { row, col }),
            _ => Err(chess_highlight::Error::InvalidSquare(line.trim().to_string())),
        },
        [square] => Ok(Input::Square(Position::from_algebraic(square)?)),
        _ => Err(chess_highlight::Error::InvalidSquare(line.trim().to_string())),
    }
}

fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Moved { from, to, captured } => match captured {
            Some(piece) => format!(
                "{}x{} (captured {})",
                from.to_algebraic(),
                to.to_algebraic(),
                piece.to_human()
            ),
            None => format!("{}-{}", from.to_algebraic(), to.to_algebraic()),
        },
        Transition::Deselected => "nothing selected".to_string(),
        Transition::Selected { at, destinations } => {
            format!("{} selected, {} destinations", at.to_algebraic(), destinations)
        }
    }
}

fn render(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        snapshot.board.draw_to_terminal(&snapshot.overlay);
        println!("{} to move", snapshot.turn.to_human());
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.fen {
        Some(fen) => GameConfig::from_fen(fen)?,
        None => GameConfig::default(),
    };
    if let Some(turn) = args.turn {
        config = config.with_starting_turn(Color::from_char(turn)?);
    }
    Ok(config)
}

/// Log filter for the session: `spec` is the `RUST_LOG` value, `warn` when unset.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(spec.unwrap_or_default())
}

/// Resolves one non-blank input line to a square and clicks it.
fn click(game: &mut Game, input: Input) -> chess_highlight::Result<Option<Transition>> {
    let pos = match input {
        Input::Blank | Input::Quit => return Ok(None),
        Input::Square(pos) => pos,
        Input::Click { row, col } => Position::try_new(row, col)?,
    };
    game.apply(pos).map(Some)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut game = Game::new(build_config(&args)?);

    if !args.json {
        println!("Session started {}", Local::now().format("%Y.%m.%d %H:%M:%S"));
    }
    render(&game.start(), args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let result = match parse_input(&line) {
            Ok(Input::Blank) => continue,
            Ok(Input::Quit) => break,
            Ok(input) => click(&mut game, input),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(transition)) => {
                if !args.json {
                    println!("{}", describe(&transition));
                }
                render(&game.start(), args.json)?;
            }
            Ok(None) => {}
            Err(e) => warn!(input = line.trim(), error = %e, "rejected click"),
        }
    }
    Ok(())
}
