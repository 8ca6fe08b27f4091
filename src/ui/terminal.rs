use std::io::{self, Write};

use crossterm::style::{StyledContent, Stylize};

use crate::error::BoardError;
use crate::game::{Board, Cell, Game, GameStatus, Renderer};

const DISC: &str = "\u{2b24}";

/// Draws the board as colored text, one frame per turn.
pub struct TerminalRenderer<W> {
    output: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(output: W) -> Self {
        TerminalRenderer { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

fn separator(width: usize) -> StyledContent<String> {
    format!("+{}", "----+".repeat(width)).blue()
}

fn disc(styled: StyledContent<&str>, highlighted: bool) -> String {
    if highlighted {
        format!("({styled} )")
    } else {
        format!(" {styled}  ")
    }
}

/// Render `board` top row first, with column numbers on top.
pub fn draw_board(board: &Board, last_move: Option<(usize, usize)>) -> String {
    let bar = "|".blue();
    let mut out = bar.to_string();
    for col in 0..board.width() {
        out.push_str(&format!("  {col} {bar}"));
    }
    out.push('\n');

    for row in (0..board.height()).rev() {
        out.push_str(&format!("{}\n{bar}", separator(board.width())));
        for col in 0..board.width() {
            let highlighted = last_move == Some((row, col));
            let cell = match board.get(row, col) {
                Cell::Empty => format!("  {} ", "\u{b7}".blue()),
                Cell::Red => disc(DISC.red(), highlighted),
                Cell::Yellow => disc(DISC.yellow(), highlighted),
            };
            out.push_str(&cell);
            out.push_str(&bar.to_string());
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", separator(board.width())));
    out
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn board(&mut self, board: &Board, last_move: Option<(usize, usize)>) -> io::Result<()> {
        writeln!(self.output, "{}", draw_board(board, last_move))
    }

    fn error(&mut self, err: &BoardError) -> io::Result<()> {
        writeln!(self.output, "Error: {err}")
    }

    fn message(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "{msg}")
    }

    fn game_over(&mut self, game: &Game) -> io::Result<()> {
        self.board(game.board(), None)?;
        match (game.status(), game.winner_name()) {
            (GameStatus::Winner(_), Some(name)) => writeln!(self.output, "🏆 {name} Wins!"),
            (GameStatus::Draw, _) => writeln!(self.output, "🤝 It's a draw!"),
            _ => writeln!(self.output, "Game ended."),
        }?;
        self.output.flush()
    }
}
