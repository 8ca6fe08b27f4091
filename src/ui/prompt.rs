use std::io::{self, BufRead, Write};

use log::warn;

use crate::ai::Agent;
use crate::game::Board;

/// Reads column numbers from a line-based prompt.
pub struct HumanInput<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanInput<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanInput { input, output }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_column(&mut self, board: &Board) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.ask("Select column: ")? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(col) if board.is_valid_move(col) => return Ok(Some(col)),
                _ => writeln!(self.output, "Invalid move!")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanInput<R, W> {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        match self.read_column(board) {
            Ok(col) => col,
            Err(err) => {
                warn!("failed to read move: {err}");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }

    fn wants_rematch(&mut self) -> bool {
        match self.ask("Play again? [y/N] ") {
            Ok(answer) => answer.is_some_and(|a| {
                a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")
            }),
            Err(err) => {
                warn!("failed to read answer: {err}");
                false
            }
        }
    }
}
