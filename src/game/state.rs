use std::io;

use log::{info, warn};

use crate::ai::Agent;
use crate::error::{BoardError, GameError};

use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Draw,
    Winner(Player),
}

/// A named side bound to whatever chooses its moves.
pub struct Seat {
    name: String,
    player: Player,
    agent: Box<dyn Agent>,
}

impl Seat {
    pub fn new(name: impl Into<String>, player: Player, agent: Box<dyn Agent>) -> Self {
        Seat {
            name: name.into(),
            player,
            agent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> Player {
        self.player
    }
}

/// Presentation hooks used by the game loop.
pub trait Renderer {
    /// Draw the board. `last_move` is the (row, col) of the latest disc.
    fn board(&mut self, board: &Board, last_move: Option<(usize, usize)>) -> io::Result<()>;

    fn error(&mut self, err: &BoardError) -> io::Result<()>;

    fn message(&mut self, msg: &str) -> io::Result<()>;

    fn game_over(&mut self, game: &Game) -> io::Result<()>;
}

/// Turn-taking loop between two seats sharing one board.
pub struct Game {
    board: Board,
    seats: [Seat; 2],
    status: GameStatus,
}

impl Game {
    /// `first` makes the opening move.
    pub fn new(board: Board, first: Seat, second: Seat) -> Self {
        Game {
            board,
            seats: [first, second],
            status: GameStatus::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn seats(&self) -> &[Seat; 2] {
        &self.seats
    }

    /// Name of the winning seat, if the game has been won
    pub fn winner_name(&self) -> Option<&str> {
        match self.status {
            GameStatus::Winner(player) => self
                .seats
                .iter()
                .find(|seat| seat.player == player)
                .map(Seat::name),
            _ => None,
        }
    }

    /// True if any seat's agent asks for another round
    pub fn rematch_requested(&mut self) -> bool {
        self.seats.iter_mut().any(|seat| seat.agent.wants_rematch())
    }

    /// Empty the board for a rematch with the same seats
    pub fn reset(&mut self) {
        self.board.reset();
        self.status = GameStatus::Playing;
    }

    /// Alternate turns until someone wins or the board fills up.
    ///
    /// A rejected move is reported and the same seat is asked again. A seat
    /// that returns no move ends the game with [`GameError::Abandoned`].
    pub fn play(&mut self, renderer: &mut dyn Renderer) -> Result<GameStatus, GameError> {
        if self.status != GameStatus::Playing {
            return Ok(self.status);
        }

        let mut current = 0;
        let mut last_move = None;

        loop {
            let seat = &mut self.seats[current];
            renderer.message(&format!("\n{}'s turn\n", seat.name))?;
            renderer.board(&self.board, last_move)?;

            let Some(col) = seat.agent.select_move(&self.board) else {
                return Err(GameError::Abandoned(seat.name.clone()));
            };

            if let Err(err) = self.board.make_move(col, seat.player) {
                warn!("{} tried column {col}: {err}", seat.name);
                renderer.error(&err)?;
                continue;
            }
            info!("{} ({}) played column {col}", seat.name, seat.player.name());
            last_move = self.board.top_filled_row(col).map(|row| (row, col));

            if self.board.was_winning_move(col) {
                self.status = GameStatus::Winner(seat.player);
                break;
            }
            if self.board.is_full() {
                self.status = GameStatus::Draw;
                break;
            }

            current = 1 - current;
        }

        renderer.game_over(self)?;
        Ok(self.status)
    }
}
