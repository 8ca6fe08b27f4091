//! Core Connect Four game logic: board with move/undo and win detection,
//! player sides, and the turn-taking game loop.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, DEFAULT_COLS, DEFAULT_ROWS};
pub use player::Player;
pub use state::{Game, GameStatus, Renderer, Seat};
