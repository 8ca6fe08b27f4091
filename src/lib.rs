//! # Connect Four
//!
//! Terminal Connect Four against a computer opponent that searches the game
//! tree with plain fixed-depth minimax.
//!
//! ## Modules
//!
//! - [`game`] — Board with move/undo and win detection, players, game loop
//! - [`ai`] — Move-provider trait and the minimax engine
//! - [`ui`] — Colored terminal renderer and line-based human prompt
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
