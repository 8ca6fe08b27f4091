//! Terminal front end: a colored text renderer and a line-based human prompt.

mod prompt;
mod terminal;

pub use prompt::HumanInput;
pub use terminal::{draw_board, TerminalRenderer};
