use crate::game::Board;

/// Anything that can choose a column for the side it plays.
///
/// The game loop drives the search engine and the human prompt through this
/// trait alone.
pub trait Agent {
    /// Pick a column for the current position. `None` means no move can be
    /// produced (no legal columns, or the input source is exhausted).
    fn select_move(&mut self, board: &Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Asked once a game is over. Automated agents never ask for another round.
    fn wants_rematch(&mut self) -> bool {
        false
    }
}
