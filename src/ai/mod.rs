//! Move providers: the [`Agent`] trait and the fixed-depth minimax engine.

mod agent;
mod minimax;

pub use agent::Agent;
pub use minimax::{
    CenterDistanceHeuristic, Heuristic, MinimaxAgent, SearchOutcome, Turn, WIN_SCORE,
};
