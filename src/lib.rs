//! Conway's Game of Life simulation engine
//!
//! Bounded-grid cellular automaton core: board construction with a
//! precomputed Moore neighbor graph, double-buffered generation
//! stepping under the classic B3/S23 rule, a cancellable continuous-run
//! controller, and a flat snapshot codec for fixed patterns such as the
//! Gosper glider gun. Rendering and input belong to the host; the core
//! reports through an injected observer.

pub mod config;
pub mod error;
pub mod life;
pub mod sim;
pub mod snapshot;
pub mod utils;

pub use config::Settings;
pub use error::EngineError;
pub use life::{Board, Cell, LifeRules, NeighborGraph};
pub use sim::{BoardObserver, Session, SimulationController};
pub use snapshot::Snapshot;

/// Build a randomly seeded board, the way an interactive host does on
/// startup.
pub fn random_board(width: usize, height: usize) -> error::Result<Board> {
    let mut board = Board::new(width, height)?;
    board.randomize(&mut rand::thread_rng());
    Ok(board)
}
