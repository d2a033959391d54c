//! Game of Life core: cells, neighbor graph, rules and the board

pub mod board;
pub mod cell;
pub mod neighbors;
pub mod rules;

pub use board::Board;
pub use cell::Cell;
pub use neighbors::{NeighborGraph, MOORE_OFFSETS};
pub use rules::LifeRules;
