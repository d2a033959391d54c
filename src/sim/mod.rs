//! Simulation control and observation

pub mod controller;
pub mod observer;
pub mod session;

pub use controller::{SharedBoard, SimulationController, MIN_DELAY};
pub use observer::{BoardObserver, ChannelObserver, GenerationCounter, NullObserver};
pub use session::Session;
