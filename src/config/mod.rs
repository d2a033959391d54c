//! Configuration management for the simulation engine

pub mod settings;

pub use settings::{BoardConfig, CliOverrides, Settings, SimulationConfig};
