//! Snapshot codec, built-in patterns and pattern file I/O

pub mod codec;
pub mod io;
pub mod patterns;

pub use codec::{decode, encode, DecodedPattern, Snapshot};
pub use io::{load_board_from_file, save_board_to_file, create_example_patterns};
pub use patterns::gosper_glider_gun;
