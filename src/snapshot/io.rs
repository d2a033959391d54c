//! File I/O for patterns and snapshots
//!
//! Two on-disk forms: `0`/`1` text grids (one line per row, any
//! rectangle) and the flat JSON snapshot (square boards only).

use crate::life::Board;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a board from a `0`/`1` text grid. Each non-empty line is a row;
/// all rows must have the same length.
pub fn parse_board_from_string(content: &str) -> Result<Board> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("pattern is empty or contains no valid rows");
    }

    let height = lines.len();
    let width = lines[0].len();
    let mut flat = vec![false; width * height];

    for (y, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "row {} has length {}, expected {} (all rows must have the same length)",
                y,
                line.len(),
                width
            );
        }
        for (x, ch) in line.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => flat[x * height + y] = true,
                _ => anyhow::bail!(
                    "invalid character '{}' at ({}, {}), only '0' and '1' are allowed",
                    ch,
                    x,
                    y
                ),
            }
        }
    }

    Board::from_cells(width, height, flat).map_err(Into::into)
}

/// Render a board as a `0`/`1` text grid.
pub fn board_to_string(board: &Board) -> String {
    let mut result = String::with_capacity(board.height() * (board.width() + 1));
    for y in 0..board.height() {
        for x in 0..board.width() {
            result.push(if board.alive(x, y) { '1' } else { '0' });
        }
        result.push('\n');
    }
    result
}

/// Load a board from a `0`/`1` text grid file.
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read pattern file: {}", path.as_ref().display()))?;
    parse_board_from_string(&content)
        .with_context(|| format!("failed to parse pattern file: {}", path.as_ref().display()))
}

/// Save a board as a `0`/`1` text grid file.
pub fn save_board_to_file<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(&path, board_to_string(board))
        .with_context(|| format!("failed to write pattern file: {}", path.as_ref().display()))
}

/// Load a flat snapshot from its JSON wire form.
pub fn load_snapshot_from_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot file: {}", path.as_ref().display()))?;
    Snapshot::from_json(&content)
        .with_context(|| format!("failed to parse snapshot file: {}", path.as_ref().display()))
}

/// Save a flat snapshot in its JSON wire form.
pub fn save_snapshot_to_file<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(&path, snapshot.to_json()?)
        .with_context(|| format!("failed to write snapshot file: {}", path.as_ref().display()))
}

/// Create example pattern files for experimenting.
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    // Glider (moves diagonally)
    std::fs::write(dir.join("glider.txt"), "00100\n10100\n01100\n00000\n00000\n")
        .context("failed to write glider.txt")?;

    // Blinker (period-2 oscillator)
    std::fs::write(dir.join("blinker.txt"), "000\n111\n000\n")
        .context("failed to write blinker.txt")?;

    // Block (still life)
    std::fs::write(dir.join("block.txt"), "0000\n0110\n0110\n0000\n")
        .context("failed to write block.txt")?;

    // Beacon (period-2 oscillator, non-square rectangle)
    std::fs::write(dir.join("beacon.txt"), "110000\n110000\n001100\n001100\n")
        .context("failed to write beacon.txt")?;

    Ok(())
}
