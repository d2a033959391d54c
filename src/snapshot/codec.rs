//! Flat snapshot codec for saving and loading fixed patterns

use crate::error::{EngineError, Result};
use crate::life::Board;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A board's alive/dead pattern flattened into a single ordered
/// sequence, one flag per cell in arena order (x-outer, y-inner).
///
/// The format carries no explicit dimensions; decode infers a square
/// board from the sequence length. Non-square boards therefore cannot
/// round-trip through this format (the text-grid format in
/// [`crate::snapshot::io`] covers those).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: Vec<bool>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Side length of the square board this snapshot describes, or
    /// `MalformedSnapshot` when the length is not a positive perfect
    /// square.
    pub fn side(&self) -> Result<usize> {
        square_side(self.cells.len())
    }

    /// Serialize to the JSON wire form, `{"cells":[...]}`.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("failed to serialize snapshot")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse snapshot JSON")
    }
}

/// A decoded flat pattern with its inferred dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPattern {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

/// Flatten a board's pattern in arena order. Length is always
/// `width * height`.
pub fn encode(board: &Board) -> Snapshot {
    Snapshot {
        cells: board.cells().iter().map(|cell| cell.alive).collect(),
    }
}

/// Recover dimensions and alive flags from a flat snapshot.
///
/// Dimensions are inferred as a square of side `sqrt(len)`. Empty and
/// non-perfect-square lengths are rejected outright; decode never
/// truncates and has no partial effect.
pub fn decode(snapshot: &Snapshot) -> Result<DecodedPattern> {
    let side = snapshot.side()?;
    Ok(DecodedPattern {
        width: side,
        height: side,
        cells: snapshot.cells.clone(),
    })
}

fn square_side(len: usize) -> Result<usize> {
    if len == 0 {
        return Err(EngineError::MalformedSnapshot { len });
    }
    let side = (len as f64).sqrt().round() as usize;
    if side.saturating_mul(side) == len {
        Ok(side)
    } else {
        Err(EngineError::MalformedSnapshot { len })
    }
}
