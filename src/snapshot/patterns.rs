//! Built-in fixed patterns

use crate::snapshot::Snapshot;

/// Live cells of the Gosper glider gun, relative to its 36x9 bounding
/// box, (x, y) with y growing downward.
const GOSPER_GLIDER_GUN: [(usize, usize); 36] = [
    (24, 0),
    (22, 1),
    (24, 1),
    (12, 2),
    (13, 2),
    (20, 2),
    (21, 2),
    (34, 2),
    (35, 2),
    (11, 3),
    (15, 3),
    (20, 3),
    (21, 3),
    (34, 3),
    (35, 3),
    (0, 4),
    (1, 4),
    (10, 4),
    (16, 4),
    (20, 4),
    (21, 4),
    (0, 5),
    (1, 5),
    (10, 5),
    (14, 5),
    (16, 5),
    (17, 5),
    (22, 5),
    (24, 5),
    (10, 6),
    (16, 6),
    (24, 6),
    (11, 7),
    (15, 7),
    (12, 8),
    (13, 8),
];

/// Side of the square board the built-in gun snapshot uses. Leaves room
/// below and to the right for the glider stream before it reaches the
/// boundary (no wraparound, so gliders die against the edge).
const GUN_BOARD_SIDE: usize = 48;

/// Placement of the gun's bounding box on that board.
const GUN_OFFSET: (usize, usize) = (5, 5);

/// The Gosper glider gun as a square flat snapshot, ready for
/// `Session::restore`. Emits one glider every 30 generations.
pub fn gosper_glider_gun() -> Snapshot {
    let mut cells = vec![false; GUN_BOARD_SIDE * GUN_BOARD_SIDE];
    for &(x, y) in GOSPER_GLIDER_GUN.iter() {
        let (gx, gy) = (x + GUN_OFFSET.0, y + GUN_OFFSET.1);
        cells[gx * GUN_BOARD_SIDE + gy] = true;
    }
    Snapshot { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::Board;
    use crate::snapshot::{decode, encode};

    #[test]
    fn test_gun_snapshot_shape() {
        let snapshot = gosper_glider_gun();
        assert_eq!(snapshot.len(), GUN_BOARD_SIDE * GUN_BOARD_SIDE);
        assert_eq!(snapshot.side().unwrap(), GUN_BOARD_SIDE);
        assert_eq!(snapshot.cells.iter().filter(|&&c| c).count(), 36);
    }

    #[test]
    fn test_gun_emits_a_glider_per_period() {
        let decoded = decode(&gosper_glider_gun()).unwrap();
        let mut board = Board::from_cells(decoded.width, decoded.height, decoded.cells).unwrap();

        for _ in 0..30 {
            board.step();
        }
        // One full period: the gun reproduces itself plus one 5-cell
        // glider in flight.
        assert_eq!(board.generation(), 30);
        assert_eq!(board.living_count(), 41);
    }

    #[test]
    fn test_gun_round_trips_through_codec() {
        let snapshot = gosper_glider_gun();
        let decoded = decode(&snapshot).unwrap();
        let board = Board::from_cells(decoded.width, decoded.height, decoded.cells).unwrap();
        assert_eq!(encode(&board), snapshot);
    }
}
