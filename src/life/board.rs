//! Board state and generation stepping

use crate::error::{EngineError, Result};
use crate::life::{Cell, LifeRules, NeighborGraph};
use crate::sim::BoardObserver;
use log::{debug, trace};
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// A bounded rectangular Game of Life board.
///
/// The board exclusively owns its cells and mutates them only inside
/// `randomize`, `step`, `clear` and the single-cell setters. The
/// generation counter is board-owned state: it only increases under
/// `step` and resets to 0 on `clear`. Neighbor lists are wired exactly
/// once at construction.
#[derive(Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    generation: u64,
    observer: Option<Arc<dyn BoardObserver>>,
}

impl Board {
    /// Build an all-dead `width` x `height` board with its neighbor graph
    /// wired. Dimensions are validated before any allocation, so a failed
    /// call has no effect.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        let mut cells: Vec<Cell> = (0..width * height).map(|_| Cell::new()).collect();
        for (cell, neighbors) in cells.iter_mut().zip(NeighborGraph::build(width, height)) {
            cell.neighbors = neighbors;
        }

        debug!("built {}x{} board", width, height);
        Ok(Self {
            width,
            height,
            cells,
            generation: 0,
            observer: None,
        })
    }

    /// Build a board from a flat alive/dead sequence in arena order
    /// (x-outer, y-inner). The sequence length must equal
    /// `width * height`.
    pub fn from_cells(width: usize, height: usize, flat: Vec<bool>) -> Result<Self> {
        if flat.len() != width.saturating_mul(height) || flat.is_empty() {
            return Err(EngineError::MalformedSnapshot { len: flat.len() });
        }
        let mut board = Self::new(width, height)?;
        for (cell, alive) in board.cells.iter_mut().zip(flat) {
            cell.alive = alive;
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Install the observer and immediately report the current
    /// generation, so a host wired after construction still sees the
    /// initial value.
    pub fn attach_observer(&mut self, observer: Arc<dyn BoardObserver>) {
        observer.generation_changed(self.generation);
        self.observer = Some(observer);
    }

    /// Redraw every cell from an independent 50/50 choice. Leaves the
    /// generation counter alone; callers pair this with a fresh board.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for idx in 0..self.cells.len() {
            let alive = rng.gen_bool(0.5);
            if self.cells[idx].alive != alive {
                self.cells[idx].alive = alive;
                self.notify_cell(idx, alive);
            }
        }
    }

    /// Advance one generation.
    ///
    /// Next states are computed into a separate buffer from pre-step
    /// state only, then committed in a single pass; no evaluation ever
    /// reads a mid-step value. The per-cell pass runs in parallel over
    /// disjoint cells, which cannot change the result.
    pub fn step(&mut self) {
        let next: Vec<bool> = self
            .cells
            .par_iter()
            .map(|cell| LifeRules::next_state(cell.alive, cell.live_neighbor_count(&self.cells)))
            .collect();

        for (idx, alive) in next.into_iter().enumerate() {
            if self.cells[idx].alive != alive {
                self.cells[idx].alive = alive;
                self.notify_cell(idx, alive);
            }
        }

        self.generation += 1;
        trace!("stepped to generation {}", self.generation);
        self.notify_generation();
    }

    /// Kill every cell and reset the generation counter to 0.
    pub fn clear(&mut self) {
        for idx in 0..self.cells.len() {
            if self.cells[idx].alive {
                self.cells[idx].alive = false;
                self.notify_cell(idx, false);
            }
        }
        self.generation = 0;
        self.notify_generation();
    }

    /// Flip a single cell, the way a pointer interaction does. No
    /// generation or neighbor side effects. Returns the new state.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool> {
        let idx = self.checked_index(x, y)?;
        let alive = !self.cells[idx].alive;
        self.cells[idx].alive = alive;
        self.notify_cell(idx, alive);
        Ok(alive)
    }

    /// Alive state at a coordinate, with bounds reported as an error.
    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.cells[self.checked_index(x, y)?].alive)
    }

    /// Set a cell's alive state directly (pattern loading, tests).
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        if self.cells[idx].alive != alive {
            self.cells[idx].alive = alive;
            self.notify_cell(idx, alive);
        }
        Ok(())
    }

    /// Alive state at a coordinate, treating out-of-bounds as dead.
    /// Display paths use this; hosts that need the error use `get`.
    pub fn alive(&self, x: usize, y: usize) -> bool {
        if x < self.width && y < self.height {
            self.cells[self.index(x, y)].alive
        } else {
            false
        }
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.alive)
    }

    /// Flat arena index for a coordinate (x-outer, y-inner order).
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Coordinate for a flat arena index.
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx / self.height, idx % self.height)
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(self.index(x, y))
        } else {
            Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn notify_generation(&self) {
        if let Some(observer) = &self.observer {
            observer.generation_changed(self.generation);
        }
    }

    fn notify_cell(&self, idx: usize, alive: bool) {
        if let Some(observer) = &self.observer {
            let (x, y) = self.coords(idx);
            observer.cell_changed(x, y, alive);
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("generation", &self.generation)
            .field("living", &self.living_count())
            .finish()
    }
}
