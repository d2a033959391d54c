//! Host-facing session: a board slot, its controller and its observer

use crate::config::Settings;
use crate::error::{EngineError, Result};
use crate::life::Board;
use crate::sim::controller::{lock_ignore_poison, SharedBoard, SimulationController};
use crate::sim::{BoardObserver, NullObserver};
use crate::snapshot::{self, Snapshot};
use rand::Rng;
use std::sync::{Arc, Mutex};

/// Everything a presentation layer needs from the core, behind one
/// explicit handle instead of ambient globals.
///
/// The session owns an optional board (none exists before the first
/// successful `create`), the simulation controller ticking it, and the
/// injected observer that each new board reports through. Every
/// operation other than `create` reports `Uninitialized` while the slot
/// is empty.
pub struct Session {
    board: SharedBoard,
    controller: SimulationController,
    observer: Arc<dyn BoardObserver>,
    random_fill: bool,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self::with_observer(settings, Arc::new(NullObserver))
    }

    pub fn with_observer(settings: &Settings, observer: Arc<dyn BoardObserver>) -> Self {
        let board: SharedBoard = Arc::new(Mutex::new(None));
        let controller =
            SimulationController::from_secs(Arc::clone(&board), settings.simulation.step_delay_secs);
        Self {
            board,
            controller,
            observer,
            random_fill: settings.board.random_fill,
        }
    }

    /// Build a fresh board, replacing any previous one wholesale. The
    /// initial fill is an independent 50/50 draw per cell unless random
    /// fill is disabled in the settings. Dimension violations are
    /// checked first and leave the previous board untouched. A running
    /// simulation keeps ticking and picks up the new board on its next
    /// tick.
    pub fn create(&mut self, width: usize, height: usize) -> Result<()> {
        self.create_with_rng(width, height, &mut rand::thread_rng())
    }

    /// `create` with a caller-supplied generator, so tests can seed it.
    pub fn create_with_rng<R: Rng + ?Sized>(
        &mut self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<()> {
        let mut board = Board::new(width, height)?;
        if self.random_fill {
            board.randomize(rng);
        }
        self.install(board);
        Ok(())
    }

    /// Rebuild the board from a flat snapshot, inferring square
    /// dimensions. Generation restarts at 0.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let decoded = snapshot::decode(snapshot)?;
        let board = Board::from_cells(decoded.width, decoded.height, decoded.cells)?;
        self.install(board);
        Ok(())
    }

    /// Hand the session an already-built board (pattern files may be
    /// non-square and so bypass the snapshot codec).
    pub fn adopt(&mut self, board: Board) {
        self.install(board);
    }

    /// Advance one generation.
    pub fn step(&mut self) -> Result<()> {
        self.with_board_mut(|board| {
            board.step();
            Ok(())
        })
    }

    /// Kill every cell and reset the generation counter.
    pub fn clear(&mut self) -> Result<()> {
        self.with_board_mut(|board| {
            board.clear();
            Ok(())
        })
    }

    /// Flip the cell a pointer interaction resolved to. Returns the new
    /// state.
    pub fn touch(&mut self, x: usize, y: usize) -> Result<bool> {
        self.with_board_mut(|board| board.toggle_cell(x, y))
    }

    /// Start or stop the continuous simulation. Returns `true` when the
    /// simulation is running after the call.
    pub fn toggle(&mut self) -> Result<bool> {
        if lock_ignore_poison(&self.board).is_none() {
            return Err(EngineError::Uninitialized);
        }
        Ok(self.controller.toggle())
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Change the tick interval, effective on the next tick.
    pub fn set_delay_secs(&self, secs: f32) {
        self.controller.set_delay_secs(secs);
    }

    pub fn generation(&self) -> Result<u64> {
        self.with_board(|board| Ok(board.generation()))
    }

    /// Flatten the current pattern into a snapshot.
    pub fn snapshot(&self) -> Result<Snapshot> {
        self.with_board(|board| Ok(snapshot::encode(board)))
    }

    /// Run a closure against the current board, e.g. for rendering.
    pub fn with_board<T>(&self, f: impl FnOnce(&Board) -> Result<T>) -> Result<T> {
        match lock_ignore_poison(&self.board).as_ref() {
            Some(board) => f(board),
            None => Err(EngineError::Uninitialized),
        }
    }

    fn with_board_mut<T>(&mut self, f: impl FnOnce(&mut Board) -> Result<T>) -> Result<T> {
        match lock_ignore_poison(&self.board).as_mut() {
            Some(board) => f(board),
            None => Err(EngineError::Uninitialized),
        }
    }

    fn install(&mut self, mut board: Board) {
        board.attach_observer(Arc::clone(&self.observer));
        *lock_ignore_poison(&self.board) = Some(board);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GenerationCounter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn settings() -> Settings {
        Settings::default()
    }

    fn dead_fill_settings() -> Settings {
        let mut settings = Settings::default();
        settings.board.random_fill = false;
        settings
    }

    #[test]
    fn test_operations_before_create_are_uninitialized() {
        let mut session = Session::new(&settings());
        assert_eq!(session.step(), Err(EngineError::Uninitialized));
        assert_eq!(session.clear(), Err(EngineError::Uninitialized));
        assert_eq!(session.touch(0, 0), Err(EngineError::Uninitialized));
        assert_eq!(session.toggle(), Err(EngineError::Uninitialized));
        assert_eq!(session.generation(), Err(EngineError::Uninitialized));
        assert!(session.snapshot().is_err());
        assert!(!session.is_running());
    }

    #[test]
    fn test_create_then_step_and_clear() {
        let mut session = Session::new(&dead_fill_settings());
        session.create(4, 4).unwrap();
        assert_eq!(session.generation().unwrap(), 0);

        session.touch(1, 1).unwrap();
        session.step().unwrap();
        assert_eq!(session.generation().unwrap(), 1);

        session.clear().unwrap();
        assert_eq!(session.generation().unwrap(), 0);
        session.with_board(|board| {
            assert!(board.is_empty());
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_create_random_fill_honors_settings() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut random = Session::new(&settings());
        random.create_with_rng(8, 8, &mut rng).unwrap();
        let filled = random.with_board(|b| Ok(b.living_count())).unwrap();
        assert!(filled > 0 && filled < 64);

        let mut dead = Session::new(&dead_fill_settings());
        dead.create(8, 8).unwrap();
        assert!(dead.with_board(|b| Ok(b.is_empty())).unwrap());
    }

    #[test]
    fn test_failed_create_leaves_previous_board() {
        let mut session = Session::new(&dead_fill_settings());
        session.create(4, 5).unwrap();
        session.touch(2, 2).unwrap();

        assert!(matches!(
            session.create(0, 9),
            Err(EngineError::InvalidDimensions { .. })
        ));
        session.with_board(|board| {
            assert_eq!((board.width(), board.height()), (4, 5));
            assert_eq!(board.living_count(), 1);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_observer_is_wired_to_every_board() {
        let counter = GenerationCounter::new();
        let mut session = Session::with_observer(&dead_fill_settings(), counter.clone());

        session.create(3, 3).unwrap();
        assert_eq!(counter.notifications(), 1);
        assert_eq!(counter.latest(), 0);

        session.step().unwrap();
        assert_eq!(counter.latest(), 1);

        // A rebuild reports generation 0 again through the same observer.
        session.create(3, 3).unwrap();
        assert_eq!(counter.latest(), 0);
    }

    #[test]
    fn test_toggle_drives_automatic_steps() {
        let mut session = Session::new(&dead_fill_settings());
        session.create(3, 3).unwrap();
        session.set_delay_secs(0.002);

        assert!(session.toggle().unwrap());
        assert!(session.is_running());
        std::thread::sleep(Duration::from_millis(80));
        assert!(!session.toggle().unwrap());

        let frozen = session.generation().unwrap();
        assert!(frozen >= 1);
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(session.generation().unwrap(), frozen);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut session = Session::new(&settings());
        session.create_with_rng(6, 6, &mut rng).unwrap();
        session.step().unwrap();

        let pattern = session.snapshot().unwrap();
        let living = session.with_board(|b| Ok(b.living_count())).unwrap();

        let mut other = Session::new(&settings());
        other.restore(&pattern).unwrap();
        assert_eq!(other.generation().unwrap(), 0);
        assert_eq!(other.with_board(|b| Ok(b.living_count())).unwrap(), living);
        assert_eq!(other.snapshot().unwrap(), pattern);
    }

    #[test]
    fn test_adopt_accepts_non_square_boards() {
        let mut session = Session::new(&settings());
        let board = Board::from_cells(2, 3, vec![true, false, false, true, false, true]).unwrap();
        session.adopt(board);
        assert_eq!(session.generation().unwrap(), 0);
        assert_eq!(session.with_board(|b| Ok(b.living_count())).unwrap(), 3);
    }
}
