//! Cancellable repeating stepper for continuous simulation

use crate::life::Board;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shared slot holding the board a controller steps. `None` until the
/// host's first successful create.
pub type SharedBoard = Arc<Mutex<Option<Board>>>;

/// Smallest tick interval. Zero and negative delays clamp here so the
/// worker can never spin.
pub const MIN_DELAY: Duration = Duration::from_millis(1);

/// Two-state (Idle/Running) driver that invokes `step` on a shared board
/// after every delay interval.
///
/// Cancellation is cooperative: stopping clears an atomic flag, wakes
/// the sleeping worker and joins it, so no further `step` can run once
/// the stop path returns. An in-flight step is allowed to finish; steps
/// are synchronous and atomic, so nothing needs rolling back.
pub struct SimulationController {
    board: SharedBoard,
    shared: Arc<ControllerShared>,
    worker: Option<JoinHandle<()>>,
}

struct ControllerShared {
    running: AtomicBool,
    delay: Mutex<Duration>,
    wake: Condvar,
}

impl SimulationController {
    pub fn new(board: SharedBoard, delay: Duration) -> Self {
        Self {
            board,
            shared: Arc::new(ControllerShared {
                running: AtomicBool::new(false),
                delay: Mutex::new(clamp_delay(delay)),
                wake: Condvar::new(),
            }),
            worker: None,
        }
    }

    /// Build with a delay given in seconds, the unit hosts configure in.
    pub fn from_secs(board: SharedBoard, secs: f32) -> Self {
        Self::new(board, delay_from_secs(secs))
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Start when idle, stop when running. Returns the state after the
    /// call: `true` means the simulation is now running.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
            false
        } else {
            self.start();
            true
        }
    }

    /// Current tick interval.
    pub fn delay(&self) -> Duration {
        *lock_ignore_poison(&self.shared.delay)
    }

    /// Change the tick interval. Re-read by the worker on every
    /// iteration, so the change takes effect on the next tick without a
    /// restart. Values below `MIN_DELAY` clamp to `MIN_DELAY`.
    pub fn set_delay(&self, delay: Duration) {
        *lock_ignore_poison(&self.shared.delay) = clamp_delay(delay);
        self.shared.wake.notify_all();
    }

    pub fn set_delay_secs(&self, secs: f32) {
        self.set_delay(delay_from_secs(secs));
    }

    fn start(&mut self) {
        self.shared.running.store(true, Ordering::Release);
        let board = Arc::clone(&self.board);
        let shared = Arc::clone(&self.shared);
        debug!("simulation started, delay {:?}", self.delay());
        self.worker = Some(thread::spawn(move || worker_loop(board, shared)));
    }

    fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        self.shared.wake.notify_all();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        debug!("simulation stopped");
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}

fn worker_loop(board: SharedBoard, shared: Arc<ControllerShared>) {
    loop {
        let guard = lock_ignore_poison(&shared.delay);
        let delay = *guard;
        let (guard, wait) = shared
            .wake
            .wait_timeout(guard, delay)
            .unwrap_or_else(PoisonError::into_inner);
        drop(guard);

        if !shared.running.load(Ordering::Acquire) {
            break;
        }
        if !wait.timed_out() {
            // Woken early: the delay changed, re-read it and wait again.
            continue;
        }
        if let Some(board) = lock_ignore_poison(&board).as_mut() {
            board.step();
        }
    }
}

fn clamp_delay(delay: Duration) -> Duration {
    delay.max(MIN_DELAY)
}

fn delay_from_secs(secs: f32) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f32(secs)
    } else {
        Duration::ZERO
    }
}

pub(crate) fn lock_ignore_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_board(width: usize, height: usize) -> SharedBoard {
        Arc::new(Mutex::new(Some(Board::new(width, height).unwrap())))
    }

    fn generation_of(board: &SharedBoard) -> u64 {
        lock_ignore_poison(board).as_ref().unwrap().generation()
    }

    #[test]
    fn test_toggle_alternates_states() {
        let mut controller = SimulationController::new(shared_board(2, 2), MIN_DELAY);
        assert!(!controller.is_running());
        assert!(controller.toggle());
        assert!(controller.is_running());
        assert!(!controller.toggle());
        assert!(!controller.is_running());
    }

    #[test]
    fn test_running_controller_steps_the_board() {
        let board = shared_board(3, 3);
        let mut controller =
            SimulationController::new(Arc::clone(&board), Duration::from_millis(2));

        assert!(controller.toggle());
        std::thread::sleep(Duration::from_millis(80));
        assert!(!controller.toggle());

        assert!(generation_of(&board) >= 1);
    }

    #[test]
    fn test_no_steps_after_stop() {
        let board = shared_board(3, 3);
        let mut controller =
            SimulationController::new(Arc::clone(&board), Duration::from_millis(2));

        controller.toggle();
        std::thread::sleep(Duration::from_millis(40));
        controller.toggle();

        let frozen = generation_of(&board);
        std::thread::sleep(Duration::from_millis(40));
        assert_eq!(generation_of(&board), frozen);
    }

    #[test]
    fn test_empty_slot_is_tolerated() {
        let board: SharedBoard = Arc::new(Mutex::new(None));
        let mut controller =
            SimulationController::new(Arc::clone(&board), Duration::from_millis(2));

        controller.toggle();
        std::thread::sleep(Duration::from_millis(20));
        controller.toggle();
    }

    #[test]
    fn test_delay_clamps_to_minimum() {
        let controller = SimulationController::from_secs(shared_board(2, 2), 0.0);
        assert_eq!(controller.delay(), MIN_DELAY);

        controller.set_delay_secs(-1.5);
        assert_eq!(controller.delay(), MIN_DELAY);

        controller.set_delay(Duration::from_millis(250));
        assert_eq!(controller.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_delay_change_applies_without_restart() {
        let board = shared_board(3, 3);
        let mut controller =
            SimulationController::new(Arc::clone(&board), Duration::from_secs(3600));

        controller.toggle();
        // Worker is parked on the hour-long wait; shrinking the delay
        // must take effect on the next tick, not after the old wait.
        controller.set_delay(Duration::from_millis(2));
        std::thread::sleep(Duration::from_millis(80));
        controller.toggle();

        assert!(generation_of(&board) >= 1);
    }

    #[test]
    fn test_stopped_on_drop() {
        let board = shared_board(2, 2);
        {
            let mut controller =
                SimulationController::new(Arc::clone(&board), Duration::from_millis(2));
            controller.toggle();
            std::thread::sleep(Duration::from_millis(20));
        }
        let frozen = generation_of(&board);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(generation_of(&board), frozen);
    }
}
