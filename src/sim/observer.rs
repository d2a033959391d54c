//! Observation hooks for presentation layers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Callback surface the board reports through.
///
/// `generation_changed` fires after create, step and clear with the new
/// generation number. `cell_changed` is an optional per-cell hook fired
/// whenever a cell's alive state flips; hosts that only track the
/// generation counter can ignore it.
pub trait BoardObserver: Send + Sync {
    fn generation_changed(&self, generation: u64);

    fn cell_changed(&self, _x: usize, _y: usize, _alive: bool) {}
}

/// Observer that ignores every notification.
pub struct NullObserver;

impl BoardObserver for NullObserver {
    fn generation_changed(&self, _generation: u64) {}
}

/// Forwards generation numbers over a channel, for hosts that drive a
/// render loop off board activity instead of polling.
pub struct ChannelObserver {
    tx: Mutex<Sender<u64>>,
}

impl ChannelObserver {
    pub fn channel() -> (Arc<Self>, Receiver<u64>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(Self { tx: Mutex::new(tx) }), rx)
    }
}

impl BoardObserver for ChannelObserver {
    fn generation_changed(&self, generation: u64) {
        // Receiver may be gone; a dropped host just stops listening.
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(generation);
        }
    }
}

/// Remembers the latest reported generation and how many notifications
/// arrived. Used by status lines and tests.
#[derive(Default)]
pub struct GenerationCounter {
    latest: AtomicU64,
    notifications: AtomicU64,
    cell_flips: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    pub fn notifications(&self) -> u64 {
        self.notifications.load(Ordering::Acquire)
    }

    pub fn cell_flips(&self) -> u64 {
        self.cell_flips.load(Ordering::Acquire)
    }
}

impl BoardObserver for GenerationCounter {
    fn generation_changed(&self, generation: u64) {
        self.latest.store(generation, Ordering::Release);
        self.notifications.fetch_add(1, Ordering::AcqRel);
    }

    fn cell_changed(&self, _x: usize, _y: usize, _alive: bool) {
        self.cell_flips.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_observer_forwards_generations() {
        let (observer, rx) = ChannelObserver::channel();
        observer.generation_changed(0);
        observer.generation_changed(1);
        assert_eq!(rx.recv().unwrap(), 0);
        assert_eq!(rx.recv().unwrap(), 1);
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (observer, rx) = ChannelObserver::channel();
        drop(rx);
        observer.generation_changed(3);
    }

    #[test]
    fn test_generation_counter() {
        let counter = GenerationCounter::new();
        counter.generation_changed(0);
        counter.generation_changed(5);
        counter.cell_changed(1, 2, true);

        assert_eq!(counter.latest(), 5);
        assert_eq!(counter.notifications(), 2);
        assert_eq!(counter.cell_flips(), 1);
    }
}
