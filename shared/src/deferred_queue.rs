use std::fmt::Debug;

use crate::types::FrameCount;

/// Items waiting a number of update frames before they are handed back.
/// Scheduling an item that is already waiting keeps the original countdown.
pub struct DeferredQueue<T: Copy + PartialEq + Debug> {
    pending: Vec<(T, FrameCount)>,
}

impl<T: Copy + PartialEq + Debug> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq + Debug> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Returns false if the item was already waiting
    pub fn schedule(&mut self, item: T, frames: FrameCount) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.pending.push((item, frames));
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.pending.iter().any(|(pending, _)| pending == item)
    }

    pub fn cancel(&mut self, item: &T) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| pending != item);
        self.pending.len() != before
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advances one frame, returning the items whose wait is over in the
    /// order they were scheduled.
    pub fn tick(&mut self) -> Vec<T> {
        let mut ready = Vec::new();
        self.pending.retain_mut(|(item, frames)| {
            *frames = frames.saturating_sub(1);
            if *frames == 0 {
                ready.push(*item);
                false
            } else {
                true
            }
        });
        ready
    }
}
