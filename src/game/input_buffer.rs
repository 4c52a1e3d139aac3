//! Lock-free action queue between the input collaborator and the simulation
//!
//! Uses crossbeam-channel so an input thread (or a test) can push discrete
//! actions without touching simulation state. The simulation drains every
//! pending action at the start of each frame.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::game::constants::sim;

/// Per-tick movement intent supplied by the input collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intent {
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Dash,
    Bomb,
    TogglePause,
    /// Start a fresh run (from menu, game over or pause)
    Start,
    BackToMenu,
}

/// Bounded action queue owned by the simulation
pub struct ActionQueue {
    sender: Sender<Action>,
    receiver: Receiver<Action>,
    capacity: usize,
}

impl ActionQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Clonable handle for the input side
    pub fn sender(&self) -> ActionSender {
        ActionSender {
            sender: self.sender.clone(),
        }
    }

    /// Push from the owning side; false when the queue is full
    #[inline]
    pub fn try_submit(&self, action: Action) -> bool {
        self.sender.try_send(action).is_ok()
    }

    /// Take every pending action in submission order
    pub fn drain(&self) -> Vec<Action> {
        self.receiver.try_iter().collect()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new(sim::ACTION_QUEUE_CAPACITY)
    }
}

/// Clonable sender handle for the input collaborator
#[derive(Clone)]
pub struct ActionSender {
    sender: Sender<Action>,
}

impl ActionSender {
    /// Submit an action without blocking
    #[inline]
    pub fn try_send(&self, action: Action) -> Result<(), ActionQueueError> {
        self.sender.try_send(action).map_err(|e| match e {
            TrySendError::Full(_) => ActionQueueError::Full,
            TrySendError::Disconnected(_) => ActionQueueError::Disconnected,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionQueueError {
    #[error("Action queue is full")]
    Full,
    #[error("Simulation dropped the action queue")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_and_drain_preserves_order() {
        let queue = ActionQueue::new(8);
        assert!(queue.try_submit(Action::Dash));
        assert!(queue.try_submit(Action::Bomb));
        assert_eq!(queue.pending_count(), 2);

        let drained = queue.drain();
        assert_eq!(drained, vec![Action::Dash, Action::Bomb]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_rejects() {
        let queue = ActionQueue::new(2);
        assert!(queue.try_submit(Action::Start));
        assert!(queue.try_submit(Action::Start));
        assert!(!queue.try_submit(Action::Start));

        let sender = queue.sender();
        assert_eq!(sender.try_send(Action::Dash), Err(ActionQueueError::Full));
    }

    #[test]
    fn test_sender_from_other_thread() {
        let queue = ActionQueue::default();
        let sender = queue.sender();
        let handle = std::thread::spawn(move || {
            for _ in 0..5 {
                sender.try_send(Action::TogglePause).unwrap();
            }
        });
        handle.join().unwrap();
        assert_eq!(queue.drain().len(), 5);
    }

    #[test]
    fn test_disconnected_sender() {
        let queue = ActionQueue::new(4);
        let sender = queue.sender();
        drop(queue);
        assert_eq!(sender.try_send(Action::Bomb), Err(ActionQueueError::Disconnected));
    }

    #[test]
    fn test_intent_idle() {
        assert!(Intent::default().is_idle());
        assert!(!Intent {
            left: true,
            ..Intent::default()
        }
        .is_idle());
    }
}
