//! Bounded FIFO of chat messages for one user.

use prompt::ChatMessage;
use std::collections::vec_deque::Iter;
use std::collections::VecDeque;

/// Ordered message history with a fixed capacity.
///
/// Invariant: `len() <= capacity()`. Pushing onto a full session evicts from the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Session {
    /// Creates an empty session. `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a message, evicting the oldest ones until the capacity holds.
    /// Returns the number of evicted messages.
    pub fn push(&mut self, message: ChatMessage) -> usize {
        self.messages.push_back(message);
        let mut evicted = 0;
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    /// Copies the history into a `Vec`, oldest first.
    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity_keeps_everything() {
        let mut session = Session::new(3);
        assert_eq!(session.push(ChatMessage::user("a")), 0);
        assert_eq!(session.push(ChatMessage::assistant("b")), 0);
        assert_eq!(session.len(), 2);
        assert_eq!(
            session.to_vec(),
            vec![ChatMessage::user("a"), ChatMessage::assistant("b")]
        );
    }

    #[test]
    fn test_push_over_capacity_evicts_oldest() {
        let mut session = Session::new(2);
        session.push(ChatMessage::user("1"));
        session.push(ChatMessage::user("2"));
        assert_eq!(session.push(ChatMessage::user("3")), 1);
        assert_eq!(
            session.to_vec(),
            vec![ChatMessage::user("2"), ChatMessage::user("3")]
        );
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut session = Session::new(0);
        assert_eq!(session.capacity(), 1);
        session.push(ChatMessage::user("a"));
        session.push(ChatMessage::user("b"));
        assert_eq!(session.to_vec(), vec![ChatMessage::user("b")]);
    }
}
