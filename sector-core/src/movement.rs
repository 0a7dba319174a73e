//! Serialized player movement
//!
//! Move requests queue up FIFO. At most one move is in flight; it stays in
//! flight until the presentation layer signals that the approach animation
//! finished, at which point the move is resolved and the next one starts.

use std::collections::VecDeque;

use serde::Serialize;

use crate::hex::CellIndex;

/// Handle for the move currently in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveTicket {
    /// Monotonic per game; stale tickets never match
    pub seq: u64,
    pub from: Option<CellIndex>,
    pub to: CellIndex,
}

/// FIFO of pending destinations plus the in-flight move
#[derive(Clone, Debug, Default)]
pub struct MoveQueue {
    pending: VecDeque<CellIndex>,
    in_flight: Option<MoveTicket>,
    next_seq: u64,
}

impl MoveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a destination. Rejects the player's own cell and an immediate
    /// repeat of the tail.
    pub fn request(&mut self, index: CellIndex, player_cell: Option<CellIndex>) -> bool {
        if player_cell == Some(index) || self.pending.back() == Some(&index) {
            return false;
        }
        self.pending.push_back(index);
        true
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<MoveTicket> {
        self.in_flight
    }

    /// Destinations waiting behind the in-flight move
    pub fn pending(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Start the next move. Drains everything when the game is over and
    /// skips destinations equal to where the player now stands.
    pub fn advance(
        &mut self,
        player_cell: Option<CellIndex>,
        game_over: bool,
    ) -> Option<MoveTicket> {
        if game_over {
            self.drain();
            return None;
        }

        while let Some(to) = self.pending.pop_front() {
            if player_cell == Some(to) {
                continue;
            }
            let ticket = MoveTicket {
                seq: self.next_seq,
                from: player_cell,
                to,
            };
            self.next_seq += 1;
            self.in_flight = Some(ticket);
            return Some(ticket);
        }

        self.in_flight = None;
        None
    }

    /// Accept the completion signal for the in-flight move
    pub fn finish(&mut self, ticket: MoveTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Discard every pending destination. Returns how many were dropped.
    pub fn drain(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.in_flight = None;
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_current_cell_and_repeat_tail() {
        let mut q = MoveQueue::new();
        assert!(!q.request(3, Some(3)));
        assert!(q.request(4, Some(3)));
        assert!(!q.request(4, Some(3)));
        assert!(q.request(5, Some(3)));
        assert!(q.request(4, Some(3)));
        assert_eq!(q.pending().collect::<Vec<_>>(), vec![4, 5, 4]);
    }

    #[test]
    fn test_fifo_order_and_single_flight() {
        let mut q = MoveQueue::new();
        q.request(1, None);
        q.request(2, None);
        let first = q.advance(None, false).unwrap();
        assert_eq!(first.to, 1);
        assert!(q.is_in_flight());
        assert_eq!(q.pending_len(), 1);

        assert!(q.finish(first));
        assert!(!q.is_in_flight());
        let second = q.advance(Some(1), false).unwrap();
        assert_eq!(second.to, 2);
        assert_eq!(second.from, Some(1));
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_skips_destination_equal_to_player() {
        let mut q = MoveQueue::new();
        q.request(7, None);
        q.request(8, None);
        let ticket = q.advance(Some(7), false).unwrap();
        assert_eq!(ticket.to, 8);
    }

    #[test]
    fn test_empty_queue_clears_flight() {
        let mut q = MoveQueue::new();
        q.request(1, None);
        let t = q.advance(None, false).unwrap();
        q.finish(t);
        assert!(q.advance(Some(1), false).is_none());
        assert!(!q.is_in_flight());
    }

    #[test]
    fn test_game_over_drains() {
        let mut q = MoveQueue::new();
        q.request(1, None);
        q.request(2, None);
        q.request(3, None);
        assert!(q.advance(None, true).is_none());
        assert_eq!(q.pending_len(), 0);
        assert!(!q.is_in_flight());
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut q = MoveQueue::new();
        q.request(1, None);
        q.request(2, None);
        let first = q.advance(None, false).unwrap();
        assert!(q.finish(first));
        let _second = q.advance(Some(1), false).unwrap();
        assert!(!q.finish(first));
        assert!(q.is_in_flight());
    }
}
