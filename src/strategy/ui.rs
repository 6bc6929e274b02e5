use std::sync::{Arc, Condvar, Mutex};

use crate::game::prelude::*;
use crate::strategy::Strategy;

/// One-shot handoff slot between a front-end thread and the game driver.
/// The front-end publishes a move with [`UiPendingMove::set`]; the driver
/// blocks in [`UiPendingMove::wait`] until one arrives.
#[derive(Debug, Default)]
pub struct UiPendingMove {
    slot: Mutex<Option<PlacementMove>>,
    ready: Condvar,
}

impl UiPendingMove {
    pub fn new() -> UiPendingMove {
        UiPendingMove::default()
    }

    /// Publishes a move and wakes the waiting driver.
    pub fn set(&self, mv: PlacementMove) {
        let mut slot = self.slot.lock().expect("pending move lock is never poisoned");
        *slot = Some(mv);
        self.ready.notify_all();
    }

    /// Blocks until a move is published, then consumes it.
    pub fn wait(&self) -> PlacementMove {
        let slot = self.slot.lock().expect("pending move lock is never poisoned");
        let mut slot = self
            .ready
            .wait_while(slot, |pending| pending.is_none())
            .expect("pending move lock is never poisoned");
        slot.take().expect("wait_while only returns with a pending move")
    }

    /// Discards any unconsumed move.
    pub fn clear(&self) {
        let mut slot = self.slot.lock().expect("pending move lock is never poisoned");
        *slot = None;
    }
}

/// Blocks the driver on the shared pending-move slot.
pub struct UiInputStrategy {
    pending: Arc<UiPendingMove>,
}

impl UiInputStrategy {
    pub fn new(pending: Arc<UiPendingMove>) -> UiInputStrategy {
        UiInputStrategy { pending }
    }
}

impl Strategy for UiInputStrategy {
    fn choose(&mut self, game: &Game, player: PlayerId, _is_first: bool) -> Option<PlacementMove> {
        if game.board.legal_placement_moves(player).is_empty() {
            return None;
        }
        Some(self.pending.wait())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_wait_hands_the_move_over() {
        let pending = Arc::new(UiPendingMove::new());
        let game = Game::new();
        let mv = PlacementMove {
            piece: game.board.piece_by_type(PlayerId::One, PieceType::Two),
            tile: game.board.tile_at(0, 2).unwrap(),
        };

        let publisher = Arc::clone(&pending);
        let handle = std::thread::spawn(move || publisher.set(mv));
        let received = pending.wait();
        handle.join().unwrap();
        assert_eq!(received, mv);
    }

    #[test]
    fn clear_discards_a_pending_move() {
        let pending = UiPendingMove::new();
        let game = Game::new();
        pending.set(PlacementMove {
            piece: game.board.piece_by_type(PlayerId::Two, PieceType::One),
            tile: game.board.tile_at(1, 0).unwrap(),
        });
        pending.clear();
        assert!(pending.slot.lock().unwrap().is_none());
    }
}
