/*
 *  Placement policies. Only the tree-search strategy (see the `search`
 *  module) plays seriously; the others exist for baselines and interaction.
 */

mod human;
mod random;
mod ui;

pub use human::HumanInputStrategy;
pub use random::RandomStrategy;
pub use ui::{UiInputStrategy, UiPendingMove};

use crate::game::prelude::*;

/// A placement policy. The game driver invokes it twice per round, once per
/// side; returning `None` means the side has no move and passes.
pub trait Strategy {
    fn choose(&mut self, game: &Game, player: PlayerId, is_first: bool) -> Option<PlacementMove>;

    /// Flushes whatever caches the strategy keeps; a no-op for stateless
    /// strategies.
    fn flush_caches(&mut self) {}
}
