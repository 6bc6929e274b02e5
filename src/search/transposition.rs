use crate::game::prelude::*;
use crate::search::abstract_move::AbstractMove;
use crate::search::config::EvaluationType;

/// A single cached search result: the set of equally-best moves, the score,
/// the depth it was searched to, and what kind of bound the score is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub best_moves: Vec<AbstractMove>,
    pub score: i32,
    pub depth: u8,
    pub kind: EvaluationType,
}

/// Search results keyed by `(side_to_move, board_notation)`. Scores are
/// stored from the keyed side's point of view; cross-side probes negate.
#[derive(Clone, Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<String, TranspositionEntry>,
}

impl TranspositionTable {
    pub fn new() -> TranspositionTable {
        TranspositionTable::default()
    }

    /// The canonical cache key for a position with `side` to move.
    pub fn hash_key(side: PlayerId, board: &Board) -> String {
        format!("{}#{}", side, board.to_notation())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Looks a position up. An entry is reusable when it was searched at
    /// least as deep as requested and is either exact, or a cutoff that
    /// would still fail the caller's window. With `inverse_score` the stored
    /// score is negated before being returned (cross-side reuse).
    pub fn probe(
        &self,
        side: PlayerId,
        board: &Board,
        remaining_depth: u8,
        inverse_score: bool,
        alpha: i32,
        beta: i32,
    ) -> Option<(Vec<AbstractMove>, i32, EvaluationType)> {
        let entry = self.entries.get(&Self::hash_key(side, board))?;
        if entry.depth < remaining_depth {
            return None;
        }
        let usable = match entry.kind {
            EvaluationType::Exact => true,
            EvaluationType::BetaCutoff => entry.score > beta,
            EvaluationType::AlphaCutoff => entry.score < alpha,
        };
        if !usable {
            return None;
        }
        let score = if inverse_score {
            -entry.score
        } else {
            entry.score
        };
        Some((entry.best_moves.clone(), score, entry.kind))
    }

    /// Records a search result. An existing entry is only overwritten by a
    /// strictly deeper one, or by an equally-deep exact evaluation replacing
    /// a cutoff; exact entries are never downgraded at equal depth. With
    /// `inverse_score` the score is negated before storage, so the entry
    /// reads correctly for the keyed side.
    pub fn store(
        &mut self,
        best_moves: Vec<AbstractMove>,
        score: i32,
        kind: EvaluationType,
        side: PlayerId,
        board: &Board,
        depth: u8,
        inverse_score: bool,
    ) {
        let key = Self::hash_key(side, board);
        if let Some(existing) = self.entries.get(&key) {
            let replace = depth > existing.depth
                || (depth == existing.depth
                    && kind == EvaluationType::Exact
                    && existing.kind != EvaluationType::Exact);
            if !replace {
                return;
            }
        }
        let score = if inverse_score { -score } else { score };
        self.entries.insert(
            key,
            TranspositionEntry {
                best_moves,
                score,
                depth,
                kind,
            },
        );
    }

    /// Folds another table in under the normal overwrite rule; used to merge
    /// per-worker shards back after a parallel root search.
    pub fn merge(&mut self, other: TranspositionTable) {
        for (key, entry) in other.entries {
            if let Some(existing) = self.entries.get(&key) {
                let replace = entry.depth > existing.depth
                    || (entry.depth == existing.depth
                        && entry.kind == EvaluationType::Exact
                        && existing.kind != EvaluationType::Exact);
                if !replace {
                    continue;
                }
            }
            self.entries.insert(key, entry);
        }
    }

    /// Raw entry access for the persistence layer.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&String, &TranspositionEntry)> {
        self.entries.iter()
    }

    /// Raw insertion for the persistence layer; existing entries win.
    pub(crate) fn insert_hydrated(&mut self, key: String, entry: TranspositionEntry) {
        self.entries.entry(key).or_insert(entry);
    }
}
