use clap::{Parser, ValueEnum};

use crate::search::TreeSearchStrategy;
use crate::strategy::{HumanInputStrategy, RandomStrategy, Strategy};

/// Which placement policy a seat uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    Random,
    TreeSearch,
    Human,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyKind::Random => "random",
            StrategyKind::TreeSearch => "tree-search",
            StrategyKind::Human => "human",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, Parser)]
pub struct DriverOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Number of games to play back to back.
    #[arg(short, long, default_value_t = 1)]
    pub games: usize,

    /// Placement policy for player 1.
    #[arg(long, value_enum, default_value_t = StrategyKind::TreeSearch)]
    pub player_1: StrategyKind,

    /// Placement policy for player 2.
    #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
    pub player_2: StrategyKind,

    /// Search depth, in rounds, for the tree-search strategy.
    #[arg(short, long, default_value_t = 2)]
    pub depth: u8,

    /// Fan the root search out over a worker pool.
    #[arg(short, long, default_value_t = false)]
    pub multiprocessing: bool,

    /// Load persisted evaluations before the first search.
    #[arg(long, default_value_t = false)]
    pub hydrate: bool,

    /// Flush exact evaluations to the persistence backend after the run.
    #[arg(long, default_value_t = false)]
    pub persist: bool,
}

impl DriverOptions {
    /// Builds the configured strategy for one seat.
    pub fn build_strategy(&self, kind: StrategyKind) -> Box<dyn Strategy> {
        match kind {
            StrategyKind::Random => Box::new(RandomStrategy),
            StrategyKind::Human => Box::new(HumanInputStrategy),
            StrategyKind::TreeSearch => {
                let mut strategy =
                    TreeSearchStrategy::new(self.depth).with_multiprocessing(self.multiprocessing);
                if self.hydrate {
                    strategy.hydrate();
                }
                Box::new(strategy)
            }
        }
    }
}
