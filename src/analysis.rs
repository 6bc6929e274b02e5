use itertools::Itertools;

use crate::game::prelude::*;

/// Aggregate outcome statistics over a batch of completed games, from the
/// starting (first) player's point of view.
pub fn analyze_games(games: &[Game]) {
    let outcomes = [
        ("Starting player wins", GameResult::Win),
        ("Second player wins", GameResult::Loss),
        ("Draws", GameResult::Draw),
    ];

    println!("Total games: {}.", games.len());
    for (label, outcome) in outcomes {
        let matching = games
            .iter()
            .filter(|game| game.result == Some(outcome))
            .collect_vec();
        println!(
            "{label}: {}. Average turns: {:.2}.",
            matching.len(),
            average_turns(&matching)
        );
    }
}

fn average_turns(games: &[&Game]) -> f64 {
    if games.is_empty() {
        return 0.0;
    }
    games.iter().map(|game| game.turns as f64).sum::<f64>() / games.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batches_do_not_divide_by_zero() {
        analyze_games(&[]);
        assert_eq!(average_turns(&[]), 0.0);
    }
}
