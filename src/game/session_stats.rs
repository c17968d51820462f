use crate::model::{Difficulty, RoundStats};
use itertools::Itertools;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DifficultyTally {
    pub rounds_played: u32,
    pub rounds_won: u32,
    pub total_attempts: u32,
    pub best_attempts: Option<u32>,
    pub total_time_played: Duration,
}

/// In-memory tallies for the current session; discarded at exit.
#[derive(Debug, Default)]
pub struct SessionStats {
    tallies: HashMap<Difficulty, DifficultyTally>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_round(&mut self, stats: &RoundStats) {
        let tally = self.tallies.entry(stats.difficulty).or_default();
        tally.rounds_played += 1;
        tally.total_attempts = tally.total_attempts.saturating_add(stats.attempts);
        tally.total_time_played += stats.elapsed;
        if stats.won {
            tally.rounds_won += 1;
            tally.best_attempts = Some(match tally.best_attempts {
                Some(best) => best.min(stats.attempts),
                None => stats.attempts,
            });
        }
    }

    pub fn tally(&self, difficulty: Difficulty) -> DifficultyTally {
        self.tallies.get(&difficulty).cloned().unwrap_or_default()
    }

    pub fn rounds_played(&self) -> u32 {
        self.tallies.values().map(|t| t.rounds_played).sum()
    }

    /// One-line summary, e.g. `Easy 2/3 (best 2) · Hard 0/1`.
    pub fn summary(&self) -> String {
        if self.rounds_played() == 0 {
            return "No rounds played yet".to_string();
        }
        Difficulty::all()
            .into_iter()
            .filter_map(|difficulty| {
                let tally = self.tallies.get(&difficulty)?;
                let best = tally
                    .best_attempts
                    .map(|b| format!(" (best {})", b))
                    .unwrap_or_default();
                Some(format!(
                    "{} {}/{}{}",
                    difficulty, tally.rounds_won, tally.rounds_played, best
                ))
            })
            .join(" · ")
    }
}
