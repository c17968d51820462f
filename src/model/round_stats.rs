use std::time::Duration;
use uuid::Uuid;

use super::Difficulty;

/// Outcome of one finished round.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStats {
    pub round_id: Uuid,
    pub difficulty: Difficulty,
    pub attempts: u32,
    pub elapsed: Duration,
    pub won: bool,
}

impl RoundStats {
    pub fn new(
        round_id: Uuid,
        difficulty: Difficulty,
        attempts: u32,
        elapsed: Duration,
        won: bool,
    ) -> Self {
        Self {
            round_id,
            difficulty,
            attempts,
            elapsed,
            won,
        }
    }
}
