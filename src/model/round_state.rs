use std::cmp::Ordering;
use std::time::Duration;

use super::{Difficulty, FeedbackKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Active,
    Ended,
}

/// Snapshot of a single round. Fields are readable everywhere; only the
/// transition methods below may change them.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub secret_number: u32,
    pub attempts: u32,
    pub remaining_seconds: u32,
    pub active: bool,
    pub difficulty: Difficulty,
    pub last_feedback: Option<FeedbackKind>,
}

impl RoundState {
    pub fn new(difficulty: Difficulty, secret_number: u32) -> Self {
        Self {
            secret_number,
            attempts: 0,
            remaining_seconds: difficulty.duration_seconds(),
            active: false,
            difficulty,
            last_feedback: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.active {
            RoundPhase::Active
        } else if self.last_feedback.is_some_and(|f| f.is_final()) {
            RoundPhase::Ended
        } else {
            RoundPhase::Idle
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs(
            self.difficulty
                .duration_seconds()
                .saturating_sub(self.remaining_seconds) as u64,
        )
    }

    pub fn feedback_message(&self) -> Option<String> {
        self.last_feedback
            .map(|f| f.message(self.secret_number, self.attempts))
    }

    pub(crate) fn reset_round(&mut self) {
        self.attempts = 0;
        self.last_feedback = None;
        self.active = false;
    }

    pub(crate) fn configure(&mut self, difficulty: Difficulty, secret_number: u32) {
        self.difficulty = difficulty;
        self.secret_number = secret_number;
        self.remaining_seconds = difficulty.duration_seconds();
        self.reset_round();
    }

    pub(crate) fn begin(&mut self, secret_number: u32) {
        self.configure(self.difficulty, secret_number);
        self.active = true;
    }

    /// Counts the attempt and records how `guess` compares to the secret.
    pub(crate) fn evaluate(&mut self, guess: i64) -> FeedbackKind {
        self.attempts = self.attempts.saturating_add(1);
        let feedback = match guess.cmp(&(self.secret_number as i64)) {
            Ordering::Less => FeedbackKind::TooLow,
            Ordering::Greater => FeedbackKind::TooHigh,
            Ordering::Equal => FeedbackKind::Correct,
        };
        if feedback == FeedbackKind::Correct {
            self.active = false;
        }
        self.last_feedback = Some(feedback);
        feedback
    }

    /// Decrements the countdown; returns true when this tick ran the clock out.
    pub(crate) fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.active = false;
            self.last_feedback = Some(FeedbackKind::TimeUp);
            return true;
        }
        false
    }
}

impl Default for RoundState {
    fn default() -> Self {
        RoundState::new(Difficulty::default(), 1)
    }
}
