#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    TooLow,
    TooHigh,
    Correct,
    TimeUp,
}

impl FeedbackKind {
    /// Feedback that terminates the round.
    pub fn is_final(&self) -> bool {
        matches!(self, FeedbackKind::Correct | FeedbackKind::TimeUp)
    }

    pub fn message(&self, secret_number: u32, attempts: u32) -> String {
        match self {
            FeedbackKind::TooLow => "Too low! Try again.".to_string(),
            FeedbackKind::TooHigh => "Too high! Try again.".to_string(),
            FeedbackKind::Correct => {
                let noun = if attempts == 1 { "attempt" } else { "attempts" };
                format!("Correct! You got it in {} {}.", attempts, noun)
            }
            FeedbackKind::TimeUp => format!("Time's up! The number was {}.", secret_number),
        }
    }
}
