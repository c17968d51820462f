/// Discrete game events handed to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    RoundStarted,
    TooLow,
    TooHigh,
    Correct,
    TimeUp { secret_number: u32 },
}

impl Notification {
    /// Confirmation-style feedback (as opposed to an error cue).
    pub fn is_positive(&self) -> bool {
        matches!(self, Notification::RoundStarted | Notification::Correct)
    }
}
