use super::Difficulty;

/// Requests sent from the presentation layer to the round controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundCommand {
    SetDifficulty(Difficulty),
    StartRound,
    SubmitGuess(String),
}
