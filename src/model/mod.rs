mod difficulty;
mod feedback;
mod notification;
mod round_command;
mod round_event;
mod round_state;
mod round_stats;

pub use difficulty::Difficulty;
pub use feedback::FeedbackKind;
pub use notification::Notification;
pub use round_command::RoundCommand;
pub use round_event::RoundEvent;
pub use round_state::{RoundPhase, RoundState};
pub use round_stats::RoundStats;
