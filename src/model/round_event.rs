use super::{Notification, RoundState, RoundStats};

#[derive(Debug, Clone)]
pub enum RoundEvent {
    StateChanged(RoundState),
    Notified(Notification),
    RoundFinished {
        stats: RoundStats,
        session_summary: String,
    },
}
