pub mod countdown;
pub mod notification_sink;
pub mod number_source;
pub mod round_controller;
pub mod round_error;
pub mod session_stats;
pub mod settings;

pub use countdown::{Countdown, CountdownScheduler, GlibScheduler, ScheduledTask, TickControl};
pub use notification_sink::{NotificationSink, NullNotificationSink};
pub use number_source::{NumberSource, RandomNumberSource};
pub use round_controller::RoundController;
pub use round_error::{NotificationError, RoundError, SettingsError};
pub use session_stats::{DifficultyTally, SessionStats};
pub use settings::Settings;
