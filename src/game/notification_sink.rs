use crate::game::round_error::NotificationError;
use crate::model::Notification;

/// Receives round notifications (sounds, flashes). Implementations must return
/// promptly; failures are reported back and otherwise ignored.
pub trait NotificationSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Sink used when feedback sounds are switched off.
#[derive(Debug, Default)]
pub struct NullNotificationSink;

impl NotificationSink for NullNotificationSink {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        log::trace!(target: "notifications", "Discarding {:?}", notification);
        Ok(())
    }
}
