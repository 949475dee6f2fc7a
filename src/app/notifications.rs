//! Transient user-facing notifications.
//!
//! Only one notification is on screen at a time. A new request hides the
//! current one immediately and is revealed after a short gap, so the host can
//! show a visible hide/show cycle instead of swapping text in place.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notification {
    pub message: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    current: Notification,
    queued: Option<String>,
    ticket: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Notification {
        &self.current
    }

    /// Hides whatever is showing and queues `message`; returns its ticket
    ///
    /// A later request supersedes this one if it arrives before the reveal.
    pub fn request(&mut self, message: impl Into<String>) -> u64 {
        self.current.visible = false;
        self.queued = Some(message.into());
        self.ticket += 1;
        self.ticket
    }

    /// Shows the message queued under `ticket`; returns whether it was shown
    pub fn reveal(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket {
            return false;
        }

        match self.queued.take() {
            Some(message) => {
                self.current = Notification {
                    message,
                    visible: true,
                };
                true
            }
            None => false,
        }
    }

    /// Hides the notification revealed under `ticket`, if it is still current
    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.queued.is_some() || !self.current.visible {
            return false;
        }
        self.current.visible = false;
        true
    }

    pub fn dismiss(&mut self) {
        self.current.visible = false;
    }
}
