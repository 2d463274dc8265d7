use std::time::{Duration, Instant};

/// How long a toast stays visible unless configured otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Transient notification slot.
///
/// Holds at most one toast and exactly one pending deadline. Showing a new
/// toast replaces both, so an earlier deadline can never clear a later
/// message.
#[derive(Debug)]
pub struct Notifier {
    current: Option<(Toast, Instant)>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.show_at(message, kind, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let toast = Toast {
            message: message.into(),
            kind,
        };
        self.current = Some((toast, now + self.duration));
    }

    /// Clear the toast if its deadline has passed. Returns true if it was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.current {
            Some((_, deadline)) if now >= deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(toast, _)| toast)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.show_at("saved", ToastKind::Success, start);

        assert!(!notifier.expire(start + Duration::from_millis(2999)));
        assert_eq!(notifier.current().unwrap().message, "saved");

        assert!(notifier.expire(start + Duration::from_secs(3)));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_newer_toast_survives_older_deadline() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_secs(3));
        notifier.show_at("first", ToastKind::Info, start);
        notifier.show_at("second", ToastKind::Error, start + Duration::from_secs(2));

        // The first toast's deadline has passed, the second's has not.
        assert!(!notifier.expire(start + Duration::from_secs(4)));
        let toast = notifier.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);

        assert!(notifier.expire(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_expire_on_empty_is_noop() {
        let mut notifier = Notifier::default();
        assert!(!notifier.expire(Instant::now()));
    }
}
