//! Transient status message shown after each command.

use std::time::{Duration, Instant};

/// How long a status message stays visible by default.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(2000);

/// Single self-clearing message slot.
///
/// Posting replaces whatever is pending and restarts the expiry timer.
#[derive(Debug, Clone)]
pub struct StatusLine {
    ttl: Duration,
    pending: Option<(String, Instant)>,
}

impl StatusLine {
    /// Empty status line whose messages live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, pending: None }
    }

    /// Lifetime of a posted message.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Post `text` as of `now`.
    pub fn post_at(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// Message still visible at `now`, if any.
    pub fn current_at(&self, now: Instant) -> Option<&str> {
        match &self.pending {
            Some((text, posted)) if now.saturating_duration_since(*posted) < self.ttl => {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    /// Forget expired messages.
    pub fn prune(&mut self, now: Instant) {
        if self.current_at(now).is_none() {
            self.pending = None;
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_ttl() {
        let mut status = StatusLine::new(Duration::from_millis(100));
        let t0 = Instant::now();
        status.post_at("Project saved", t0);
        assert_eq!(status.current_at(t0), Some("Project saved"));
        assert_eq!(
            status.current_at(t0 + Duration::from_millis(99)),
            Some("Project saved")
        );
        assert_eq!(status.current_at(t0 + Duration::from_millis(100)), None);
    }

    #[test]
    fn new_message_replaces_and_restarts_timer() {
        let mut status = StatusLine::new(Duration::from_millis(100));
        let t0 = Instant::now();
        status.post_at("first", t0);
        let t1 = t0 + Duration::from_millis(80);
        status.post_at("second", t1);
        assert_eq!(
            status.current_at(t0 + Duration::from_millis(150)),
            Some("second")
        );
        assert_eq!(status.current_at(t1 + Duration::from_millis(100)), None);
    }

    #[test]
    fn prune_drops_stale_message() {
        let mut status = StatusLine::new(Duration::from_millis(10));
        let t0 = Instant::now();
        status.post_at("gone soon", t0);
        status.prune(t0 + Duration::from_millis(20));
        assert_eq!(status.current_at(t0), None);
    }
}
