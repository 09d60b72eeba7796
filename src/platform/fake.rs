//! Deterministic host doubles for tests and embedding.

use super::{Clock, Haptics, Notifier, Permission, Tone, ToneSpec};
use crate::safe_lock;
use chrono::{NaiveDateTime, TimeDelta};
use std::sync::Mutex;
use std::time::Duration;

/// Clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = safe_lock(&self.now, "FixedClock");
        if let Some(next) = now.checked_add_signed(by) {
            *now = next;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *safe_lock(&self.now, "FixedClock")
    }
}

/// Notifier that keeps every notification it was asked to show.
pub struct RecordingNotifier {
    permission: Mutex<Permission>,
    on_request: Permission,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Permission already granted.
    pub fn granted() -> Self {
        Self::with_permission(Permission::Granted, Permission::Granted)
    }

    /// Starts at `permission`; a request moves it to `on_request`.
    pub fn with_permission(permission: Permission, on_request: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
            on_request,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        safe_lock(&self.sent, "RecordingNotifier").clone()
    }

    pub fn count(&self) -> usize {
        safe_lock(&self.sent, "RecordingNotifier").len()
    }
}

impl Notifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        *safe_lock(&self.permission, "RecordingNotifier")
    }

    fn request_permission(&self) -> Permission {
        let mut permission = safe_lock(&self.permission, "RecordingNotifier");
        if *permission == Permission::Prompt {
            *permission = self.on_request;
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) {
        safe_lock(&self.sent, "RecordingNotifier").push((title.to_string(), body.to_string()));
    }
}

/// Keeps every cue it receives.
#[derive(Default)]
pub struct RecordingFeedback {
    tones: Mutex<Vec<ToneSpec>>,
    vibrations: Mutex<Vec<Duration>>,
}

impl RecordingFeedback {
    pub fn tones(&self) -> Vec<ToneSpec> {
        safe_lock(&self.tones, "RecordingFeedback").clone()
    }

    pub fn vibrations(&self) -> Vec<Duration> {
        safe_lock(&self.vibrations, "RecordingFeedback").clone()
    }
}

impl Tone for RecordingFeedback {
    fn beep(&self, tone: ToneSpec) {
        safe_lock(&self.tones, "RecordingFeedback").push(tone);
    }
}

impl Haptics for RecordingFeedback {
    fn vibrate(&self, duration: Duration) {
        safe_lock(&self.vibrations, "RecordingFeedback").push(duration);
    }
}
