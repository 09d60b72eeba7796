pub mod cues;
pub mod fake;
pub mod system;
pub mod types;

pub use cues::Cue;
pub use fake::{FixedClock, RecordingFeedback, RecordingNotifier};
pub use system::{LogNotifier, LogTone, NoopHaptics, NoopTone, SystemClock};
pub use types::{Clock, Haptics, Notifier, Permission, Tone, ToneSpec, Waveform};

use std::sync::Arc;

/// Host facilities injected into the tracker and the reminder scheduler.
#[derive(Clone)]
pub struct Host {
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
    pub haptics: Arc<dyn Haptics>,
    pub tone: Arc<dyn Tone>,
}

impl Host {
    /// Local wall clock, log-backed notifications and tones, no vibration.
    pub fn system() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            notifier: Arc::new(LogNotifier),
            haptics: Arc::new(NoopHaptics),
            tone: Arc::new(LogTone),
        }
    }

    /// Given clock and notifier, silent feedback.
    pub fn quiet(clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            clock,
            notifier,
            haptics: Arc::new(NoopHaptics),
            tone: Arc::new(NoopTone),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Play a cue. Never fails; missing facilities are no-ops.
    pub fn play(&self, cue: Cue) {
        self.tone.beep(cue.tone);
        if let Some(duration) = cue.vibration {
            self.haptics.vibrate(duration);
        }
    }
}
