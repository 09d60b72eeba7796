use super::{Clock, Haptics, Notifier, Permission, Tone, ToneSpec};
use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use std::time::Duration;

/// Wall clock in the local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Delivers notifications through the log. Always permitted.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn notify(&self, title: &str, body: &str) {
        info!("{title}: {body}");
    }
}

/// Records cues at debug level instead of playing them.
pub struct LogTone;

impl Tone for LogTone {
    fn beep(&self, tone: ToneSpec) {
        debug!(
            "beep {} Hz for {} ms ({:?})",
            tone.frequency_hz,
            tone.duration.as_millis(),
            tone.waveform
        );
    }
}

/// Terminals and servers have nothing to vibrate.
pub struct NoopHaptics;

impl Haptics for NoopHaptics {
    fn vibrate(&self, _duration: Duration) {}
}

pub struct NoopTone;

impl Tone for NoopTone {
    fn beep(&self, _tone: ToneSpec) {}
}
