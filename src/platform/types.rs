use chrono::{NaiveDate, NaiveDateTime};
use std::time::Duration;

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Notification permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not asked yet.
    Prompt,
}

impl Permission {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "default",
        }
    }
}

pub trait Notifier: Send + Sync {
    fn permission(&self) -> Permission;

    /// Ask the host for permission. Returns the resulting state.
    fn request_permission(&self) -> Permission;

    fn notify(&self, title: &str, body: &str);
}

/// Vibration facility. Best-effort: implementations ignore what they can't do.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneSpec {
    pub frequency_hz: u32,
    pub duration: Duration,
    pub waveform: Waveform,
}

/// Short audio cue facility. Best-effort, like [`Haptics`].
pub trait Tone: Send + Sync {
    fn beep(&self, tone: ToneSpec);
}
