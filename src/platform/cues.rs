use super::types::{ToneSpec, Waveform};
use std::time::Duration;

/// A tone plus an optional vibration, played after a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    pub tone: ToneSpec,
    pub vibration: Option<Duration>,
}

const fn cue(frequency_hz: u32, tone_ms: u64, waveform: Waveform, vibrate_ms: Option<u64>) -> Cue {
    Cue {
        tone: ToneSpec {
            frequency_hz,
            duration: Duration::from_millis(tone_ms),
            waveform,
        },
        vibration: match vibrate_ms {
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        },
    }
}

pub const DAY_COMPLETED: Cue = cue(660, 120, Waveform::Sine, Some(120));
pub const ALREADY_COMPLETED: Cue = cue(880, 50, Waveform::Triangle, None);
pub const WEEKLY_REFRESHED: Cue = cue(740, 60, Waveform::Square, None);
pub const REMINDER_FIRED: Cue = cue(980, 180, Waveform::Sine, Some(180));

/// Pitch rises with the entered percentage.
pub fn daily_updated(percent: u8) -> Cue {
    cue(520 + u32::from(percent), 70, Waveform::Sine, Some(40))
}
