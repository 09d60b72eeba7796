use crate::constants::{DEGREES_PER_PERCENT, MAX_PERCENT};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A whole-number completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_PERCENT).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| AppError::invalid("percent", format!("{value} exceeds {MAX_PERCENT}")))
    }
}

impl From<Percent> for u8 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Weekday keys of the weekly insights mapping, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    pub const ALL: [Self; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }
}

impl From<chrono::Weekday> for DayKey {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

/// Per-weekday completion mapping, stored as `{"mon": 40, "tue": 90, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyInsights(BTreeMap<DayKey, Percent>);

impl WeeklyInsights {
    pub fn set(&mut self, day: DayKey, value: Percent) {
        self.0.insert(day, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, Percent)> + '_ {
        self.0.iter().map(|(day, value)| (*day, *value))
    }

    /// Arithmetic mean over the days present, rounded half up.
    pub fn average(&self) -> Option<Percent> {
        let count = u32::try_from(self.0.len()).ok().filter(|c| *c > 0)?;
        let total: u32 = self.0.values().map(|p| u32::from(p.value())).sum();
        let rounded = (2 * total + count) / (2 * count);
        u8::try_from(rounded).ok().and_then(Percent::new)
    }
}

impl FromIterator<(DayKey, Percent)> for WeeklyInsights {
    fn from_iter<I: IntoIterator<Item = (DayKey, Percent)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Weekly view: the mapping (when stored) and its mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySummary {
    pub insights: Option<WeeklyInsights>,
    pub average: Percent,
}

/// Geometry of a circular gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeReading {
    /// Sweep angle in degrees, `0.0..=360.0`.
    pub degrees: f64,
    pub label: String,
}

impl GaugeReading {
    /// Map a percentage onto the gauge. Out-of-range values are clamped
    /// before conversion; the label keeps the value as given.
    pub fn for_percent(value: i64) -> Self {
        let clamped = value.clamp(0, i64::from(MAX_PERCENT));
        let clamped = u8::try_from(clamped).unwrap_or(MAX_PERCENT);
        Self {
            degrees: f64::from(clamped) * DEGREES_PER_PERCENT,
            label: format!("{value}%"),
        }
    }
}
