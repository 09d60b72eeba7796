use crate::constants::{MAX_FIELD_LEN, MAX_PERCENT, MAX_PLAN_DAYS, MAX_SESSION_MINUTES};
use crate::error::AppError;
use crate::models::Percent;
use chrono::NaiveTime;

/// Validate time format (HH:MM, 24-hour format).
/// Returns the parsed time of day if valid.
pub fn validate_time_format(time: &str) -> Result<NaiveTime, AppError> {
    let err = |reason: &str| AppError::invalid("time", reason);

    let (hh, mm) = time
        .split_once(':')
        .ok_or_else(|| err("must be in HH:MM format"))?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hh) || !two_digits(mm) {
        return Err(err("must be in HH:MM format"));
    }

    let hours: u32 = hh.parse().map_err(|_| err("invalid hours"))?;
    let minutes: u32 = mm.parse().map_err(|_| err("invalid minutes"))?;

    if hours >= 24 {
        return Err(err("hours must be 00-23"));
    }
    if minutes >= 60 {
        return Err(err("minutes must be 00-59"));
    }

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(|| err("not a valid time of day"))
}

/// Validate a completion percentage (whole number 0-100).
pub fn validate_percent(field: &'static str, value: i64) -> Result<Percent, AppError> {
    u8::try_from(value)
        .ok()
        .and_then(Percent::new)
        .ok_or_else(|| AppError::invalid(field, format!("must be a whole number between 0 and {MAX_PERCENT}")))
}

/// Parse user-entered text as a completion percentage.
///
/// Only plain integers are accepted; "50.5" or "50%" are rejected.
pub fn parse_percent(field: &'static str, raw: &str) -> Result<Percent, AppError> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        AppError::invalid(field, format!("must be a whole number between 0 and {MAX_PERCENT}"))
    })?;
    validate_percent(field, value)
}

/// Validate a required free-text field, returning it trimmed.
pub fn validate_required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::invalid(field, "is required"));
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(AppError::invalid(
            field,
            format!("cannot exceed {MAX_FIELD_LEN} characters"),
        ));
    }
    Ok(value)
}

/// Validate an optional free-text field, returning it trimmed. Empty is allowed.
pub fn validate_optional<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.len() > MAX_FIELD_LEN {
        return Err(AppError::invalid(
            field,
            format!("cannot exceed {MAX_FIELD_LEN} characters"),
        ));
    }
    Ok(value)
}

/// Normalize an email address for storage and comparison.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = validate_required("email", email)?;
    if !email.contains('@') {
        return Err(AppError::invalid("email", "must contain '@'"));
    }
    Ok(email.to_lowercase())
}

/// Validate the number of days a plan spans.
pub fn validate_plan_days(days: u32) -> Result<u32, AppError> {
    if days == 0 {
        return Err(AppError::invalid("days", "must be positive"));
    }
    if days > MAX_PLAN_DAYS {
        return Err(AppError::invalid(
            "days",
            format!("cannot exceed {MAX_PLAN_DAYS}"),
        ));
    }
    Ok(days)
}

/// Validate the session length in minutes.
pub fn validate_session_minutes(minutes: u32) -> Result<u32, AppError> {
    if minutes == 0 {
        return Err(AppError::invalid("minutes", "must be positive"));
    }
    if minutes > MAX_SESSION_MINUTES {
        return Err(AppError::invalid(
            "minutes",
            format!("cannot exceed {MAX_SESSION_MINUTES} minutes"),
        ));
    }
    Ok(minutes)
}
