//! One-time conversion of storage written by older builds.
//!
//! Older builds kept plaintext passwords and case-sensitive emails, one user
//! under `synergyUser`, and the streak either as a bare integer next to a
//! `lastWorkout` string or as JSON with a date like "Fri Oct 16 2026".

use super::{load_json, save_json, KeyValueStore};
use crate::account::hash_password;
use crate::constants::keys;
use crate::error::AppError;
use crate::models::{Streak, UserRecord};
use argon2::password_hash::PasswordHash;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;

const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Streak object with the date in [`LEGACY_DATE_FORMAT`].
#[derive(Deserialize)]
struct LegacyStreak {
    #[serde(default)]
    count: u32,
    #[serde(rename = "lastDate", default)]
    last_date: Option<String>,
}

/// Upgrade any legacy keys in place. Returns how many entries were converted.
pub fn upgrade<S: KeyValueStore + ?Sized>(store: &S) -> Result<usize, AppError> {
    let mut upgraded = 0;
    // Normalize the list first so the single legacy user is matched by its canonical email
    if upgrade_users(store)? {
        upgraded += 1;
    }
    if upgrade_user(store)? {
        upgraded += 1;
    }
    if upgrade_streak(store)? {
        upgraded += 1;
    }
    if upgraded > 0 {
        info!("Upgraded {upgraded} legacy storage entries");
    }
    Ok(upgraded)
}

fn parse_legacy_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), LEGACY_DATE_FORMAT).ok()
}

/// Hash plaintext passwords and lower-case emails in the `users` list.
///
/// When two records collapse to the same email the first one wins.
fn upgrade_users<S: KeyValueStore + ?Sized>(store: &S) -> Result<bool, AppError> {
    let Some(users) = load_json::<Vec<UserRecord>, _>(store, keys::USERS)? else {
        return Ok(false);
    };

    let mut changed = false;
    let mut upgraded: Vec<UserRecord> = Vec::with_capacity(users.len());
    for user in users {
        let email = user.email.trim().to_lowercase();
        if upgraded.iter().any(|u| u.email == email) {
            warn!("Dropping second account registered as {email}");
            changed = true;
            continue;
        }
        let rehashed = if PasswordHash::new(&user.password).is_ok() {
            None
        } else {
            Some(hash_password(&user.password)?)
        };
        changed |= rehashed.is_some() || email != user.email;
        upgraded.push(UserRecord {
            email,
            password: rehashed.unwrap_or(user.password),
            ..user
        });
    }

    if changed {
        save_json(store, keys::USERS, &upgraded)?;
    }
    Ok(changed)
}

fn upgrade_user<S: KeyValueStore + ?Sized>(store: &S) -> Result<bool, AppError> {
    let Some(legacy) = load_json::<UserRecord, _>(store, keys::LEGACY_USER)? else {
        return Ok(false);
    };

    let mut users: Vec<UserRecord> = load_json(store, keys::USERS)?.unwrap_or_default();
    let email = legacy.email.trim().to_lowercase();
    if users.iter().any(|u| u.email == email) {
        warn!("Legacy user {email} already present, dropping the old record");
    } else {
        users.push(UserRecord {
            email,
            password: hash_password(&legacy.password)?,
            ..legacy
        });
        save_json(store, keys::USERS, &users)?;
    }
    store.remove(keys::LEGACY_USER)?;
    Ok(true)
}

fn upgrade_streak<S: KeyValueStore + ?Sized>(store: &S) -> Result<bool, AppError> {
    let Some(raw) = store.get(keys::STREAK)? else {
        return Ok(false);
    };
    let raw = raw.trim();

    if let Ok(count) = raw.parse::<u32>() {
        let last_date = store
            .get(keys::LEGACY_LAST_WORKOUT)?
            .and_then(|s| parse_legacy_date(&s));
        save_json(store, keys::STREAK, &Streak::new(count, last_date))?;
        store.remove(keys::LEGACY_LAST_WORKOUT)?;
        return Ok(true);
    }

    if serde_json::from_str::<Streak>(raw).is_ok() {
        return Ok(false);
    }
    let Ok(legacy) = serde_json::from_str::<LegacyStreak>(raw) else {
        return Ok(false);
    };
    let last_date = legacy.last_date.as_deref().and_then(|date| {
        let parsed = parse_legacy_date(date);
        if parsed.is_none() {
            warn!("Unreadable streak date {date:?}, keeping the count only");
        }
        parsed
    });
    save_json(store, keys::STREAK, &Streak::new(legacy.count, last_date))?;
    Ok(true)
}
