use crate::constants::keys;
use crate::error::AppError;
use crate::models::ReminderTime;
use crate::platform::{cues, Host, Permission};
use crate::safe_lock;
use crate::store::{load_parsed, KeyValueStore};
use chrono::NaiveDateTime;
use log::{error, info, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const REMINDER_TITLE: &str = "SYNERGY: Workout Reminder";
pub const REMINDER_BODY: &str = "Time for your workout! Mark your progress & keep the streak alive";

/// Result of saving a reminder from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderOutcome {
    pub permission: Permission,
    /// Set when the timer was armed.
    pub next_fire: Option<NaiveDateTime>,
}

struct PendingReminder {
    time: ReminderTime,
    next_fire: Arc<Mutex<NaiveDateTime>>,
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

impl PendingReminder {
    fn stop(self) {
        let PendingReminder {
            time, cancel, handle, ..
        } = self;
        // Dropping the sender wakes the worker immediately
        drop(cancel);
        if handle.join().is_err() {
            warn!("Reminder worker for {time} panicked");
        }
    }
}

/// Daily reminder with at most one armed timer.
pub struct ReminderScheduler {
    store: Arc<dyn KeyValueStore>,
    host: Host,
    pending: Mutex<Option<PendingReminder>>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<dyn KeyValueStore>, host: Host) -> Self {
        Self {
            store,
            host,
            pending: Mutex::new(None),
        }
    }

    /// Arm the daily timer for `time` (`HH:MM`), replacing any armed one.
    ///
    /// Returns the first fire time.
    pub fn schedule(&self, time: &str) -> Result<NaiveDateTime, AppError> {
        if !self.host.notifier.permission().is_granted() {
            warn!("Reminder not armed: notification permission not granted");
            return Err(AppError::PermissionDenied);
        }
        let time: ReminderTime = time.parse()?;
        self.arm(time)
    }

    fn arm(&self, time: ReminderTime) -> Result<NaiveDateTime, AppError> {
        let now = self.host.clock.now();
        let first = time
            .next_occurrence(now)
            .ok_or_else(|| AppError::Internal(format!("no next occurrence of {time} after {now}")))?;

        let mut pending = safe_lock(&self.pending, "ReminderScheduler");
        if let Some(previous) = pending.take() {
            info!("Replacing reminder at {}", previous.time);
            previous.stop();
        }

        let (cancel, cancelled) = mpsc::channel();
        let next_fire = Arc::new(Mutex::new(first));
        let worker_next_fire = Arc::clone(&next_fire);
        let host = self.host.clone();
        let handle = thread::spawn(move || run_timer(&host, time, &worker_next_fire, &cancelled));

        *pending = Some(PendingReminder {
            time,
            next_fire,
            cancel,
            handle,
        });
        info!("Reminder scheduled at {time}, first at {first}");
        Ok(first)
    }

    /// Save the reminder time, asking for permission if needed, and arm it when allowed.
    pub fn set_reminder(&self, time: &str) -> Result<ReminderOutcome, AppError> {
        let time: ReminderTime = time.parse()?;
        self.store.set(keys::REMINDER, &time.to_string())?;

        let mut permission = self.host.notifier.permission();
        if !permission.is_granted() {
            permission = self.host.notifier.request_permission();
            info!("Notification permission: {}", permission.as_str());
        }

        let next_fire = if permission.is_granted() {
            Some(self.arm(time)?)
        } else {
            None
        };
        Ok(ReminderOutcome {
            permission,
            next_fire,
        })
    }

    pub fn saved_time(&self) -> Result<Option<ReminderTime>, AppError> {
        load_parsed(self.store.as_ref(), keys::REMINDER)
    }

    /// Re-arm the saved reminder on start. Never prompts for permission.
    pub fn restore(&self) -> Result<Option<NaiveDateTime>, AppError> {
        let Some(time) = self.saved_time()? else {
            return Ok(None);
        };
        if !self.host.notifier.permission().is_granted() {
            info!("Saved reminder at {time} left unarmed: no permission");
            return Ok(None);
        }
        self.arm(time).map(Some)
    }

    /// Disarm the pending timer. Returns false when nothing was armed.
    pub fn cancel(&self) -> bool {
        let previous = safe_lock(&self.pending, "ReminderScheduler").take();
        match previous {
            Some(pending) => {
                info!("Reminder at {} cancelled", pending.time);
                pending.stop();
                true
            }
            None => false,
        }
    }

    pub fn next_fire_at(&self) -> Option<NaiveDateTime> {
        safe_lock(&self.pending, "ReminderScheduler")
            .as_ref()
            .map(|p| *safe_lock(&p.next_fire, "ReminderScheduler"))
    }

    pub fn armed_time(&self) -> Option<ReminderTime> {
        safe_lock(&self.pending, "ReminderScheduler")
            .as_ref()
            .map(|p| p.time)
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Wait for the next fire time, notify, re-arm for the following day.
/// Exits as soon as the cancel channel closes.
fn run_timer(
    host: &Host,
    time: ReminderTime,
    next_fire: &Mutex<NaiveDateTime>,
    cancelled: &Receiver<()>,
) {
    loop {
        let fire_at = *safe_lock(next_fire, "ReminderScheduler");
        let delay = (fire_at - host.clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        match cancelled.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }

        host.notifier.notify(REMINDER_TITLE, REMINDER_BODY);
        host.play(cues::REMINDER_FIRED);
        info!("Reminder at {time} delivered");

        // Never re-fire the same occurrence if the clock lags the timer.
        let after = host.clock.now().max(fire_at);
        let Some(next) = time.next_occurrence(after) else {
            error!("Reminder at {time} cannot be re-armed after {after}");
            return;
        };
        *safe_lock(next_fire, "ReminderScheduler") = next;
    }
}
