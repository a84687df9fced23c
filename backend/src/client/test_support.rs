//! Fixtures shared by the client tests.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{User, UserDraft, UserId};

pub(crate) fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, minute, second)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn user(id: i32, name: &str, email: &str) -> User {
    let created = at(1, 9, 0, 0);
    User::new(
        UserId::new(id),
        UserDraft::try_from_parts(Some(name), Some(email)).expect("valid draft"),
        created,
        created,
    )
}

/// Clock that only moves when told to.
pub(crate) struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub(crate) fn advance_millis(&self, millis: i64) {
        *self.lock_clock() += TimeDelta::milliseconds(millis);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().expect("clock mutex")
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
