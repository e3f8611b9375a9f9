//! Shared helpers for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use taskboard::{
    session::{
        SessionHandle,
        domain::{AuthToken, Role, Session, UserProfile},
    },
    task::domain::UserId,
};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that applies scoped environment variable updates.
///
/// Guards are serialised through a global mutex and restore the previous
/// values on drop.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets (`Some`) or removes (`None`) each variable for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push((OsString::from(key), env::var_os(key)));
            unsafe {
                // SAFETY: the global mutex serialises environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serialises environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error when `timestamp` is not valid RFC 3339.
    pub fn parse(timestamp: &str) -> Result<Self, eyre::Report> {
        let at = DateTime::parse_from_rfc3339(timestamp)?;
        Ok(Self(at.with_timezone(&Utc)))
    }

    /// Freezes the clock at noon UTC on 10 March 2025.
    #[must_use]
    pub fn reference() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a user profile with a fixed email derived from the id.
///
/// # Errors
///
/// Returns an error when `id` is blank.
pub fn profile(id: &str, name: &str, role: Role) -> Result<UserProfile, eyre::Report> {
    Ok(UserProfile::new(
        UserId::new(id)?,
        name,
        format!("{id}@example.com"),
        role,
    ))
}

/// Returns a handle holding a session for `user`.
///
/// # Errors
///
/// Returns an error when the token cannot be built.
pub fn signed_in(user: UserProfile) -> Result<SessionHandle, eyre::Report> {
    let token = AuthToken::new(format!("token-{}", user.id))?;
    Ok(SessionHandle::with_session(Session::new(user, token, None)))
}
