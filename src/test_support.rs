//! Helpers shared by unit tests across contexts.

use crate::task::domain::Task;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at a UTC calendar time.
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
                .single()
                .expect("valid timestamp"),
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

/// Decodes a task from backend JSON.
pub fn task_from_json(value: serde_json::Value) -> Task {
    serde_json::from_value(value).expect("task fixture decodes")
}
