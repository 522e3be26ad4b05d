//! Time source port.

use chrono::{DateTime, Utc};

/// Clock abstraction so record timestamps are testable.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
