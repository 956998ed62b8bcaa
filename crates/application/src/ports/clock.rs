//! Clock port

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Demo-mode record ids are derived from it, so tests pin it to a fixed
/// instant.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
