use thiserror::Error;

/// Failures local to a single countdown evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// The calendar has no record for today's position.
    #[error("No calendar data for day index {day_index}")]
    MissingDayData { day_index: usize },

    /// A timing string did not start with a valid `HH:MM`.
    #[error("Malformed time string '{raw}' (expected HH:MM)")]
    MalformedTime { raw: String },
}

impl CountdownError {
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedTime { raw: raw.into() }
    }
}
