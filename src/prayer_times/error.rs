use thiserror::Error;

use crate::countdown::CountdownError;

/// Errors from fetching or ingesting a calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Calendar request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar API returned code {code}: {message}")]
    Api { code: u16, message: String },

    #[error("Calendar response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Calendar contains no days")]
    Empty,

    /// Record at `position` is not for day `position + 1` of the month.
    #[error("Calendar entry {position} is dated day {day} of the month")]
    DayIndexMismatch { position: usize, day: u32 },

    #[error("Bad timing on {date}: {source}")]
    BadTiming {
        date: String,
        #[source]
        source: CountdownError,
    },
}
