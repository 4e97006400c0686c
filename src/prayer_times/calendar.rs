use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use super::CalendarError;
use crate::countdown::time::parse_hh_mm;
use crate::models::{DayRecord, PrayerType};

/// Every timing of every day must parse, so bad data fails here rather than mid-countdown.
pub fn validate_timings(days: &[DayRecord]) -> Result<(), CalendarError> {
    for day in days {
        for prayer in PrayerType::all() {
            parse_hh_mm(day.timings.get(prayer)).map_err(|source| CalendarError::BadTiming {
                date: day.date.gregorian.date.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

/// One Gregorian month of day records, position `i` holding day `i + 1`.
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    days: Arc<[DayRecord]>,
}

impl MonthCalendar {
    pub fn from_days(days: Vec<DayRecord>) -> Result<Self, CalendarError> {
        if days.is_empty() {
            return Err(CalendarError::Empty);
        }
        for (position, day) in days.iter().enumerate() {
            if day.day_index() != Some(position) {
                return Err(CalendarError::DayIndexMismatch {
                    position,
                    day: day.date.gregorian.day,
                });
            }
        }
        validate_timings(&days)?;
        Ok(Self { days: days.into() })
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Cheap shared handle for the ticker thread.
    pub fn shared(&self) -> Arc<[DayRecord]> {
        Arc::clone(&self.days)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(date.day0() as usize)
    }
}

/// The days of Hijri month 9, in order.
#[derive(Debug, Clone)]
pub struct RamadanCalendar {
    pub hijri_year: u32,
    pub days: Vec<DayRecord>,
}

impl RamadanCalendar {
    pub fn from_days(hijri_year: u32, days: Vec<DayRecord>) -> Result<Self, CalendarError> {
        let days: Vec<DayRecord> = days.into_iter().filter(|d| d.hijri().is_ramadan()).collect();
        validate_timings(&days)?;
        Ok(Self { hijri_year, days })
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Position of `date` within Ramadan, if it falls inside.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.days
            .iter()
            .position(|d| d.date.gregorian.to_naive() == Some(date))
    }
}
