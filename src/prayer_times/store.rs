use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::info;
use rusqlite::Connection;

use super::api::CalendarSource;
use super::calendar::{MonthCalendar, RamadanCalendar};
use crate::db::repository::{CalendarRepo, RamadanRepo};
use crate::models::{City, HijriDate};

/// Serves calendars for one city, from the local cache when possible.
pub struct CalendarStore<'a, S: CalendarSource> {
    conn: &'a Connection,
    source: S,
    city: City,
}

impl<'a, S: CalendarSource> CalendarStore<'a, S> {
    pub fn new(conn: &'a Connection, source: S, city: City) -> Self {
        Self { conn, source, city }
    }

    pub fn city(&self) -> City {
        self.city
    }

    /// The Gregorian month containing `today`. Cached per (city, date), so a
    /// new day or a new city triggers exactly one fetch.
    pub fn month_for(&self, today: NaiveDate) -> Result<MonthCalendar> {
        self.month(today, true)
    }

    /// Like `month_for`, but a fetched month is not written back. Used for
    /// one-off lookups at an arbitrary date so today's cache stays intact.
    pub fn month_uncached(&self, date: NaiveDate) -> Result<MonthCalendar> {
        self.month(date, false)
    }

    fn month(&self, date: NaiveDate, write_back: bool) -> Result<MonthCalendar> {
        let key = date.format("%Y-%m-%d").to_string();
        let city = self.city.name;

        if let Some(days) = CalendarRepo::get_month(self.conn, city, &key)? {
            match MonthCalendar::from_days(days) {
                Ok(calendar) => {
                    info!("Using cached calendar for {} ({})", city, key);
                    return Ok(calendar);
                }
                Err(e) => log::warn!("Ignoring cached calendar for {}: {}", city, e),
            }
        }

        let days = self
            .source
            .fetch_month(city, date.year(), date.month())
            .with_context(|| format!("Fetching {} calendar for {}", city, key))?;
        let calendar = MonthCalendar::from_days(days)
            .with_context(|| format!("Validating {} calendar for {}", city, key))?;

        if write_back {
            CalendarRepo::store_month(self.conn, city, &key, calendar.days())?;
        }
        Ok(calendar)
    }

    /// All days of Ramadan in `hijri_year`.
    pub fn ramadan(&self, hijri_year: u32) -> Result<RamadanCalendar> {
        if let Some(days) = RamadanRepo::get(self.conn, self.city.name, hijri_year)? {
            if let Ok(calendar) = RamadanCalendar::from_days(hijri_year, days) {
                if !calendar.is_empty() {
                    return Ok(calendar);
                }
            }
        }

        let days = self
            .source
            .fetch_hijri_month(self.city.name, hijri_year, HijriDate::RAMADAN)
            .with_context(|| {
                format!("Fetching Ramadan {} calendar for {}", hijri_year, self.city.name)
            })?;
        let calendar = RamadanCalendar::from_days(hijri_year, days)?;

        if !calendar.is_empty() {
            RamadanRepo::store(self.conn, self.city.name, hijri_year, &calendar.days)?;
        }
        Ok(calendar)
    }

    /// Forget everything cached for this city.
    pub fn clear(&self) -> Result<()> {
        let months = CalendarRepo::clear_city(self.conn, self.city.name)?;
        let ramadans = RamadanRepo::clear_city(self.conn, self.city.name)?;
        info!(
            "Cleared {} month and {} Ramadan entries for {}",
            months, ramadans, self.city.name
        );
        Ok(())
    }
}
