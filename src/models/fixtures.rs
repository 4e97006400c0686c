//! Calendar records for tests.

use super::day::{DayDate, GregorianDate, HijriDate, MonthRef, WeekdayRef};
use super::{DayRecord, Timings};

pub fn day(year: i32, month: u32, day: u32, fajr: &str, maghrib: &str) -> DayRecord {
    DayRecord {
        timings: Timings {
            fajr: fajr.to_string(),
            sunrise: "06:26 (+06)".to_string(),
            dhuhr: "12:13 (+06)".to_string(),
            asr: "15:30 (+06)".to_string(),
            maghrib: maghrib.to_string(),
            isha: "19:17 (+06)".to_string(),
        },
        date: DayDate {
            gregorian: GregorianDate {
                date: format!("{:02}-{:02}-{}", day, month, year),
                day,
                month: MonthRef { number: month, en: String::new() },
                year,
                weekday: WeekdayRef::default(),
            },
            hijri: HijriDate {
                day: (day + 10).min(30),
                month: MonthRef { number: 9, en: "Ramaḍān".to_string() },
                year: 1447,
            },
        },
    }
}

/// A full month with Sehar at 05:12 and Iftar at 18:03 every day.
pub fn month(year: i32, month: u32, days: u32) -> Vec<DayRecord> {
    (1..=days)
        .map(|d| day(year, month, d, "05:12 (+06)", "18:03 (+06)"))
        .collect()
}
