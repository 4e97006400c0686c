use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::PrayerType;

/// The API sends most numeric date parts as strings ("05", "1447").
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Deserialize<'de>,
    T::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Num(T),
        Str(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse::<T>().map_err(serde::de::Error::custom),
    }
}

/// Raw `HH:MM (TZ)` strings, as delivered for the requested city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timings {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl Timings {
    pub fn get(&self, prayer: PrayerType) -> &str {
        match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Sunrise => &self.sunrise,
            PrayerType::Dhuhr => &self.dhuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        }
    }

    /// Sehar ends at Fajr.
    pub fn sehar(&self) -> &str {
        &self.fajr
    }

    /// Iftar starts at Maghrib.
    pub fn iftar(&self) -> &str {
        &self.maghrib
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRef {
    #[serde(deserialize_with = "number_or_string")]
    pub number: u32,
    #[serde(default)]
    pub en: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekdayRef {
    #[serde(default)]
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GregorianDate {
    /// `DD-MM-YYYY`
    pub date: String,
    #[serde(deserialize_with = "number_or_string")]
    pub day: u32,
    pub month: MonthRef,
    #[serde(deserialize_with = "number_or_string")]
    pub year: i32,
    #[serde(default)]
    pub weekday: WeekdayRef,
}

impl GregorianDate {
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HijriDate {
    #[serde(deserialize_with = "number_or_string")]
    pub day: u32,
    pub month: MonthRef,
    #[serde(deserialize_with = "number_or_string")]
    pub year: u32,
}

impl HijriDate {
    pub const RAMADAN: u32 = 9;

    pub fn is_ramadan(&self) -> bool {
        self.month.number == Self::RAMADAN
    }

    /// "11 Ramaḍān 1447"
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month.en, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDate {
    pub gregorian: GregorianDate,
    pub hijri: HijriDate,
}

/// One calendar day as returned by the calendar API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub timings: Timings,
    pub date: DayDate,
}

impl DayRecord {
    /// 0-based position within its Gregorian month. `None` for day 0.
    pub fn day_index(&self) -> Option<usize> {
        self.date.gregorian.day.checked_sub(1).map(|i| i as usize)
    }

    pub fn hijri(&self) -> &HijriDate {
        &self.date.hijri
    }
}
