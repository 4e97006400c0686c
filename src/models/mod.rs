pub mod city;
pub mod day;
#[cfg(test)]
pub mod fixtures;
pub mod lang;
pub mod prayer;

pub use city::{City, CITIES};
pub use day::{DayRecord, HijriDate, Timings};
pub use lang::Lang;
pub use prayer::PrayerType;
