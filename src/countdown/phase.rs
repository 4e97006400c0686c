use chrono::{Datelike, Duration, NaiveDateTime};

use super::progress::progress_percent;
use super::time::anchor_time;
use super::CountdownError;
use crate::models::DayRecord;

pub const DEFAULT_SEHAR_FALLBACK_HOURS: i64 = 11;
pub const DEFAULT_TOMORROW_FALLBACK_HOURS: i64 = 10;

/// Where "now" sits relative to the day's Sehar and Iftar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingSehar,
    AwaitingIftar,
    AwaitingTomorrowSehar,
}

/// Windows used when the neighbouring day is outside the fetched month.
///
/// These are approximations, not derived from timing data: the previous
/// day's Iftar is assumed to sit `sehar_window` before Sehar, and the next
/// Sehar is assumed to be `tomorrow_window` after now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallbacks {
    pub sehar_window: Duration,
    pub tomorrow_window: Duration,
}

impl Fallbacks {
    pub fn from_hours(sehar_hours: i64, tomorrow_hours: i64) -> Self {
        Self {
            sehar_window: Duration::hours(sehar_hours),
            tomorrow_window: Duration::hours(tomorrow_hours),
        }
    }
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self::from_hours(DEFAULT_SEHAR_FALLBACK_HOURS, DEFAULT_TOMORROW_FALLBACK_HOURS)
    }
}

/// Result of one evaluation. Recomputed on every tick, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownState {
    pub phase: Phase,
    pub now: NaiveDateTime,
    pub target: NaiveDateTime,
    /// Start of the progress window. Only feeds the progress denominator.
    pub origin: NaiveDateTime,
    pub progress_percent: f64,
}

impl CountdownState {
    pub fn remaining_seconds(&self) -> i64 {
        (self.target - self.now).num_seconds().max(0)
    }
}

/// Decides the phase at `now` and the countdown window it implies.
///
/// `days` is the month's calendar indexed by day-of-month minus one. Missing
/// neighbours fall back to `fallbacks`; only a missing record for today is
/// an error.
pub fn classify(
    now: NaiveDateTime,
    days: &[DayRecord],
    fallbacks: &Fallbacks,
) -> Result<CountdownState, CountdownError> {
    let day_index = now.day0() as usize;
    let today = days
        .get(day_index)
        .ok_or(CountdownError::MissingDayData { day_index })?;
    let date = now.date();

    let sehar = anchor_time(date, today.timings.sehar())?;
    let iftar = anchor_time(date, today.timings.iftar())?;

    let (phase, target, origin) = if now < sehar {
        let previous = day_index.checked_sub(1).and_then(|i| days.get(i));
        let origin = match (previous, date.pred_opt()) {
            (Some(prev), Some(yesterday)) => anchor_time(yesterday, prev.timings.iftar())?,
            // First day of the fetched month: no real previous Iftar to use.
            _ => sehar - fallbacks.sehar_window,
        };
        (Phase::AwaitingSehar, sehar, origin)
    } else if now < iftar {
        (Phase::AwaitingIftar, iftar, sehar)
    } else {
        let next = days.get(day_index + 1);
        let target = match (next, date.succ_opt()) {
            (Some(next), Some(tomorrow)) => anchor_time(tomorrow, next.timings.sehar())?,
            // Last day of the fetched month: next month's Sehar is unknown.
            _ => now + fallbacks.tomorrow_window,
        };
        (Phase::AwaitingTomorrowSehar, target, iftar)
    };

    Ok(CountdownState {
        phase,
        now,
        target,
        origin,
        progress_percent: progress_percent(now, origin, target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn march() -> Vec<DayRecord> {
        let mut days = fixtures::month(2026, 3, 31);
        days[3].timings.maghrib = "18:02 (+06)".to_string();
        days
    }

    #[test]
    fn before_sehar_counts_from_yesterdays_iftar() {
        let state = classify(at(5, 4, 0, 0), &march(), &Fallbacks::default()).unwrap();
        assert_eq!(state.phase, Phase::AwaitingSehar);
        assert_eq!(state.target, at(5, 5, 12, 0));
        assert_eq!(state.origin, at(4, 18, 2, 0));
        assert_eq!(state.remaining_seconds(), 72 * 60);
        // 11h10m window with 1h12m left
        assert!((state.progress_percent - 89.2537).abs() < 0.001);
    }

    #[test]
    fn exactly_at_sehar_is_already_fasting() {
        let state = classify(at(5, 5, 12, 0), &march(), &Fallbacks::default()).unwrap();
        assert_eq!(state.phase, Phase::AwaitingIftar);
        assert_eq!(state.origin, at(5, 5, 12, 0));
        assert_eq!(state.target, at(5, 18, 3, 0));
        assert_eq!(state.progress_percent, 0.0);
    }

    #[test]
    fn exactly_at_iftar_flips_to_tomorrow() {
        let state = classify(at(5, 18, 3, 0), &march(), &Fallbacks::default()).unwrap();
        assert_eq!(state.phase, Phase::AwaitingTomorrowSehar);
        assert_eq!(state.origin, at(5, 18, 3, 0));
        assert_eq!(state.target, at(6, 5, 12, 0));
    }

    #[test]
    fn first_day_uses_sehar_window_fallback() {
        let state = classify(at(1, 3, 0, 0), &march(), &Fallbacks::default()).unwrap();
        assert_eq!(state.phase, Phase::AwaitingSehar);
        assert_eq!(state.origin, at(1, 5, 12, 0) - Duration::hours(11));
    }

    #[test]
    fn last_day_uses_tomorrow_window_fallback() {
        let now = at(31, 20, 15, 30);
        let state = classify(now, &march(), &Fallbacks::default()).unwrap();
        assert_eq!(state.phase, Phase::AwaitingTomorrowSehar);
        assert_eq!(state.target, now + Duration::hours(10));
        assert_eq!(state.remaining_seconds(), 10 * 3600);
    }

    #[test]
    fn fallbacks_are_configurable() {
        let fallbacks = Fallbacks::from_hours(8, 6);
        let early = classify(at(1, 3, 0, 0), &march(), &fallbacks).unwrap();
        assert_eq!(early.origin, at(1, 5, 12, 0) - Duration::hours(8));
        let late = classify(at(31, 21, 0, 0), &march(), &fallbacks).unwrap();
        assert_eq!(late.target, at(31, 21, 0, 0) + Duration::hours(6));
    }

    #[test]
    fn missing_today_is_an_error() {
        let days = fixtures::month(2026, 3, 3);
        assert_eq!(
            classify(at(10, 12, 0, 0), &days, &Fallbacks::default()),
            Err(CountdownError::MissingDayData { day_index: 9 })
        );
    }

    #[test]
    fn malformed_timing_is_reported() {
        let mut days = march();
        days[4].timings.fajr = "--:--".to_string();
        assert!(matches!(
            classify(at(5, 12, 0, 0), &days, &Fallbacks::default()),
            Err(CountdownError::MalformedTime { .. })
        ));
    }

    #[test]
    fn malformed_neighbour_only_matters_when_consulted() {
        let mut days = march();
        days[5].timings.fajr = "bad".to_string();
        assert!(classify(at(5, 12, 0, 0), &days, &Fallbacks::default()).is_ok());
        assert!(classify(at(5, 19, 0, 0), &days, &Fallbacks::default()).is_err());
    }

    proptest! {
        #[test]
        fn phase_matches_interval(day in 2u32..31, secs in 0u32..86_400) {
            // March 4th carries a different Iftar.
            prop_assume!(day != 4);
            let now = at(day, 0, 0, 0) + Duration::seconds(secs as i64);
            let sehar = at(day, 5, 12, 0);
            let iftar = at(day, 18, 3, 0);
            let state = classify(now, &march(), &Fallbacks::default()).unwrap();

            if now < sehar {
                prop_assert_eq!(state.phase, Phase::AwaitingSehar);
                prop_assert_eq!(state.target, sehar);
            } else if now < iftar {
                prop_assert_eq!(state.phase, Phase::AwaitingIftar);
                prop_assert_eq!(state.target, iftar);
                prop_assert_eq!(state.origin, sehar);
            } else {
                prop_assert_eq!(state.phase, Phase::AwaitingTomorrowSehar);
                prop_assert_eq!(state.origin, iftar);
            }
            prop_assert!((0.0..=100.0).contains(&state.progress_percent));
            prop_assert!(state.remaining_seconds() >= 0);
        }
    }
}
