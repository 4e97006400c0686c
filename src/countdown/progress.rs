use chrono::NaiveDateTime;

/// Completion of the window `origin..target` at `now`, as a percentage in [0, 100].
///
/// An empty window (`origin == target`) counts as fully elapsed and yields 100.
pub fn progress_percent(now: NaiveDateTime, origin: NaiveDateTime, target: NaiveDateTime) -> f64 {
    let total = (target - origin).num_milliseconds();
    if total == 0 {
        return 100.0;
    }
    let remaining = (target - now).num_milliseconds();
    ((1.0 - remaining as f64 / total as f64) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn halfway_is_fifty() {
        assert_eq!(progress_percent(at(12, 0, 0), at(10, 0, 0), at(14, 0, 0)), 50.0);
    }

    #[test]
    fn empty_window_is_complete() {
        assert_eq!(progress_percent(at(9, 0, 0), at(10, 0, 0), at(10, 0, 0)), 100.0);
    }

    #[test]
    fn clamps_outside_the_window() {
        assert_eq!(progress_percent(at(8, 0, 0), at(10, 0, 0), at(14, 0, 0)), 0.0);
        assert_eq!(progress_percent(at(15, 0, 0), at(10, 0, 0), at(14, 0, 0)), 100.0);
    }

    proptest! {
        #[test]
        fn bounded_and_monotonic(window in 1i64..86_400, a in 0i64..86_400, b in 0i64..86_400) {
            let origin = at(0, 0, 0);
            let target = origin + Duration::seconds(window);
            let (early, late) = (a.min(b) % (window + 1), a.max(b) % (window + 1));
            let (early, late) = (early.min(late), early.max(late));

            let p1 = progress_percent(origin + Duration::seconds(early), origin, target);
            let p2 = progress_percent(origin + Duration::seconds(late), origin, target);

            prop_assert!((0.0..=100.0).contains(&p1));
            prop_assert!((0.0..=100.0).contains(&p2));
            prop_assert!(p1 <= p2);
        }
    }
}
