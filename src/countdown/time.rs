use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::CountdownError;

/// Parses the leading `HH:MM` of a timing string such as `"05:12 (+06)"`.
/// Anything after the first whitespace is ignored.
pub fn parse_hh_mm(raw: &str) -> Result<NaiveTime, CountdownError> {
    let clock = raw.split_whitespace().next().unwrap_or("");
    let (hh, mm) = clock
        .split_once(':')
        .ok_or_else(|| CountdownError::malformed(raw))?;

    let field = |s: &str| -> Result<u32, CountdownError> {
        if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CountdownError::malformed(raw));
        }
        s.parse().map_err(|_| CountdownError::malformed(raw))
    };

    let (h, m) = (field(hh)?, field(mm)?);
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| CountdownError::malformed(raw))
}

/// Places a timing string on `base`'s calendar day, seconds zeroed.
/// Times are already local to the city, so no offset arithmetic happens here.
pub fn anchor_time(base: NaiveDate, raw: &str) -> Result<NaiveDateTime, CountdownError> {
    Ok(base.and_time(parse_hh_mm(raw)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn ignores_timezone_annotation() {
        let t = anchor_time(day(), "05:12 (+06)").unwrap();
        assert_eq!(t, day().and_hms_opt(5, 12, 0).unwrap());
        assert_eq!(t.nanosecond(), 0);
    }

    #[test]
    fn accepts_bare_and_single_digit_hours() {
        assert_eq!(parse_hh_mm("18:03").unwrap(), NaiveTime::from_hms_opt(18, 3, 0).unwrap());
        assert_eq!(parse_hh_mm("5:07 (BST)").unwrap(), NaiveTime::from_hms_opt(5, 7, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_instead_of_producing_nonsense() {
        for raw in ["", "abc", "05-12", "ab:cd", "24:00", "05:60", "-1:30", "05:", "123:00"] {
            assert_eq!(
                parse_hh_mm(raw),
                Err(CountdownError::MalformedTime { raw: raw.to_string() }),
                "input {raw:?}"
            );
        }
    }
}
