use crate::models::Lang;

/// The six daily timings the calendar API reports and the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerType {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    pub fn all() -> [PrayerType; 6] {
        [
            PrayerType::Fajr,
            PrayerType::Sunrise,
            PrayerType::Dhuhr,
            PrayerType::Asr,
            PrayerType::Maghrib,
            PrayerType::Isha,
        ]
    }

    /// Key used by the API's `timings` object.
    pub fn api_key(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Sunrise => "Sunrise",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }

    pub fn display_name(&self, lang: Lang) -> &'static str {
        match (lang, self) {
            (Lang::En, p) => p.api_key(),
            (Lang::Bn, PrayerType::Fajr) => "ফজর",
            (Lang::Bn, PrayerType::Sunrise) => "সূর্যোদয়",
            (Lang::Bn, PrayerType::Dhuhr) => "যোহর",
            (Lang::Bn, PrayerType::Asr) => "আসর",
            (Lang::Bn, PrayerType::Maghrib) => "মাগরিব",
            (Lang::Bn, PrayerType::Isha) => "এশা",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_keys_match_timings_fields() {
        let keys: Vec<&str> = PrayerType::all().iter().map(|p| p.api_key()).collect();
        assert_eq!(keys, ["Fajr", "Sunrise", "Dhuhr", "Asr", "Maghrib", "Isha"]);
    }

    #[test]
    fn bengali_names_cover_every_prayer() {
        for p in PrayerType::all() {
            assert_ne!(p.display_name(Lang::Bn), p.display_name(Lang::En));
        }
    }
}
