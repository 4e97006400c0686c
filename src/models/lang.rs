use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::countdown::Phase;
use crate::utils::format::to_bn_digits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Bn,
    En,
}

const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_BN: [&str; 7] = ["রবি", "সোম", "মঙ্গল", "বুধ", "বৃহঃ", "শুক্র", "শনি"];

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Bn => "bn",
            Lang::En => "en",
        }
    }

    pub fn toggled(self) -> Lang {
        match self {
            Lang::Bn => Lang::En,
            Lang::En => Lang::Bn,
        }
    }

    pub fn phase_label(&self, phase: Phase) -> &'static str {
        match (self, phase) {
            (Lang::En, Phase::AwaitingSehar) => "UNTIL SEHAR",
            (Lang::En, Phase::AwaitingIftar) => "UNTIL IFTAR",
            (Lang::En, Phase::AwaitingTomorrowSehar) => "UNTIL SEHAR (TOMORROW)",
            (Lang::Bn, Phase::AwaitingSehar) => "সেহরির বাকি",
            (Lang::Bn, Phase::AwaitingIftar) => "ইফতারের বাকি",
            (Lang::Bn, Phase::AwaitingTomorrowSehar) => "আগামীকালের সেহরি",
        }
    }

    pub fn tray_label(&self) -> &'static str {
        match self {
            Lang::En => "Today's Prayer Times",
            Lang::Bn => "আজকের নামাজের সময়",
        }
    }

    pub fn loading(&self) -> &'static str {
        match self {
            Lang::En => "Loading...",
            Lang::Bn => "লোড হচ্ছে...",
        }
    }

    pub fn country(&self) -> &'static str {
        match self {
            Lang::En => "Bangladesh",
            Lang::Bn => "বাংলাদেশ",
        }
    }

    pub fn sehar(&self) -> &'static str {
        match self {
            Lang::En => "Sehar",
            Lang::Bn => "সেহরি",
        }
    }

    pub fn iftar(&self) -> &'static str {
        match self {
            Lang::En => "Iftar",
            Lang::Bn => "ইফতার",
        }
    }

    pub fn calendar_title(&self) -> &'static str {
        match self {
            Lang::En => "Ramadan Calendar",
            Lang::Bn => "রমজান ক্যালেন্ডার",
        }
    }

    pub fn no_ramadan_data(&self) -> &'static str {
        match self {
            Lang::En => "No Ramadan data found",
            Lang::Bn => "রমজানের ডাটা পাওয়া যায়নি",
        }
    }

    pub fn load_failed(&self) -> &'static str {
        match self {
            Lang::En => "Failed to load data",
            Lang::Bn => "ডাটা লোড ব্যর্থ",
        }
    }

    pub fn ramadan_day(&self, day: u32) -> String {
        match self {
            Lang::En => format!("Day {} of 30", day),
            Lang::Bn => format!("দিন {} / ৩০", to_bn_digits(&day.to_string())),
        }
    }

    /// Short weekday name, `0` = Sunday.
    pub fn weekday(&self, days_from_sunday: u32) -> &'static str {
        let idx = (days_from_sunday % 7) as usize;
        match self {
            Lang::En => WEEKDAYS_EN[idx],
            Lang::Bn => WEEKDAYS_BN[idx],
        }
    }

    /// Renders digits in the script of this language.
    pub fn digits(&self, s: &str) -> String {
        match self {
            Lang::En => s.to_string(),
            Lang::Bn => to_bn_digits(s),
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bn" | "bangla" | "bengali" => Ok(Lang::Bn),
            "en" | "english" => Ok(Lang::En),
            _ => Err(anyhow::anyhow!("Unknown language '{}'. Use: bn, en", s)),
        }
    }
}
