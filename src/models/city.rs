use crate::models::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub bn: &'static str,
}

pub const CITIES: &[City] = &[
    City { name: "Dhaka", bn: "ঢাকা" },
    City { name: "Chittagong", bn: "চট্টগ্রাম" },
    City { name: "Sylhet", bn: "সিলেট" },
    City { name: "Rajshahi", bn: "রাজশাহী" },
    City { name: "Khulna", bn: "খুলনা" },
    City { name: "Barishal", bn: "বরিশাল" },
    City { name: "Rangpur", bn: "রংপুর" },
    City { name: "Comilla", bn: "কুমিল্লা" },
    City { name: "Mymensingh", bn: "ময়মনসিংহ" },
    City { name: "Gazipur", bn: "গাজীপুর" },
];

impl City {
    /// Case-insensitive lookup by English name.
    pub fn find(name: &str) -> Option<City> {
        CITIES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Falls back to the first city (Dhaka) for unknown names.
    pub fn find_or_default(name: &str) -> City {
        Self::find(name).unwrap_or(CITIES[0])
    }

    pub fn display_name(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.name,
            Lang::Bn => self.bn,
        }
    }

    /// "Dhaka, Bangladesh" / "ঢাকা, বাংলাদেশ"
    pub fn label(&self, lang: Lang) -> String {
        format!("{}, {}", self.display_name(lang), lang.country())
    }

    pub fn next(&self) -> City {
        let idx = CITIES.iter().position(|c| c == self).unwrap_or(0);
        CITIES[(idx + 1) % CITIES.len()]
    }
}
