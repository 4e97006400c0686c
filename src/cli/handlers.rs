use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDateTime};
use rusqlite::Connection;
use std::str::FromStr;

use crate::config::AppConfig;
use crate::countdown::time::anchor_time;
use crate::countdown::{evaluate, Clock, FixedClock, SystemClock};
use crate::models::{City, Lang, PrayerType, CITIES};
use crate::prayer_times::{AladhanClient, CalendarStore};
use crate::utils::format::{pad_display, progress_bar, to_12h};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const TEAL: &str = "\x1b[38;2;72;168;160m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;214;176;82m";

fn store<'c>(
    conn: &'c Connection,
    config: &AppConfig,
) -> Result<CalendarStore<'c, AladhanClient>> {
    let client = AladhanClient::new(&config.api, &config.location.country)?;
    Ok(CalendarStore::new(conn, client, config.location.city()))
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    conn: &Connection,
    config: &AppConfig,
    at: Option<NaiveDateTime>,
) -> Result<()> {
    let clock: Box<dyn Clock> = match at {
        Some(at) => Box::new(FixedClock::new(at)),
        None => Box::new(SystemClock),
    };
    let now = clock.now();
    let lang = config.display.lang;
    let city = config.location.city();

    let store = store(conn, config)?;
    let calendar = if at.is_some() {
        store.month_uncached(now.date())?
    } else {
        store.month_for(now.date())?
    };
    let today = calendar
        .day(now.date())
        .ok_or_else(|| anyhow!("No timings for {} in the fetched calendar", now.date()))?;

    println!();
    println_colored!(GOLD, "  {}", city.label(lang));
    let hijri = today.hijri();
    if hijri.is_ramadan() {
        println_colored!(
            DIM,
            "  {}  ·  {}",
            lang.digits(&hijri.formatted()),
            lang.ramadan_day(hijri.day)
        );
    } else {
        println_colored!(DIM, "  {}", lang.digits(&hijri.formatted()));
    }
    println!();

    println_colored!(
        BOLD,
        "  {}{}    {}{}",
        pad_display(lang.sehar(), 8),
        to_12h(today.timings.sehar()),
        pad_display(lang.iftar(), 8),
        to_12h(today.timings.iftar())
    );
    println!();

    match evaluate(now, calendar.days(), &config.ticker_options()) {
        Ok(frame) => {
            println_colored!(TEAL, "  {}  {}", frame.phase_label, frame.countdown);
            println_colored!(
                DIM,
                "  {} {}",
                progress_bar(frame.progress_percent, 30),
                lang.digits(&format!("{:.0}%", frame.progress_percent))
            );
        }
        Err(e) => {
            println_colored!(RED, "  {}", e);
        }
    }
    println!();

    println_colored!(GOLD, "  {}", lang.tray_label());
    for prayer in PrayerType::all() {
        let raw = today.timings.get(prayer);
        let is_past = anchor_time(now.date(), raw).is_ok_and(|t| t < now);
        let name = pad_display(prayer.display_name(lang), 10);
        if is_past {
            println_colored!(DIM, "  {}  {}", name, to_12h(raw));
        } else {
            println_colored!(BOLD, "  {}  {}", name, to_12h(raw));
        }
    }
    println!();
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar(conn: &Connection, config: &AppConfig, year: Option<u32>) -> Result<()> {
    let lang = config.display.lang;
    let store = store(conn, config)?;
    let now = SystemClock.now();

    let hijri_year = match year {
        Some(y) => y,
        None => {
            let month = store.month_for(now.date())?;
            month
                .day(now.date())
                .map(|d| d.hijri().year)
                .context("Could not determine the current Hijri year")?
        }
    };

    let ramadan = store.ramadan(hijri_year)?;

    println!();
    println_colored!(
        GOLD,
        "  {} {} · {}",
        lang.calendar_title(),
        lang.digits(&hijri_year.to_string()),
        store.city().label(lang)
    );
    println!();

    if ramadan.is_empty() {
        println_colored!(DIM, "  {}", lang.no_ramadan_data());
        println!();
        return Ok(());
    }

    for (i, day) in ramadan.days.iter().enumerate() {
        let date = day.date.gregorian.to_naive();
        let weekday = date
            .map(|d| lang.weekday(d.weekday().num_days_from_sunday()))
            .unwrap_or("");
        let short = date
            .map(|d| d.format("%-d %b").to_string())
            .unwrap_or_else(|| day.date.gregorian.date.clone());
        let line = format!(
            "  {:>3}  {}{}{}  {}",
            lang.digits(&(i + 1).to_string()),
            pad_display(weekday, 7),
            pad_display(&lang.digits(&short), 9),
            pad_display(&to_12h(day.timings.sehar()), 10),
            to_12h(day.timings.iftar())
        );
        if date == Some(now.date()) {
            println_colored!(GOLD, "{}", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── City / language ─────────────────────────────────────────────────────────

pub fn resolve_city(name: &str) -> Result<City> {
    City::find(name).ok_or_else(|| {
        let known: Vec<&str> = CITIES.iter().map(|c| c.name).collect();
        anyhow!("Unknown city '{}'. Use one of: {}", name, known.join(", "))
    })
}

pub fn handle_city(config: &mut AppConfig, name: Option<&str>) -> Result<()> {
    let lang = config.display.lang;
    match name {
        None => {
            let current = config.location.city();
            println!();
            for city in CITIES {
                if *city == current {
                    println_colored!(GOLD, "  ● {}", city.display_name(lang));
                } else {
                    println_colored!(DIM, "  ○ {}", city.display_name(lang));
                }
            }
            println!();
        }
        Some(name) => {
            let city = resolve_city(name)?;
            config.location.city = city.name.to_string();
            config.save()?;
            println_colored!(TEAL, "  ✓ {}", city.label(lang));
        }
    }
    Ok(())
}

pub fn handle_lang(config: &mut AppConfig, lang: &str) -> Result<()> {
    let lang = Lang::from_str(lang)?;
    config.display.lang = lang;
    config.save()?;
    println_colored!(TEAL, "  ✓ {}", lang);
    Ok(())
}

// ─── Refresh ─────────────────────────────────────────────────────────────────

pub fn handle_refresh(conn: &Connection, config: &AppConfig) -> Result<()> {
    let store = store(conn, config)?;
    store.clear()?;
    let now = SystemClock.now();
    let calendar = store.month_for(now.date())?;
    println_colored!(
        TEAL,
        "  ✓ Fetched {} days for {}",
        calendar.days().len(),
        store.city().name
    );
    Ok(())
}
