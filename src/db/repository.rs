use anyhow::{Context, Result};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::DayRecord;

fn decode(city: &str, payload: &str) -> Option<Vec<DayRecord>> {
    match serde_json::from_str(payload) {
        Ok(days) => Some(days),
        Err(e) => {
            // A corrupt row is treated as a cache miss and overwritten by the next fetch.
            warn!("Discarding unreadable cached calendar for {}: {}", city, e);
            None
        }
    }
}

// ─── Month calendar (per city, per local date) ──────────────────────────────

pub struct CalendarRepo;

impl CalendarRepo {
    pub fn get_month(
        conn: &Connection,
        city: &str,
        fetched_on: &str,
    ) -> Result<Option<Vec<DayRecord>>> {
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM calendar_cache WHERE city = ?1 AND fetched_on = ?2",
                params![city, fetched_on],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload.and_then(|p| decode(city, &p)))
    }

    /// Stores the month for `fetched_on` and drops every older copy for the city.
    /// `fetched_on` is `YYYY-MM-DD`, so string order is date order.
    pub fn store_month(
        conn: &Connection,
        city: &str,
        fetched_on: &str,
        days: &[DayRecord],
    ) -> Result<()> {
        let payload = serde_json::to_string(days).context("Serializing calendar")?;
        conn.execute(
            "DELETE FROM calendar_cache WHERE city = ?1 AND fetched_on < ?2",
            params![city, fetched_on],
        )?;
        conn.execute(
            "INSERT OR REPLACE INTO calendar_cache (city, fetched_on, payload) VALUES (?1, ?2, ?3)",
            params![city, fetched_on, payload],
        )?;
        Ok(())
    }

    pub fn clear_city(conn: &Connection, city: &str) -> Result<usize> {
        Ok(conn.execute("DELETE FROM calendar_cache WHERE city = ?1", params![city])?)
    }
}

// ─── Ramadan calendar (per city, per Hijri year) ────────────────────────────

pub struct RamadanRepo;

impl RamadanRepo {
    pub fn get(conn: &Connection, city: &str, hijri_year: u32) -> Result<Option<Vec<DayRecord>>> {
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM ramadan_cache WHERE city = ?1 AND hijri_year = ?2",
                params![city, hijri_year],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload.and_then(|p| decode(city, &p)))
    }

    pub fn store(conn: &Connection, city: &str, hijri_year: u32, days: &[DayRecord]) -> Result<()> {
        let payload = serde_json::to_string(days).context("Serializing Ramadan calendar")?;
        conn.execute(
            "INSERT OR REPLACE INTO ramadan_cache (city, hijri_year, payload) VALUES (?1, ?2, ?3)",
            params![city, hijri_year, payload],
        )?;
        Ok(())
    }

    pub fn clear_city(conn: &Connection, city: &str) -> Result<usize> {
        Ok(conn.execute("DELETE FROM ramadan_cache WHERE city = ?1", params![city])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::fixtures;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn month_cache_is_keyed_by_city_and_date() {
        let conn = conn();
        let days = fixtures::month(2026, 3, 31);
        CalendarRepo::store_month(&conn, "Dhaka", "2026-03-05", &days).unwrap();

        assert_eq!(CalendarRepo::get_month(&conn, "Dhaka", "2026-03-05").unwrap(), Some(days));
        assert_eq!(CalendarRepo::get_month(&conn, "Dhaka", "2026-03-06").unwrap(), None);
        assert_eq!(CalendarRepo::get_month(&conn, "Sylhet", "2026-03-05").unwrap(), None);
    }

    #[test]
    fn storing_a_new_day_evicts_old_copies() {
        let conn = conn();
        let days = fixtures::month(2026, 3, 31);
        CalendarRepo::store_month(&conn, "Dhaka", "2026-03-05", &days).unwrap();
        CalendarRepo::store_month(&conn, "Sylhet", "2026-03-05", &days).unwrap();
        CalendarRepo::store_month(&conn, "Dhaka", "2026-03-06", &days).unwrap();

        assert_eq!(CalendarRepo::get_month(&conn, "Dhaka", "2026-03-05").unwrap(), None);
        assert!(CalendarRepo::get_month(&conn, "Sylhet", "2026-03-05").unwrap().is_some());
        assert_eq!(CalendarRepo::clear_city(&conn, "Dhaka").unwrap(), 1);
    }

    #[test]
    fn storing_an_earlier_day_keeps_newer_copies() {
        let conn = conn();
        let days = fixtures::month(2026, 3, 31);
        CalendarRepo::store_month(&conn, "Dhaka", "2026-03-06", &days).unwrap();
        CalendarRepo::store_month(&conn, "Dhaka", "2026-03-01", &days).unwrap();

        assert!(CalendarRepo::get_month(&conn, "Dhaka", "2026-03-06").unwrap().is_some());
        assert!(CalendarRepo::get_month(&conn, "Dhaka", "2026-03-01").unwrap().is_some());
    }

    #[test]
    fn corrupt_payload_reads_as_miss() {
        let conn = conn();
        conn.execute(
            "INSERT INTO calendar_cache (city, fetched_on, payload) \
             VALUES ('Dhaka', '2026-03-05', '{oops')",
            [],
        )
        .unwrap();
        assert_eq!(CalendarRepo::get_month(&conn, "Dhaka", "2026-03-05").unwrap(), None);
    }

    #[test]
    fn ramadan_cache_round_trip() {
        let conn = conn();
        let days = fixtures::month(2026, 2, 12);
        RamadanRepo::store(&conn, "Khulna", 1447, &days).unwrap();
        assert_eq!(RamadanRepo::get(&conn, "Khulna", 1447).unwrap(), Some(days));
        assert_eq!(RamadanRepo::get(&conn, "Khulna", 1448).unwrap(), None);
        assert_eq!(RamadanRepo::clear_city(&conn, "Khulna").unwrap(), 1);
    }
}
