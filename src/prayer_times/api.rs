use log::{debug, info};
use serde::Deserialize;
use std::time::Duration;

use super::CalendarError;
use crate::config::settings::ApiConfig;
use crate::models::DayRecord;

/// Anything that can hand over a month of day records for a city.
pub trait CalendarSource {
    /// Gregorian month, one record per day.
    fn fetch_month(
        &self,
        city: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayRecord>, CalendarError>;

    /// Hijri month, one record per day.
    fn fetch_hijri_month(
        &self,
        city: &str,
        hijri_year: u32,
        hijri_month: u32,
    ) -> Result<Vec<DayRecord>, CalendarError>;
}

/// Envelope of every AlAdhan response. On failure `data` is an error string.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: u16,
    #[serde(default)]
    status: String,
    data: serde_json::Value,
}

pub fn parse_response(body: &str) -> Result<Vec<DayRecord>, CalendarError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    if response.code != 200 {
        let message = match response.data {
            serde_json::Value::String(s) => s,
            _ => response.status,
        };
        return Err(CalendarError::Api {
            code: response.code,
            message,
        });
    }
    Ok(serde_json::from_value(response.data)?)
}

/// Blocking client for the AlAdhan calendar endpoints. One attempt per call.
pub struct AladhanClient {
    http: reqwest::blocking::Client,
    base_url: String,
    country: String,
    method: u8,
}

impl AladhanClient {
    pub fn new(api: &ApiConfig, country: &str) -> Result<Self, CalendarError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("roza/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            country: country.to_string(),
            method: api.method,
        })
    }

    fn get(&self, path: &str, city: &str) -> Result<Vec<DayRecord>, CalendarError> {
        let url = format!("{}/{}", self.base_url, path);
        let method = self.method.to_string();
        debug!("GET {} city={}", url, city);
        let body = self
            .http
            .get(&url)
            .query(&[
                ("city", city),
                ("country", self.country.as_str()),
                ("method", method.as_str()),
            ])
            .send()?
            .text()?;
        let days = parse_response(&body)?;
        info!("Fetched {} days from {} for {}", days.len(), path, city);
        Ok(days)
    }
}

impl CalendarSource for AladhanClient {
    fn fetch_month(
        &self,
        city: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayRecord>, CalendarError> {
        self.get(&format!("calendarByCity/{}/{}", year, month), city)
    }

    fn fetch_hijri_month(
        &self,
        city: &str,
        hijri_year: u32,
        hijri_month: u32,
    ) -> Result<Vec<DayRecord>, CalendarError> {
        self.get(&format!("hijriCalendarByCity/{}/{}", hijri_year, hijri_month), city)
    }
}
