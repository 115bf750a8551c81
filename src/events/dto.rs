use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: Option<String>,
    pub max_attendees: Option<i32>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub restaurant_id: Option<i64>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
}

impl NewEvent {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Body of `POST /join-event`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEventRequest {
    pub full_name: Option<String>,
    pub total_price: Option<f64>,
    pub date: Option<String>,
    pub number_of_persons: Option<i32>,
    pub event_name: Option<String>,
    pub location: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` and keeps the calendar day.
///
/// Timestamps are normalized to UTC before the day is taken.
pub fn parse_event_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts.to_offset(time::UtcOffset::UTC).date());
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}
