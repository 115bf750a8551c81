use serde::{Deserialize, Serialize};
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    OffsetDateTime, PrimitiveDateTime,
};

#[derive(Debug, Deserialize)]
pub struct NewBooking {
    pub user_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub restaurant_location: Option<String>,
    pub booking_datetime: Option<String>,
    pub guests: Option<i32>,
    #[serde(alias = "specialRequests")]
    pub special_requests: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BookingFilter {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreated {
    pub booking_id: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingStatus {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub message: &'static str,
    pub status: String,
}

const LOCAL_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

/// RFC 3339, or a zone-less `YYYY-MM-DD[T ]HH:MM[:SS]` read as UTC.
pub fn parse_booking_datetime(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(raw, *fmt).ok())
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_rfc3339_and_local_forms() {
        assert_eq!(
            parse_booking_datetime("2025-06-01T19:30:00+01:00"),
            Some(datetime!(2025-06-01 19:30:00 +01:00))
        );
        assert_eq!(
            parse_booking_datetime("2025-06-01T19:30"),
            Some(datetime!(2025-06-01 19:30:00 UTC))
        );
        assert_eq!(
            parse_booking_datetime("2025-06-01 19:30:15"),
            Some(datetime!(2025-06-01 19:30:15 UTC))
        );
    }

    #[test]
    fn rejects_dates_without_time_and_garbage() {
        assert_eq!(parse_booking_datetime("2025-06-01"), None);
        assert_eq!(parse_booking_datetime("tonight"), None);
    }

    #[test]
    fn special_requests_accepts_both_spellings() {
        let a: NewBooking =
            serde_json::from_str(r#"{"user_id":1,"specialRequests":"window seat"}"#).unwrap();
        let b: NewBooking =
            serde_json::from_str(r#"{"user_id":1,"special_requests":"window seat"}"#).unwrap();
        assert_eq!(a.special_requests, b.special_requests);
    }

    #[test]
    fn created_body_is_camel_case() {
        let v = serde_json::to_value(BookingCreated { booking_id: 9 }).unwrap();
        assert_eq!(v, serde_json::json!({ "bookingId": 9 }));
    }
}
