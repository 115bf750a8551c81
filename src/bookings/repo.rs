use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::dto::NewBooking;

pub const DEFAULT_STATUS: &str = "Pending";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: Option<i64>,
    pub restaurant_name: Option<String>,
    pub restaurant_location: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub booking_datetime: Option<OffsetDateTime>,
    pub guests: Option<i32>,
    pub special_requests: Option<String>,
    pub price: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RestaurantPopularity {
    pub restaurant_name: Option<String>,
    pub location: Option<String>,
    pub total_bookings: i64,
}

const COLUMNS: &str = "id, user_id, restaurant_id, restaurant_name, restaurant_location, \
                       booking_datetime, guests, special_requests, price, status";

pub async fn list(db: &PgPool, user_id: Option<i64>) -> anyhow::Result<Vec<Booking>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM bookings WHERE ($1::BIGINT IS NULL OR user_id = $1) ORDER BY id ASC"
    );
    let rows = sqlx::query_as::<_, Booking>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn insert(
    db: &PgPool,
    user_id: i64,
    booking_datetime: Option<OffsetDateTime>,
    b: &NewBooking,
) -> anyhow::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO bookings (user_id, restaurant_id, restaurant_name, restaurant_location,
                              booking_datetime, guests, special_requests, price, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(b.restaurant_id)
    .bind(&b.restaurant_name)
    .bind(&b.restaurant_location)
    .bind(booking_datetime)
    .bind(b.guests)
    .bind(&b.special_requests)
    .bind(b.price)
    .bind(DEFAULT_STATUS)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn status(db: &PgPool, id: i64) -> anyhow::Result<Option<String>> {
    let status = sqlx::query_scalar::<_, String>(r#"SELECT status FROM bookings WHERE id = $1"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(status)
}

pub async fn set_status(db: &PgPool, id: i64, status: &str) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"UPDATE bookings SET status = $1 WHERE id = $2"#)
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Restaurants booked more than once, by name and location.
pub async fn popular(db: &PgPool) -> anyhow::Result<Vec<RestaurantPopularity>> {
    let rows = sqlx::query_as::<_, RestaurantPopularity>(
        r#"
        SELECT restaurant_name, restaurant_location AS location, COUNT(*) AS total_bookings
        FROM bookings
        GROUP BY restaurant_name, restaurant_location
        HAVING COUNT(*) > 1
        ORDER BY total_bookings DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
