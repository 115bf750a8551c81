use serde::Serialize;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MonthlyCount {
    pub month: i32,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RestaurantBookings {
    pub id: i64,
    pub restaurant_name: String,
    pub location: Option<String>,
    pub total_bookings: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventBookings {
    pub id: i64,
    pub event_name: String,
    pub total_bookings: i64,
}

/// Bookings per calendar month (1-12), all years folded together.
pub async fn bookings_by_month(db: &PgPool) -> anyhow::Result<Vec<MonthlyCount>> {
    let rows = sqlx::query_as::<_, MonthlyCount>(
        r#"
        SELECT EXTRACT(MONTH FROM booking_datetime)::INT AS month, COUNT(*) AS count
        FROM bookings
        WHERE booking_datetime IS NOT NULL
        GROUP BY 1
        ORDER BY 1 ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn popular_restaurants(db: &PgPool) -> anyhow::Result<Vec<RestaurantBookings>> {
    let rows = sqlx::query_as::<_, RestaurantBookings>(
        r#"
        SELECT r.id, r.name AS restaurant_name, r.location, COUNT(b.id) AS total_bookings
        FROM restaurants r
        LEFT JOIN bookings b ON b.restaurant_id = r.id
        GROUP BY r.id
        ORDER BY total_bookings DESC, r.id ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Top five events; bookings reference events by name.
pub async fn popular_events(db: &PgPool) -> anyhow::Result<Vec<EventBookings>> {
    let rows = sqlx::query_as::<_, EventBookings>(
        r#"
        SELECT e.id, e.name AS event_name, COUNT(eb.id) AS total_bookings
        FROM events e
        LEFT JOIN event_bookings eb ON eb.event_name = e.name
        GROUP BY e.id
        ORDER BY total_bookings DESC, e.id ASC
        LIMIT 5
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
