use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;

use super::dto::{JoinEventRequest, NewEvent};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
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

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventPopularity {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    pub total_bookings: i64,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Event>> {
    let rows = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, max_attendees, date, time, description, restaurant_id,
               image_url, location, category, price
        FROM events
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, name: &str, ev: &NewEvent) -> anyhow::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO events (name, max_attendees, date, time, description, restaurant_id,
                            image_url, location, category, price)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(ev.max_attendees)
    .bind(&ev.date)
    .bind(&ev.time)
    .bind(&ev.description)
    .bind(ev.restaurant_id)
    .bind(&ev.image_url)
    .bind(&ev.location)
    .bind(&ev.category)
    .bind(ev.price)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn insert_booking(db: &PgPool, date: Date, req: &JoinEventRequest) -> anyhow::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO event_bookings (full_name, total_price, date, number_of_persons,
                                    event_name, location, payment_method, transaction_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&req.full_name)
    .bind(req.total_price)
    .bind(date)
    .bind(req.number_of_persons)
    .bind(&req.event_name)
    .bind(&req.location)
    .bind(&req.payment_method)
    .bind(&req.transaction_id)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn popularity(db: &PgPool) -> anyhow::Result<Vec<EventPopularity>> {
    let rows = sqlx::query_as::<_, EventPopularity>(
        r#"
        SELECT event_name, COUNT(*) AS total_bookings
        FROM event_bookings
        GROUP BY event_name
        ORDER BY total_bookings DESC, event_name ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
