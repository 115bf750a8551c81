use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::dto::RestaurantInput;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub owner_id: Option<i64>,
    pub cuisine: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub seats_available: Option<i32>,
    pub opening_hours: Option<String>,
    pub menu: Option<serde_json::Value>,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Restaurant>> {
    let rows = sqlx::query_as::<_, Restaurant>(
        r#"
        SELECT id, name, location, owner_id, cuisine, description, image_url,
               price, rating, seats_available, opening_hours, menu
        FROM restaurants
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, name: &str, input: &RestaurantInput) -> anyhow::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO restaurants (name, location, owner_id, cuisine, description, image_url,
                                 price, rating, seats_available, opening_hours, menu)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(&input.location)
    .bind(input.owner_id)
    .bind(&input.cuisine)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(input.price)
    .bind(input.rating)
    .bind(input.seats_available)
    .bind(&input.opening_hours)
    .bind(&input.menu)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// Replaces every column. Returns `false` when no row has that id.
pub async fn update(
    db: &PgPool,
    id: i64,
    name: &str,
    input: &RestaurantInput,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE restaurants SET
            name = $1, location = $2, owner_id = $3, cuisine = $4, description = $5,
            image_url = $6, price = $7, rating = $8, seats_available = $9,
            opening_hours = $10, menu = COALESCE($11, menu)
        WHERE id = $12
        "#,
    )
    .bind(name)
    .bind(&input.location)
    .bind(input.owner_id)
    .bind(&input.cuisine)
    .bind(&input.description)
    .bind(&input.image_url)
    .bind(input.price)
    .bind(input.rating)
    .bind(input.seats_available)
    .bind(&input.opening_hours)
    .bind(&input.menu)
    .bind(id)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM restaurants WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
