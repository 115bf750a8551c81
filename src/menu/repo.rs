use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::dto::{MenuItemUpdate, NewMenuItem};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

const COLUMNS: &str = "id, restaurant_id, name, price, image_url, category";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<MenuItem>> {
    let sql = format!("SELECT {COLUMNS} FROM menu ORDER BY id ASC");
    let rows = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(db).await?;
    Ok(rows)
}

pub async fn list_for_restaurant(db: &PgPool, restaurant_id: i64) -> anyhow::Result<Vec<MenuItem>> {
    let sql = format!("SELECT {COLUMNS} FROM menu WHERE restaurant_id = $1 ORDER BY id ASC");
    let rows = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(restaurant_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// `Ok(None)` when `restaurant_id` does not reference an existing restaurant.
pub async fn insert(
    db: &PgPool,
    restaurant_id: i64,
    name: &str,
    item: &NewMenuItem,
) -> anyhow::Result<Option<i64>> {
    let res = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO menu (restaurant_id, name, price, image_url, category)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(restaurant_id)
    .bind(name)
    .bind(item.price)
    .bind(&item.image_url)
    .bind(&item.category)
    .fetch_one(db)
    .await;

    match res {
        Ok(id) => Ok(Some(id)),
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn update(db: &PgPool, id: i64, name: &str, item: &MenuItemUpdate) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE menu
        SET name = $1, price = $2, image_url = $3, category = COALESCE($4, category)
        WHERE id = $5
        "#,
    )
    .bind(name)
    .bind(item.price)
    .bind(&item.image_url)
    .bind(&item.category)
    .bind(id)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let res = sqlx::query(r#"DELETE FROM menu WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
