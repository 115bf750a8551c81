use serde::Deserialize;

/// Body for creating or fully replacing a restaurant.
#[derive(Debug, Deserialize)]
pub struct RestaurantInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub owner_id: Option<i64>,
    pub cuisine: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub seats_available: Option<i32>,
    pub opening_hours: Option<String>,
    /// Free-form menu document, stored as JSONB.
    pub menu: Option<serde_json::Value>,
}

impl RestaurantInput {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_short_and_full_shapes() {
        let short: RestaurantInput = serde_json::from_str(
            r#"{"name":"Curry Hub","location":"Leeds","price":12.5,"menu":[{"dish":"Dal"}]}"#,
        )
        .unwrap();
        assert_eq!(short.name(), Some("Curry Hub"));
        assert!(short.menu.unwrap().is_array());
        assert!(short.owner_id.is_none());

        let full: RestaurantInput = serde_json::from_str(
            r#"{"name":"X","location":"Y","owner_id":3,"cuisine":"Thai","description":"d",
                "image_url":"u","price":10,"rating":4.5,"seats_available":20,"opening_hours":"9-5"}"#,
        )
        .unwrap();
        assert_eq!(full.owner_id, Some(3));
        assert_eq!(full.seats_available, Some(20));
    }

    #[test]
    fn blank_name_is_missing() {
        let input: RestaurantInput = serde_json::from_str(r#"{"name":"   "}"#).unwrap();
        assert_eq!(input.name(), None);
    }
}
