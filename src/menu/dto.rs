use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewMenuItem {
    #[serde(alias = "restaurantId")]
    pub restaurant_id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    #[serde(alias = "imageUrl")]
    pub image_url: Option<String>,
    pub category: Option<String>,
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl NewMenuItem {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

impl MenuItemUpdate {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_and_snake_keys_both_work() {
        let a: NewMenuItem =
            serde_json::from_str(r#"{"restaurantId":7,"name":"Dal","imageUrl":"x.png"}"#).unwrap();
        let b: NewMenuItem =
            serde_json::from_str(r#"{"restaurant_id":7,"name":"Dal","image_url":"x.png"}"#).unwrap();
        assert_eq!(a.restaurant_id, b.restaurant_id);
        assert_eq!(a.image_url, b.image_url);
        assert_eq!(a.name(), Some("Dal"));
    }
}
