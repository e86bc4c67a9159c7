//! Mobile ordering view of a menu.

use serde::Serialize;

use super::{format_price, MenuData};

/// Id of the synthetic category that shows every item.
pub const ALL_CATEGORY_ID: &str = "all";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileClient {
    pub name: String,
    pub tagline: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MobileCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub price_text: String,
    pub category_name: String,
    pub category_id: String,
    pub image_url: Option<String>,
}

/// Menu shaped for the phone ordering screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileMenu {
    pub client_slug: String,
    pub client: MobileClient,
    pub categories: Vec<MobileCategory>,
    pub items: Vec<MobileItem>,
}

impl From<&MenuData> for MobileMenu {
    fn from(menu: &MenuData) -> Self {
        let mut categories = vec![MobileCategory {
            id: ALL_CATEGORY_ID.to_string(),
            name: "All".to_string(),
        }];
        categories.extend(menu.categories.iter().map(|c| MobileCategory {
            id: c.id.clone(),
            name: c.name.clone(),
        }));

        let items = menu
            .items
            .iter()
            .map(|item| {
                let category = item
                    .category_id
                    .as_deref()
                    .and_then(|id| menu.find_category(id));
                MobileItem {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    price_cents: item.price_cents,
                    price_text: format_price(item.price_cents),
                    category_name: category
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| "All".to_string()),
                    category_id: item
                        .category_id
                        .clone()
                        .unwrap_or_else(|| ALL_CATEGORY_ID.to_string()),
                    image_url: item.image_url.clone(),
                }
            })
            .collect();

        Self {
            client_slug: menu.client.slug.clone(),
            client: MobileClient {
                name: menu.client.name.clone(),
                tagline: menu.client.tagline.clone(),
                logo_url: menu.client.logo_url.clone(),
            },
            categories,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Client, DisplayConfig, MenuItem};

    #[test]
    fn test_mobile_menu_prepends_all_category() {
        let menu = MenuData::new(
            Client {
                id: "c1".to_string(),
                slug: "noodle-bar".to_string(),
                name: "Noodle Bar".to_string(),
                logo_url: None,
                tagline: Some("Slurp".to_string()),
                theme_primary: None,
                theme_secondary: None,
            },
            vec![Category {
                id: "soups".to_string(),
                name: "Soups".to_string(),
                position: 1,
            }],
            vec![
                MenuItem {
                    id: "ramen".to_string(),
                    category_id: Some("soups".to_string()),
                    name: "Ramen".to_string(),
                    description: None,
                    price_cents: 1450,
                    image_url: None,
                    is_special: false,
                    kind: None,
                    variant_label: None,
                },
                MenuItem {
                    id: "tea".to_string(),
                    category_id: None,
                    name: "Tea".to_string(),
                    description: None,
                    price_cents: 300,
                    image_url: None,
                    is_special: false,
                    kind: None,
                    variant_label: None,
                },
            ],
            DisplayConfig::default(),
        );

        let mobile = MobileMenu::from(&menu);

        assert_eq!(mobile.categories[0].id, ALL_CATEGORY_ID);
        assert_eq!(mobile.categories[1].name, "Soups");
        assert_eq!(mobile.items[0].price_text, "$14.50");
        assert_eq!(mobile.items[0].category_name, "Soups");
        assert_eq!(mobile.items[1].category_id, ALL_CATEGORY_ID);
        assert_eq!(mobile.items[1].category_name, "All");
        assert_eq!(mobile.client.tagline.as_deref(), Some("Slurp"));
    }
}
