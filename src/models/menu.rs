//! Menu snapshot models served to the display and ordering clients.

use serde::{Deserialize, Serialize};

use super::DisplayConfig;

/// A restaurant whose menu is served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub tagline: Option<String>,
    pub theme_primary: Option<String>,
    pub theme_secondary: Option<String>,
}

/// A menu section; `position` defines display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub position: i64,
}

/// How an item is sold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Single,
    Combo,
    Addon,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Single => "single",
            ItemKind::Combo => "combo",
            ItemKind::Addon => "addon",
        }
    }

    /// Parse a stored kind; unknown values are treated as absent.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(ItemKind::Single),
            "combo" => Some(ItemKind::Combo),
            "addon" => Some(ItemKind::Addon),
            _ => None,
        }
    }
}

/// A visible, priced menu item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// Price in currency minor units
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub is_special: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<ItemKind>,
    #[serde(default)]
    pub variant_label: Option<String>,
}

/// Everything a client-facing view needs for one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuData {
    pub client: Client,
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
    pub specials: Vec<MenuItem>,
    pub display_config: DisplayConfig,
}

impl MenuData {
    /// Assemble a snapshot, deriving specials from the item list.
    pub fn new(
        client: Client,
        categories: Vec<Category>,
        items: Vec<MenuItem>,
        display_config: DisplayConfig,
    ) -> Self {
        let specials = items.iter().filter(|item| item.is_special).cloned().collect();
        Self {
            client,
            categories,
            items,
            specials,
            display_config,
        }
    }

    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}

/// Format minor units as a dollar price, e.g. `1250` -> `$12.50`.
pub fn format_price(price_cents: i64) -> String {
    let sign = if price_cents < 0 { "-" } else { "" };
    let cents = price_cents.unsigned_abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}
