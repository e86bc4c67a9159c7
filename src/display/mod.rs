//! TV display: pagination, rotation and the snapshot served to display screens.

mod carousel;
mod pages;

pub use carousel::*;
pub use pages::*;

use chrono::Utc;
use serde::Serialize;

use crate::models::{format_price, Client, ItemKind, MenuData, MenuItem, SpecialsArea, Theme};

/// How long each special stays on the slider.
pub const SPECIALS_ROTATE_MS: u64 = 6_000;

/// A special as shown on the TV slider.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySpecial {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_text: String,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl From<&MenuItem> for DisplaySpecial {
    fn from(item: &MenuItem) -> Self {
        // The variant label wins; otherwise anything that is not a plain single.
        let badge = item.variant_label.clone().or_else(|| match item.kind {
            Some(kind) if kind != ItemKind::Single => Some(kind.as_str().to_string()),
            _ => None,
        });
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price_text: format_price(item.price_cents),
            image_url: item.image_url.clone(),
            badge,
        }
    }
}

/// Everything a display screen needs to render one client's board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    pub client: Client,
    pub theme: Theme,
    pub specials_area: SpecialsArea,
    pub rotate_ms: u64,
    pub capacity: usize,
    pub specials_rotate_ms: u64,
    pub specials: Vec<DisplaySpecial>,
    pub pages: Vec<Page>,
    pub generated_at: String,
}

impl DisplaySnapshot {
    pub fn from_menu(menu: &MenuData) -> Self {
        let config = &menu.display_config;
        let capacity = config.capacity();
        Self {
            client: menu.client.clone(),
            theme: config.theme(),
            specials_area: config.specials_area,
            rotate_ms: config.rotate_ms,
            capacity,
            specials_rotate_ms: SPECIALS_ROTATE_MS,
            specials: menu.specials.iter().map(DisplaySpecial::from).collect(),
            pages: paginate(&menu.categories, &menu.items, capacity),
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// True when there is nothing to show and the screen should render its empty state.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Specials the slider should cycle through; none when the layout hides the area.
    pub fn slider_specials(&self) -> &[DisplaySpecial] {
        match self.specials_area {
            SpecialsArea::None => &[],
            _ => &self.specials,
        }
    }
}

/// One rotation step pushed to a connected display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEvent {
    pub index: usize,
    pub page_count: usize,
    pub page: Option<Page>,
}

impl PageEvent {
    pub fn at(pages: &[Page], index: usize) -> Self {
        Self {
            index,
            page_count: pages.len(),
            page: pages.get(index).or_else(|| pages.first()).cloned(),
        }
    }
}

/// One slider step pushed to a connected display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEvent {
    pub index: usize,
    pub count: usize,
    pub special: DisplaySpecial,
}

impl SpecialEvent {
    /// `None` when there are no specials to show.
    pub fn at(specials: &[DisplaySpecial], index: usize) -> Option<Self> {
        let special = specials.get(index).or_else(|| specials.first())?;
        Some(Self {
            index,
            count: specials.len(),
            special: special.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, DisplayConfig};
    use serde_json::json;

    fn menu(item_count: usize, layout: serde_json::Value) -> MenuData {
        let client = Client {
            id: "c1".to_string(),
            slug: "diner".to_string(),
            name: "Diner".to_string(),
            logo_url: None,
            tagline: None,
            theme_primary: None,
            theme_secondary: None,
        };
        let categories = vec![Category {
            id: "mains".to_string(),
            name: "Mains".to_string(),
            position: 0,
        }];
        let items = (0..item_count)
            .map(|i| MenuItem {
                id: format!("item-{}", i),
                category_id: Some("mains".to_string()),
                name: format!("Dish {}", i),
                description: None,
                price_cents: 900,
                image_url: None,
                is_special: i == 0,
                kind: None,
                variant_label: None,
            })
            .collect();
        MenuData::new(
            client,
            categories,
            items,
            DisplayConfig::resolve(Some(&layout)),
        )
    }

    #[test]
    fn test_snapshot_uses_resolved_capacity() {
        let snapshot = DisplaySnapshot::from_menu(&menu(10, json!({ "itemsPerPage": 4 })));
        assert_eq!(snapshot.capacity, 4);
        assert_eq!(snapshot.pages.len(), 3);
        assert_eq!(snapshot.specials.len(), 1);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_snapshot_of_empty_menu() {
        let snapshot = DisplaySnapshot::from_menu(&menu(0, json!({ "specialsArea": "none" })));
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.specials_area, SpecialsArea::None);

        let event = PageEvent::at(&snapshot.pages, 0);
        assert_eq!(event.page_count, 0);
        assert!(event.page.is_none());
    }

    #[test]
    fn test_page_event_falls_back_to_first_page() {
        let snapshot = DisplaySnapshot::from_menu(&menu(5, json!({ "rows": 1, "cols": 2 })));
        let event = PageEvent::at(&snapshot.pages, 99);
        assert_eq!(event.page_count, 3);
        assert_eq!(event.page.unwrap().category_name, "Mains (1)");
    }

    fn special(kind: Option<ItemKind>, variant_label: Option<&str>) -> MenuItem {
        MenuItem {
            id: "combo-1".to_string(),
            category_id: None,
            name: "Family Box".to_string(),
            description: Some("Feeds four".to_string()),
            price_cents: 2450,
            image_url: None,
            is_special: true,
            kind,
            variant_label: variant_label.map(str::to_string),
        }
    }

    #[test]
    fn test_special_badge_prefers_variant_label() {
        let shown = DisplaySpecial::from(&special(Some(ItemKind::Combo), Some("Large")));
        assert_eq!(shown.badge.as_deref(), Some("Large"));
        assert_eq!(shown.price_text, "$24.50");

        let shown = DisplaySpecial::from(&special(Some(ItemKind::Combo), None));
        assert_eq!(shown.badge.as_deref(), Some("combo"));

        let shown = DisplaySpecial::from(&special(Some(ItemKind::Addon), None));
        assert_eq!(shown.badge.as_deref(), Some("addon"));
    }

    #[test]
    fn test_plain_special_has_no_badge() {
        assert_eq!(DisplaySpecial::from(&special(Some(ItemKind::Single), None)).badge, None);
        let shown = DisplaySpecial::from(&special(None, None));
        assert_eq!(shown.badge, None);

        let json = serde_json::to_value(&shown).unwrap();
        assert_eq!(json["priceText"], "$24.50");
        assert!(json.get("badge").is_none());
    }

    #[test]
    fn test_hidden_specials_area_leaves_slider_empty() {
        let snapshot = DisplaySnapshot::from_menu(&menu(3, json!({ "specialsArea": "none" })));
        assert_eq!(snapshot.specials.len(), 1);
        assert!(snapshot.slider_specials().is_empty());
        assert!(SpecialEvent::at(snapshot.slider_specials(), 0).is_none());

        let snapshot = DisplaySnapshot::from_menu(&menu(3, json!({})));
        assert_eq!(snapshot.specials_rotate_ms, SPECIALS_ROTATE_MS);
        let event = SpecialEvent::at(snapshot.slider_specials(), 0).unwrap();
        assert_eq!(event.count, 1);
        assert_eq!(event.special.id, "item-0");
    }
}
