//! Splits a menu into fixed-capacity pages grouped by category.

use serde::Serialize;

use crate::models::{Category, MenuItem};

pub const UNCATEGORIZED_NAME: &str = "Uncategorized";
pub const MENU_NAME: &str = "Menu";

/// One screenful of items from a single category.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub category_id: Option<String>,
    pub category_name: String,
    pub items: Vec<MenuItem>,
}

/// Build the rotation pages for a menu.
///
/// Categories are visited by ascending `position` (ties keep input order). A category
/// spanning several pages gets a 1-based ` (n)` suffix. Items with no category are
/// collected into a trailing "Uncategorized" group, while items pointing at a category
/// that was not loaded are left off the board. With no categories at all the whole menu
/// is a single "Menu" group.
pub fn paginate(categories: &[Category], items: &[MenuItem], capacity: usize) -> Vec<Page> {
    let capacity = capacity.max(1);
    let mut pages = Vec::new();

    if categories.is_empty() {
        push_group(&mut pages, None, MENU_NAME, items.iter().collect(), capacity);
        return pages;
    }

    let mut ordered: Vec<&Category> = categories.iter().collect();
    ordered.sort_by_key(|category| category.position);

    for category in &ordered {
        let group = items
            .iter()
            .filter(|item| item.category_id.as_deref() == Some(category.id.as_str()))
            .collect();
        push_group(
            &mut pages,
            Some(category.id.as_str()),
            &category.name,
            group,
            capacity,
        );
    }

    let uncategorized = items
        .iter()
        .filter(|item| item.category_id.is_none())
        .collect();
    push_group(&mut pages, None, UNCATEGORIZED_NAME, uncategorized, capacity);

    pages
}

fn push_group(
    pages: &mut Vec<Page>,
    category_id: Option<&str>,
    name: &str,
    items: Vec<&MenuItem>,
    capacity: usize,
) {
    if items.is_empty() {
        return;
    }

    let chunk_count = items.len().div_ceil(capacity);
    for (index, chunk) in items.chunks(capacity).enumerate() {
        let category_name = if chunk_count > 1 {
            format!("{} ({})", name, index + 1)
        } else {
            name.to_string()
        };
        pages.push(Page {
            category_id: category_id.map(str::to_string),
            category_name,
            items: chunk.iter().map(|item| (*item).clone()).collect(),
        });
    }
}
