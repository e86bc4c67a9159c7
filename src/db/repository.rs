//! Read access to the menu store.
//!
//! The client lookup fails closed. Category, item and layout lookups are best-effort:
//! when one of them fails the snapshot is still served with that part empty or defaulted.

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::{Category, Client, DisplayConfig, ItemKind, MenuData, MenuItem};

/// Database repository for menu reads.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load the full menu for a client, or `None` when the client cannot be found.
    pub async fn get_menu_by_slug(&self, slug: &str) -> Option<MenuData> {
        let client = match self.find_client_by_slug(slug).await {
            Ok(Some(client)) => client,
            Ok(None) => {
                tracing::info!("No client for slug {:?}", slug);
                return None;
            }
            Err(e) => {
                tracing::error!("Failed to load client for slug {:?}: {}", slug, e);
                return None;
            }
        };

        let categories = self.list_categories(&client.id).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load categories for client {}: {}", client.id, e);
            Vec::new()
        });

        let items = self.list_visible_items(&client.id).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load menu items for client {}: {}", client.id, e);
            Vec::new()
        });

        let layout = self.find_layout_config(&client.id).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load display config for client {}: {}", client.id, e);
            None
        });
        let display_config = DisplayConfig::resolve(layout.as_ref());

        Some(MenuData::new(client, categories, items, display_config))
    }

    /// Look up a client by its slug.
    pub async fn find_client_by_slug(&self, slug: &str) -> Result<Option<Client>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, slug, name, logo_url, tagline, theme_primary, theme_secondary FROM clients WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(client_from_row).transpose()
    }

    /// Categories of a client by ascending position.
    pub async fn list_categories(&self, client_id: &str) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, name, position FROM menu_categories WHERE client_id = ? ORDER BY position ASC, rowid ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(category_from_row).collect()
    }

    /// Visible items of a client in creation order.
    pub async fn list_visible_items(&self, client_id: &str) -> Result<Vec<MenuItem>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, category_id, name, description, price_cents, image_url, is_special, kind, variant_label
            FROM menu_items
            WHERE client_id = ? AND is_visible = 1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }

    /// The earliest stored layout blob for a client, if any.
    pub async fn find_layout_config(&self, client_id: &str) -> Result<Option<Value>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT layout_config FROM display_configs WHERE client_id = ? ORDER BY created_at ASC, rowid ASC LIMIT 1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let raw: Option<String> = row.try_get("layout_config")?;

        Ok(raw.and_then(|text| match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring unparseable layout for client {}: {}", client_id, e);
                None
            }
        }))
    }
}

fn client_from_row(row: &SqliteRow) -> Result<Client, sqlx::Error> {
    Ok(Client {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        name: row.try_get("name")?,
        logo_url: row.try_get("logo_url")?,
        tagline: row.try_get("tagline")?,
        theme_primary: row.try_get("theme_primary")?,
        theme_secondary: row.try_get("theme_secondary")?,
    })
}

fn category_from_row(row: &SqliteRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        position: row.try_get("position")?,
    })
}

fn item_from_row(row: &SqliteRow) -> Result<MenuItem, sqlx::Error> {
    let kind: Option<String> = row.try_get("kind")?;
    Ok(MenuItem {
        id: row.try_get("id")?,
        category_id: row.try_get("category_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price_cents: row.try_get("price_cents")?,
        image_url: row.try_get("image_url")?,
        is_special: row.try_get("is_special")?,
        kind: kind.as_deref().and_then(ItemKind::parse),
        variant_label: row.try_get("variant_label")?,
    })
}
