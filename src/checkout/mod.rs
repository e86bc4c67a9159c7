//! Checkout: validate a submitted cart and turn it into a hosted payment session.
//!
//! Prices and names always come from the menu store. The request only says which items
//! and how many, so a tampered body cannot change what the shopper pays.

use serde_json::Value;

use crate::cart::CheckoutItem;
use crate::config::Config;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::MenuData;
use crate::payments::{CheckoutLineItem, PaymentClient, SessionRequest};

pub const NO_ITEMS: &str = "No items provided";
pub const INVALID_ITEM: &str = "Invalid item payload";
pub const CLIENT_NOT_FOUND: &str = "Client not found";
pub const NO_VALID_ITEMS: &str = "No valid items found";

/// Check the shape of a checkout body: a non-empty `items` array of `{id, quantity}`.
pub fn parse_items(body: &Value) -> Result<Vec<CheckoutItem>, AppError> {
    let entries = match body.get("items") {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Err(AppError::Validation(NO_ITEMS.to_string())),
    };

    entries
        .iter()
        .map(|entry| parse_item(entry).ok_or_else(|| AppError::Validation(INVALID_ITEM.to_string())))
        .collect()
}

fn parse_item(entry: &Value) -> Option<CheckoutItem> {
    let id = entry.get("id")?.as_str()?.trim();
    if id.is_empty() {
        return None;
    }
    let quantity = positive_quantity(entry.get("quantity")?)?;
    Some(CheckoutItem {
        id: id.to_string(),
        quantity,
    })
}

// Whole numbers only; a hosted checkout line cannot hold a fractional quantity.
fn positive_quantity(value: &Value) -> Option<u32> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(q) = number.as_u64() {
        return u32::try_from(q).ok().filter(|q| *q > 0);
    }
    let q = number.as_f64()?;
    if q.is_finite() && q.fract() == 0.0 && q >= 1.0 && q <= f64::from(u32::MAX) {
        Some(q as u32)
    } else {
        None
    }
}

/// Price each requested item from the menu. Unknown ids are dropped.
pub fn build_line_items(
    menu: &MenuData,
    requested: &[CheckoutItem],
    currency: &str,
) -> Vec<CheckoutLineItem> {
    requested
        .iter()
        .filter_map(|entry| {
            let Some(item) = menu.find_item(&entry.id) else {
                tracing::debug!("Dropping unknown item {} from checkout", entry.id);
                return None;
            };
            Some(CheckoutLineItem {
                quantity: entry.quantity,
                unit_amount_cents: item.price_cents,
                currency: currency.to_string(),
                name: item.name.clone(),
                description: item.description.clone(),
            })
        })
        .collect()
}

/// Run the whole checkout for `slug` and return the hosted payment URL.
pub async fn initiate_checkout(
    repo: &Repository,
    http: &reqwest::Client,
    config: &Config,
    slug: &str,
    body: &Value,
) -> Result<String, AppError> {
    let requested = parse_items(body)?;

    let menu = repo
        .get_menu_by_slug(slug)
        .await
        .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))?;

    let line_items = build_line_items(&menu, &requested, &config.currency);
    if line_items.is_empty() {
        return Err(AppError::Validation(NO_VALID_ITEMS.to_string()));
    }

    let (Some(success_url), Some(cancel_url)) = (
        config.checkout_success_url.clone(),
        config.checkout_cancel_url.clone(),
    ) else {
        return Err(AppError::Misconfigured(
            "Checkout redirect URLs are not configured".to_string(),
        ));
    };

    let payments = PaymentClient::from_config(http.clone(), config).ok_or_else(|| {
        AppError::Misconfigured("Payment API secret key is not configured".to_string())
    })?;

    let request = SessionRequest {
        line_items,
        success_url,
        cancel_url,
    };
    let url = payments.create_session_url(&request).await?;

    tracing::info!(
        "Created checkout session for {} with {} line item(s)",
        slug,
        request.line_items.len()
    );

    Ok(url)
}
