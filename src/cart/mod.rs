//! Shopping cart for a single ordering session.
//!
//! Quantities are always positive: an entry whose quantity drops to zero or below is
//! removed. Totals are integer cents.

use serde::{Deserialize, Serialize};

use crate::models::MenuItem;

/// One cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents * i64::from(self.quantity)
    }
}

/// A single `{id, quantity}` entry of a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutItem {
    pub id: String,
    pub quantity: u32,
}

/// Body sent to the checkout endpoint. Carries no prices or names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutPayload {
    pub items: Vec<CheckoutItem>,
}

/// Selected items keyed by id, in the order they were first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `item`.
    pub fn add(&mut self, item: &MenuItem) {
        match self.position(&item.id) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.quantity = entry.quantity.saturating_add(1);
            }
            None => self.entries.push(CartItem {
                id: item.id.clone(),
                name: item.name.clone(),
                price_cents: item.price_cents,
                quantity: 1,
            }),
        }
    }

    /// Change the quantity of `id` by `delta`. Unknown ids are ignored.
    pub fn adjust(&mut self, id: &str, delta: i64) {
        let Some(index) = self.position(id) else {
            return;
        };

        let next = i64::from(self.entries[index].quantity).saturating_add(delta);
        if next <= 0 {
            self.entries.remove(index);
        } else {
            self.entries[index].quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn total_cents(&self) -> i64 {
        self.entries.iter().map(CartItem::line_total_cents).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The normalized request body for checkout.
    pub fn checkout_payload(&self) -> CheckoutPayload {
        CheckoutPayload {
            items: self
                .entries
                .iter()
                .map(|entry| CheckoutItem {
                    id: entry.id.clone(),
                    quantity: entry.quantity,
                })
                .collect(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            category_id: None,
            name: format!("Item {}", id),
            description: None,
            price_cents,
            image_url: None,
            is_special: false,
            kind: None,
            variant_label: None,
        }
    }

    fn assert_consistent(cart: &Cart) {
        assert!(cart.items().iter().all(|entry| entry.quantity > 0));
        let expected: i64 = cart
            .items()
            .iter()
            .map(|entry| entry.price_cents * i64::from(entry.quantity))
            .sum();
        assert_eq!(cart.total_cents(), expected);
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        let burger = item("a", 500);

        cart.add(&burger);
        assert_eq!(cart.get("a").unwrap().quantity, 1);
        cart.add(&burger);
        assert_eq!(cart.get("a").unwrap().quantity, 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_matches_line_totals() {
        let mut cart = Cart::new();
        let a = item("a", 500);
        let b = item("b", 300);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        assert_eq!(cart.total_cents(), 1300);
        assert_consistent(&cart);
    }

    #[test]
    fn test_adjust_to_zero_removes_entry() {
        let mut cart = Cart::new();
        let a = item("a", 500);
        let b = item("b", 300);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);

        cart.adjust("a", -2);

        assert!(cart.get("a").is_none());
        assert_eq!(cart.total_cents(), 300);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_adjust_below_zero_removes_entry() {
        let mut cart = Cart::new();
        cart.add(&item("a", 250));
        cart.adjust("a", -5);
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn test_adjust_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item("a", 250));
        cart.adjust("missing", 3);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_cents(), 250);
    }

    #[test]
    fn test_adjust_up_and_down() {
        let mut cart = Cart::new();
        cart.add(&item("a", 199));
        cart.adjust("a", 4);
        assert_eq!(cart.get("a").unwrap().quantity, 5);
        cart.adjust("a", -1);
        assert_eq!(cart.get("a").unwrap().quantity, 4);
        assert_eq!(cart.total_cents(), 796);
    }

    #[test]
    fn test_random_walk_keeps_invariants() {
        let menu: Vec<MenuItem> = (0..5).map(|i| item(&i.to_string(), 100 + i * 37)).collect();
        let mut cart = Cart::new();

        // Small linear congruential walk so the sequence is deterministic.
        let mut seed: u64 = 42;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let pick = (seed >> 33) as usize % menu.len();
            if (seed >> 20) % 3 == 0 {
                cart.add(&menu[pick]);
            } else {
                let delta = ((seed >> 40) % 7) as i64 - 3;
                cart.adjust(&menu[pick].id, delta);
            }
            assert_consistent(&cart);
        }
    }

    #[test]
    fn test_checkout_payload_has_ids_and_quantities_only() {
        let mut cart = Cart::new();
        cart.add(&item("b", 300));
        cart.add(&item("a", 500));
        cart.add(&item("a", 500));

        let payload = cart.checkout_payload();
        assert_eq!(
            payload.items,
            vec![
                CheckoutItem {
                    id: "b".to_string(),
                    quantity: 1
                },
                CheckoutItem {
                    id: "a".to_string(),
                    quantity: 2
                },
            ]
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["items"][0].get("priceCents").is_none());

        cart.clear();
        assert!(cart.checkout_payload().items.is_empty());
    }
}
