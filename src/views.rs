//! Read-only view models
//!
//! Built from a store snapshot on every render; nothing here writes state.

use crate::storage::{CartItem, Order, User};
use crate::storefront::CartSummary;
use rust_decimal::Decimal;
use serde::Serialize;

/// A navbar link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const PUBLIC_LINKS: [NavLink; 3] = [
    NavLink {
        label: "Farmers",
        href: "farmers-list.html",
    },
    NavLink {
        label: "Marketplace",
        href: "marketplace.html",
    },
    NavLink {
        label: "About Us",
        href: "about.html",
    },
];

const ORDERS_LINK: NavLink = NavLink {
    label: "My Orders",
    href: "orders.html",
};

/// Navigation bar state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarView {
    pub links: Vec<NavLink>,
    /// `Hi, <name>` when signed in; the UI offers logout instead of login
    pub greeting: Option<String>,
    pub cart_count: usize,
}

impl NavbarView {
    pub fn build(user: Option<&User>, cart_count: usize) -> Self {
        let mut links = PUBLIC_LINKS.to_vec();
        if user.is_some() {
            links.push(ORDERS_LINK);
        }

        Self {
            links,
            greeting: user.map(|u| format!("Hi, {}", u.display_name())),
            cart_count,
        }
    }

    pub fn signed_in(&self) -> bool {
        self.greeting.is_some()
    }
}

/// Cart page state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartView {
    Empty,
    Items {
        items: Vec<CartItem>,
        summary: CartSummary,
    },
}

impl CartView {
    pub fn build(cart: Vec<CartItem>, tax_rate: Decimal) -> Self {
        if cart.is_empty() {
            return CartView::Empty;
        }
        let summary = CartSummary::compute(&cart, tax_rate);
        CartView::Items {
            items: cart,
            summary,
        }
    }

    /// Message shown in place of the item list, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CartView::Empty => Some("Your cart is empty."),
            CartView::Items { .. } => None,
        }
    }
}

/// Order history page state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "orders", rename_all = "snake_case")]
pub enum OrderHistoryView {
    LoginRequired,
    Empty,
    Orders(Vec<Order>),
}

impl OrderHistoryView {
    pub fn build(user: Option<&User>, orders: Vec<Order>) -> Self {
        if user.is_none() {
            OrderHistoryView::LoginRequired
        } else if orders.is_empty() {
            OrderHistoryView::Empty
        } else {
            OrderHistoryView::Orders(orders)
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            OrderHistoryView::LoginRequired => Some("Please login to see your orders."),
            OrderHistoryView::Empty => Some("You have not placed any orders yet."),
            OrderHistoryView::Orders(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_navbar_signed_out() {
        let nav = NavbarView::build(None, 0);
        assert!(!nav.signed_in());
        assert_eq!(nav.links.len(), 3);
        assert!(!nav.links.contains(&ORDERS_LINK));
    }

    #[test]
    fn test_navbar_signed_in() {
        let user = User::new("asha@farm.example");
        let nav = NavbarView::build(Some(&user), 4);

        assert_eq!(nav.greeting.as_deref(), Some("Hi, asha"));
        assert_eq!(nav.links.last(), Some(&ORDERS_LINK));
        assert_eq!(nav.cart_count, 4);
    }

    #[test]
    fn test_cart_view() {
        let view = CartView::build(Vec::new(), Decimal::new(5, 2));
        assert_eq!(view, CartView::Empty);
        assert_eq!(view.message(), Some("Your cart is empty."));

        let items = vec![CartItem::new("Potato", "₹120 / kg".parse().unwrap(), "p.webp")];
        match CartView::build(items.clone(), Decimal::new(5, 2)) {
            CartView::Items { items: shown, summary } => {
                assert_eq!(shown, items);
                assert_eq!(summary.total, Decimal::new(126, 0));
            }
            CartView::Empty => panic!("expected items"),
        }
    }

    #[test]
    fn test_order_history_view() {
        let user = User::new("asha@farm.example");
        let placed_at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let order = Order::new("FM", placed_at, Vec::new(), 5);

        assert_eq!(
            OrderHistoryView::build(None, vec![order.clone()]),
            OrderHistoryView::LoginRequired
        );
        assert_eq!(
            OrderHistoryView::build(Some(&user), Vec::new()),
            OrderHistoryView::Empty
        );
        assert_eq!(
            OrderHistoryView::build(Some(&user), vec![order.clone()]),
            OrderHistoryView::Orders(vec![order])
        );
    }

    #[test]
    fn test_views_serialize() {
        let json = serde_json::to_value(CartView::Empty).unwrap();
        assert_eq!(json, serde_json::json!({"state": "empty"}));

        let json = serde_json::to_value(OrderHistoryView::LoginRequired).unwrap();
        assert_eq!(json, serde_json::json!({"state": "login_required"}));
    }
}
