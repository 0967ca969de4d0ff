//! UI event payloads and the reactions the storefront sends back
//!
//! Each event is handled to completion before the next one; a reaction tells
//! the UI layer what to show (a notice, a cart badge), whether to re-render
//! the cart, and where to navigate.

use crate::storage::{CartItem, Order};
use serde::Serialize;

/// Pages the storefront can send the shopper to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Login,
    Orders,
}

impl Page {
    /// Document the page is served from
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Login => "login.html",
            Page::Orders => "orders.html",
        }
    }
}

/// Typed UI events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    LoginSubmitted { email: String },
    LogoutClicked,
    AddToCartClicked(CartItem),
    RemoveFromCartClicked { name: String },
    CheckoutSubmitted,
}

/// What the UI should do after an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reaction {
    /// Blocking message to show the shopper
    pub notice: Option<String>,
    pub navigate: Option<Page>,
    /// New value for the cart badge
    pub cart_count: Option<usize>,
    pub rerender_cart: bool,
    /// Order created by a successful checkout
    pub order: Option<Order>,
}

impl Reaction {
    /// Nothing to do
    pub fn none() -> Self {
        Self::default()
    }

    pub fn navigate(page: Page) -> Self {
        Self {
            navigate: Some(page),
            ..Self::default()
        }
    }

    /// Builder method: attach a notice
    pub fn notice(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(message.into());
        self
    }

    /// Builder method: attach a cart badge update
    pub fn cart_count(mut self, count: usize) -> Self {
        self.cart_count = Some(count);
        self
    }

    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }
}
