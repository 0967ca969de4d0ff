//! FarmLink storefront
//!
//! Owns the state store and implements the operations the UI triggers:
//! login/logout, adding and removing cart items, and placing orders.
//! `handle` is the single entry point for typed UI events; the individual
//! operations are public for callers that want the raw results.
//!
//! # Example
//!
//! ```rust
//! use farmlink::config::CheckoutConfig;
//! use farmlink::storage::{CartItem, MemoryStore};
//! use farmlink::storefront::{Page, Storefront, UiEvent};
//!
//! let mut shop = Storefront::new(MemoryStore::new(), CheckoutConfig::default());
//!
//! let potato = CartItem::new("Potato", "₹120 / kg".parse().unwrap(), "potato.webp");
//! let reaction = shop.handle(UiEvent::AddToCartClicked(potato)).unwrap();
//! assert_eq!(reaction.cart_count, Some(1));
//!
//! // Checkout requires a signed-in user
//! let reaction = shop.handle(UiEvent::CheckoutSubmitted).unwrap();
//! assert_eq!(reaction.navigate, Some(Page::Login));
//!
//! shop.login("asha@farm.example").unwrap();
//! let reaction = shop.handle(UiEvent::CheckoutSubmitted).unwrap();
//! assert_eq!(reaction.navigate, Some(Page::Orders));
//! assert_eq!(shop.cart_count(), 0);
//! ```

pub mod error;
pub mod events;
pub mod summary;

pub use error::{StorefrontError, StorefrontResult};
pub use events::{Page, Reaction, UiEvent};
pub use summary::CartSummary;

use crate::config::CheckoutConfig;
use crate::storage::{CartItem, KeyValueStore, Order, StateStore, User};
use crate::views::{CartView, NavbarView, OrderHistoryView};
use chrono::{DateTime, Utc};

/// The storefront service
#[derive(Debug)]
pub struct Storefront<B> {
    store: StateStore<B>,
    checkout: CheckoutConfig,
}

impl<B: KeyValueStore> Storefront<B> {
    pub fn new(backend: B, checkout: CheckoutConfig) -> Self {
        Self {
            store: StateStore::new(backend),
            checkout,
        }
    }

    pub fn store(&self) -> &StateStore<B> {
        &self.store
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.get_user()
    }

    /// Sign in as `email`; no credentials are checked
    pub fn login(&mut self, email: &str) -> StorefrontResult<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(StorefrontError::EmptyEmail);
        }

        let user = User::new(email);
        self.store.set_user(&user)?;
        tracing::info!("Logged in as {}", user.email);
        Ok(user)
    }

    pub fn logout(&mut self) -> StorefrontResult<()> {
        self.store.logout()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn cart(&self) -> Vec<CartItem> {
        self.store.get_cart()
    }

    pub fn cart_count(&self) -> usize {
        self.store.get_cart().len()
    }

    /// Append `item` to the cart and return the new item count
    ///
    /// Adding the same product twice yields two entries.
    pub fn add_to_cart(&mut self, item: CartItem) -> StorefrontResult<usize> {
        let mut cart = self.store.get_cart();
        tracing::info!("Adding {} ({}) to cart", item.name, item.price);
        cart.push(item);
        self.store.save_cart(&cart)?;
        Ok(cart.len())
    }

    /// Drop every cart entry named exactly `name`; returns how many were removed
    pub fn remove_from_cart(&mut self, name: &str) -> StorefrontResult<usize> {
        let mut cart = self.store.get_cart();
        let before = cart.len();
        cart.retain(|item| item.name != name);
        let removed = before - cart.len();

        self.store.save_cart(&cart)?;
        if removed == 0 {
            tracing::debug!("Nothing named {:?} in cart", name);
        } else {
            tracing::info!("Removed {} x {} from cart", removed, name);
        }
        Ok(removed)
    }

    pub fn cart_summary(&self) -> CartSummary {
        CartSummary::compute(&self.store.get_cart(), self.checkout.tax_rate)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.store.get_orders()
    }

    /// Place an order for the current cart, timestamped now
    pub fn place_order(&mut self) -> StorefrontResult<Order> {
        self.place_order_at(Utc::now())
    }

    /// Place an order for the current cart as of `now`
    ///
    /// Requires a signed-in user and a non-empty cart; otherwise nothing is
    /// written. On success the order is prepended to the history and the cart
    /// is emptied.
    pub fn place_order_at(&mut self, now: DateTime<Utc>) -> StorefrontResult<Order> {
        let user = self.store.get_user().ok_or(StorefrontError::NotLoggedIn)?;

        let cart = self.store.get_cart();
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let order = Order::new(
            &self.checkout.order_id_prefix,
            now,
            cart,
            self.checkout.delivery_days,
        );

        let mut orders = self.store.get_orders();
        orders.insert(0, order.clone());
        self.store.save_orders(&orders)?;
        self.store.save_cart(&[])?;

        tracing::info!(
            "Order {} placed by {} ({} items, delivery by {})",
            order.order_id,
            user.email,
            order.items.len(),
            order.delivery_estimate
        );
        Ok(order)
    }

    /// Handle a UI event timestamped now
    pub fn handle(&mut self, event: UiEvent) -> StorefrontResult<Reaction> {
        self.handle_at(event, Utc::now())
    }

    /// Handle a UI event as of `now`
    ///
    /// Unmet preconditions become notices and navigation; only storage
    /// failures are returned as errors.
    pub fn handle_at(&mut self, event: UiEvent, now: DateTime<Utc>) -> StorefrontResult<Reaction> {
        tracing::debug!("Handling {:?}", event);

        match event {
            UiEvent::LoginSubmitted { email } => match self.login(&email) {
                Ok(_) => Ok(Reaction::navigate(Page::Home)),
                Err(StorefrontError::EmptyEmail) => Ok(Reaction::none()),
                Err(e) => Err(e),
            },

            UiEvent::LogoutClicked => {
                self.logout()?;
                Ok(Reaction::navigate(Page::Home))
            }

            UiEvent::AddToCartClicked(item) => {
                let notice = format!("{} has been added to your cart!", item.name);
                let count = self.add_to_cart(item)?;
                Ok(Reaction::none().cart_count(count).notice(notice))
            }

            UiEvent::RemoveFromCartClicked { name } => {
                self.remove_from_cart(&name)?;
                Ok(Reaction {
                    rerender_cart: true,
                    ..Reaction::none()
                })
            }

            UiEvent::CheckoutSubmitted => match self.place_order_at(now) {
                Ok(order) => Ok(Reaction {
                    order: Some(order),
                    ..Reaction::navigate(Page::Orders).notice("Order placed successfully!")
                }),
                Err(e @ StorefrontError::NotLoggedIn) => {
                    Ok(Reaction::navigate(Page::Login).notice(e.to_string()))
                }
                Err(e @ StorefrontError::EmptyCart) => Ok(Reaction::none().notice(e.to_string())),
                Err(e) => Err(e),
            },
        }
    }

    pub fn navbar(&self) -> NavbarView {
        NavbarView::build(self.store.get_user().as_ref(), self.cart_count())
    }

    pub fn cart_view(&self) -> CartView {
        CartView::build(self.store.get_cart(), self.checkout.tax_rate)
    }

    pub fn order_history(&self) -> OrderHistoryView {
        OrderHistoryView::build(self.store.get_user().as_ref(), self.store.get_orders())
    }
}
