//! # FarmLink
//!
//! Client state for the FarmLink farm-produce storefront: the signed-in user,
//! the shopping cart and the order history, persisted in a key-value store
//! that survives restarts.
//!
//! ## Modules
//!
//! - [`storage`]: Persisted records, key-value backends and the typed state store
//! - [`storefront`]: Login, cart and checkout operations plus UI event handling
//! - [`views`]: Read-only navbar, cart and order-history view models
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use farmlink::{CartItem, CheckoutConfig, MemoryStore, Storefront};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut shop = Storefront::new(MemoryStore::new(), CheckoutConfig::default());
//!
//!     shop.login("asha@farm.example")?;
//!     shop.add_to_cart(CartItem::new("Potato", "₹120 / kg".parse()?, "potato.webp"))?;
//!     shop.add_to_cart(CartItem::new("Red Apples", "₹180 / kg".parse()?, "apples.jpg"))?;
//!
//!     let summary = shop.cart_summary();
//!     println!("Total: {}", summary.total);
//!
//!     let order = shop.place_order()?;
//!     println!("Placed {} with {} items", order.order_id, order.items.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod storage;
pub mod storefront;
pub mod views;

// Re-export top-level types for convenience
pub use storage::{
    CartItem, FileStore, KeyValueStore, MemoryStore, Order, OrderDate, OrderStatus, Price,
    PriceError, Slot, StateStore, StorageError, StorageResult, User,
};

pub use storefront::{
    CartSummary, Page, Reaction, Storefront, StorefrontError, StorefrontResult, UiEvent,
};

pub use views::{CartView, NavLink, NavbarView, OrderHistoryView};

pub use config::{CheckoutConfig, Config, ConfigError, LoggingConfig, StorageConfig};
