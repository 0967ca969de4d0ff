//! FarmLink storage layer
//!
//! This module provides the persisted client state:
//!
//! - **types**: Persisted records (User, CartItem, Price, Order)
//! - **backend**: Key-value backends (memory, file, browser local storage)
//! - **state**: `StateStore`, typed slot access over a backend
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//!   farmLinkUser   → { "email": ... } or absent
//!   farmLinkCart   → [ { "name", "price", "image" }, ... ]
//!   farmLinkOrders → [ { "orderId", "date", "items", "status", "deliveryEstimate" }, ... ]
//! ```
//!
//! # Example
//!
//! ```rust
//! use farmlink::storage::{CartItem, MemoryStore, StateStore};
//!
//! let mut store = StateStore::new(MemoryStore::new());
//! assert!(store.get_cart().is_empty());
//!
//! let potato = CartItem::new("Potato", "₹120 / kg".parse().unwrap(), "potato.webp");
//! store.save_cart(&[potato.clone()]).unwrap();
//! assert_eq!(store.get_cart(), vec![potato]);
//! ```

pub mod backend;
pub mod error;
pub mod state;
pub mod types;

// Re-export commonly used types
#[cfg(target_arch = "wasm32")]
pub use backend::LocalStorage;
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StorageError, StorageResult};
pub use state::{Slot, StateStore};
pub use types::{CartItem, Order, OrderDate, OrderStatus, Price, PriceError, User};
