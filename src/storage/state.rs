//! FarmLink state store
//!
//! Typed access to the three persisted slots:
//! - user: the signed-in shopper, or absent
//! - cart: ordered cart items
//! - orders: order history, newest first
//!
//! Each slot is serialized and deserialized as one JSON document on every
//! access. A slot that is missing, unreadable or does not parse as its record
//! type reads as absent (empty for collections); the failure is logged and
//! never returned to the caller. Within the cart and order slots an entry
//! that does not decode is skipped on its own, so the rest of the list
//! survives the next write.

use crate::storage::backend::KeyValueStore;
use crate::storage::error::StorageResult;
use crate::storage::types::{CartItem, Order, User};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A named slot in the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    User,
    Cart,
    Orders,
}

impl Slot {
    /// Key the slot is persisted under
    pub fn key(&self) -> &'static str {
        match self {
            Slot::User => "farmLinkUser",
            Slot::Cart => "farmLinkCart",
            Slot::Orders => "farmLinkOrders",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Typed view over a key-value backend
#[derive(Debug, Clone)]
pub struct StateStore<B> {
    backend: B,
}

impl<B: KeyValueStore> StateStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read and decode a slot; any failure reads as absent
    fn read<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let raw = match self.backend.get_item(slot.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read slot {}: {}", slot, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring malformed slot {}: {}", slot, e);
                None
            }
        }
    }

    /// Read a list slot, decoding each entry separately
    fn read_list<T: DeserializeOwned>(&self, slot: Slot) -> Vec<T> {
        let entries: Vec<serde_json::Value> = self.read(slot).unwrap_or_default();
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry {} in slot {}: {}", index, slot, e);
                    None
                }
            })
            .collect()
    }

    fn write<T: Serialize + ?Sized>(&mut self, slot: Slot, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(slot.key(), &raw)?;
        tracing::debug!("Wrote slot {} ({} bytes)", slot, raw.len());
        Ok(())
    }

    /// Current user, if one is signed in
    pub fn get_user(&self) -> Option<User> {
        self.read(Slot::User)
    }

    /// Replace the current user
    pub fn set_user(&mut self, user: &User) -> StorageResult<()> {
        self.write(Slot::User, user)
    }

    /// Clear the user slot; clearing an empty slot is a no-op
    pub fn logout(&mut self) -> StorageResult<()> {
        self.backend.remove_item(Slot::User.key())
    }

    /// Cart contents in insertion order
    pub fn get_cart(&self) -> Vec<CartItem> {
        self.read_list(Slot::Cart)
    }

    /// Replace the cart wholesale
    pub fn save_cart(&mut self, cart: &[CartItem]) -> StorageResult<()> {
        self.write(Slot::Cart, cart)
    }

    /// Order history, newest first
    pub fn get_orders(&self) -> Vec<Order> {
        self.read_list(Slot::Orders)
    }

    /// Replace the order history wholesale
    pub fn save_orders(&mut self, orders: &[Order]) -> StorageResult<()> {
        self.write(Slot::Orders, orders)
    }
}
