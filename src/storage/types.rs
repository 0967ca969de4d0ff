//! Core data types persisted by the FarmLink state store
//!
//! This module defines the records kept in the three store slots:
//! - `User`: the signed-in shopper (email only)
//! - `CartItem` and `Price`: products added to the cart
//! - `Order` and `OrderStatus`: placed orders in the history

use chrono::{DateTime, Days, NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// The signed-in shopper
///
/// Login is trust-on-submit: there is no password or session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Name shown in the navbar greeting: the part of the email before `@`
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

/// Errors produced when parsing a display price string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price is empty")]
    Empty,

    #[error("Unrecognized price format: {0:?}")]
    Malformed(String),

    #[error("Invalid price amount: {0}")]
    Amount(String),
}

/// A product price such as `₹120 / kg`
///
/// Parsed once from its display form when a product enters the system.
/// The amount is an exact decimal, so summing prices never drifts.
/// The display text is kept as entered and is what gets serialized, so a
/// stored price reads back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    currency: String,
    amount: Decimal,
    unit: Option<String>,
    text: String,
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<currency>[^\d\-]*?)\s*(?P<amount>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)\s*(?:/\s*(?P<unit>\S.*?))?\s*$",
        )
        .expect("price pattern compiles")
    })
}

/// Canonical display text for a price built from parts
///
/// A currency ending in a letter, digit or `.` is followed by a space so the
/// amount reads back as written (`Rs. 75`, not `Rs.75`).
fn render(currency: &str, amount: Decimal, unit: Option<&str>) -> String {
    let mut text = currency.to_string();
    if currency
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '.')
    {
        text.push(' ');
    }
    text.push_str(&amount.to_string());
    if let Some(unit) = unit {
        text.push_str(" / ");
        text.push_str(unit);
    }
    text
}

impl Price {
    pub fn new(currency: impl Into<String>, amount: Decimal) -> Self {
        let currency = currency.into();
        let text = render(&currency, amount, None);
        Self {
            currency,
            amount,
            unit: None,
            text,
        }
    }

    /// Builder method: set the selling unit
    pub fn per(mut self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        self.text = render(&self.currency, self.amount, Some(&unit));
        self.unit = Some(unit);
        self
    }

    /// Currency symbol or code written before the amount (may be empty)
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Non-negative amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Selling unit written after `/`, e.g. `kg`, `250g`, `dozen`
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Display text, as entered
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let caps = price_pattern()
            .captures(s)
            .ok_or_else(|| PriceError::Malformed(s.to_string()))?;

        let raw_amount = caps["amount"].replace(',', "");
        let raw_amount = if raw_amount.starts_with('.') {
            format!("0{}", raw_amount)
        } else {
            raw_amount
        };
        let amount = Decimal::from_str(&raw_amount)
            .map_err(|e| PriceError::Amount(format!("{}: {}", raw_amount, e)))?;

        Ok(Self {
            currency: caps["currency"].trim().to_string(),
            amount,
            unit: caps.name("unit").map(|m| m.as_str().trim().to_string()),
            text: s.to_string(),
        })
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.text
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A product line in the cart
///
/// Identity is `name`; it is not unique, and removal by name drops every
/// entry that shares it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub price: Price,
    /// Image URL
    pub image: String,
}

impl CartItem {
    pub fn new(name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// Fulfilment status of an order
///
/// Orders are created as `Processing` and never transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Processing => write!(f, "Processing"),
        }
    }
}

/// A calendar date on an order
///
/// New orders carry a `YYYY-MM-DD` date. Histories written by earlier
/// clients hold locale-formatted text such as `10/16/2026`; that text is kept
/// verbatim so those orders survive a rewrite of the slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderDate {
    Date(NaiveDate),
    Text(String),
}

impl OrderDate {
    /// The parsed date, if this is not free-form text
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            OrderDate::Date(date) => Some(*date),
            OrderDate::Text(_) => None,
        }
    }
}

impl From<NaiveDate> for OrderDate {
    fn from(date: NaiveDate) -> Self {
        OrderDate::Date(date)
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDate::Date(date) => write!(f, "{}", date),
            OrderDate::Text(text) => f.write_str(text),
        }
    }
}

/// A placed order, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Prefix followed by the placement time in Unix milliseconds
    pub order_id: String,
    /// Calendar date (UTC) the order was placed
    pub date: OrderDate,
    /// Snapshot of the cart at checkout
    pub items: Vec<CartItem>,
    pub status: OrderStatus,
    pub delivery_estimate: OrderDate,
}

impl Order {
    /// Build an order placed at `placed_at` from a cart snapshot
    ///
    /// A delivery estimate past the end of the calendar clamps to the last
    /// representable date.
    pub fn new(
        id_prefix: &str,
        placed_at: DateTime<Utc>,
        items: Vec<CartItem>,
        delivery_days: u32,
    ) -> Self {
        let date = placed_at.date_naive();
        let delivery = date
            .checked_add_days(Days::new(u64::from(delivery_days)))
            .unwrap_or(NaiveDate::MAX);
        Self {
            order_id: format!("{}{}", id_prefix, placed_at.timestamp_millis()),
            date: date.into(),
            items,
            status: OrderStatus::Processing,
            delivery_estimate: delivery.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_display_name() {
        assert_eq!(User::new("asha@farm.example").display_name(), "asha");
        assert_eq!(User::new("no-at-sign").display_name(), "no-at-sign");
        assert_eq!(User::new("@host").display_name(), "");
    }

    #[test]
    fn test_price_parsing() {
        let price: Price = "₹120 / kg".parse().unwrap();
        assert_eq!(price.currency(), "₹");
        assert_eq!(price.amount(), Decimal::from(120));
        assert_eq!(price.unit(), Some("kg"));

        let price: Price = "$4.99 / lb".parse().unwrap();
        assert_eq!(price.currency(), "$");
        assert_eq!(price.amount(), Decimal::from_str("4.99").unwrap());

        let price: Price = "₹250 / 250g".parse().unwrap();
        assert_eq!(price.amount(), Decimal::from(250));
        assert_eq!(price.unit(), Some("250g"));

        let price: Price = "  Rs. 75  ".parse().unwrap();
        assert_eq!(price.currency(), "Rs.");
        assert_eq!(price.amount(), Decimal::from(75));
        assert_eq!(price.unit(), None);

        let price: Price = "$.50/each".parse().unwrap();
        assert_eq!(price.amount(), Decimal::from_str("0.50").unwrap());
        assert_eq!(price.unit(), Some("each"));
    }

    #[test]
    fn test_price_thousands_separator() {
        let price: Price = "₹1,200 / kg".parse().unwrap();
        assert_eq!(price.amount(), Decimal::from(1200));
        assert_eq!(price.to_string(), "₹1,200 / kg");

        let price: Price = "$12,345.67".parse().unwrap();
        assert_eq!(price.amount(), Decimal::from_str("12345.67").unwrap());
    }

    #[test]
    fn test_price_display_reparses() {
        let inputs = [
            "₹120 / kg",
            "$4.99 / lb",
            "₹250 / 250g",
            "Rs. 75",
            "$.50/each",
            "₹1,200 / kg",
            "$12,345.67",
            "42",
        ];
        for input in inputs {
            let price: Price = input.parse().unwrap();
            let reparsed: Price = price.to_string().parse().unwrap();
            assert_eq!(reparsed, price, "{input}");
            assert_eq!(reparsed.amount(), price.amount(), "{input}");
        }
    }

    #[test]
    fn test_price_json_keeps_text() {
        let item = CartItem::new("Herbs", "Rs. 75".parse().unwrap(), "herbs.jpg");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""price":"Rs. 75""#));

        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price.amount(), Decimal::from(75));
        assert_eq!(back, item);
    }

    #[test]
    fn test_price_rejects_garbage() {
        assert_eq!("".parse::<Price>(), Err(PriceError::Empty));
        assert!(matches!("free".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("$-4.00".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("12,00 / kg".parse::<Price>(), Err(PriceError::Malformed(_))));
        assert!(matches!("$4 and $5".parse::<Price>(), Err(PriceError::Malformed(_))));
    }

    #[test]
    fn test_price_display() {
        let price = Price::new("$", Decimal::from_str("2.00").unwrap()).per("lb");
        assert_eq!(price.to_string(), "$2.00 / lb");
        assert_eq!(Price::new("", Decimal::from(3)).to_string(), "3");

        let price = Price::new("Rs.", Decimal::from(75));
        assert_eq!(price.to_string(), "Rs. 75");
        assert_eq!(price.to_string().parse::<Price>().unwrap(), price);
        assert_eq!(Price::new("USD", Decimal::from(5)).to_string(), "USD 5");
    }

    #[test]
    fn test_cart_item_json_layout() {
        let item = CartItem::new("Potato", "₹120 / kg".parse().unwrap(), "potato.webp");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Potato", "price": "₹120 / kg", "image": "potato.webp"})
        );

        let bad = r#"{"name": "Potato", "price": "ask us", "image": "potato.webp"}"#;
        assert!(serde_json::from_str::<CartItem>(bad).is_err());
    }

    #[test]
    fn test_order_creation() {
        let placed_at = Utc.with_ymd_and_hms(2026, 12, 29, 10, 30, 0).unwrap();
        let items = vec![CartItem::new("Red Apples", "₹180 / kg".parse().unwrap(), "apples.jpg")];
        let order = Order::new("FM", placed_at, items.clone(), 5);

        assert_eq!(order.order_id, format!("FM{}", placed_at.timestamp_millis()));
        assert_eq!(order.date.as_date(), NaiveDate::from_ymd_opt(2026, 12, 29));
        assert_eq!(order.delivery_estimate.as_date(), NaiveDate::from_ymd_opt(2027, 1, 3));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items, items);
    }

    #[test]
    fn test_order_json_layout() {
        let placed_at = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        let order = Order::new("FM", placed_at, Vec::new(), 5);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["date"], "2026-10-16");
        assert_eq!(json["deliveryEstimate"], "2026-10-21");
        assert_eq!(json["status"], "Processing");
        assert!(json["orderId"].as_str().unwrap().starts_with("FM"));
    }

    #[test]
    fn test_order_delivery_overflow_clamps() {
        let placed_at = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
        let order = Order::new("FM", placed_at, Vec::new(), u32::MAX);
        assert_eq!(order.delivery_estimate.as_date(), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_order_reads_locale_dates() {
        let raw = r#"{
            "orderId": "FM1760601600000",
            "date": "10/16/2026",
            "items": [{"name": "Potato", "price": "₹120 / kg", "image": "potato.webp"}],
            "status": "Processing",
            "deliveryEstimate": "10/21/2026"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.date, OrderDate::Text("10/16/2026".to_string()));
        assert_eq!(order.delivery_estimate.to_string(), "10/21/2026");

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["date"], "10/16/2026");
        assert_eq!(json["deliveryEstimate"], "10/21/2026");

        let iso: OrderDate = serde_json::from_str(r#""2026-10-16""#).unwrap();
        assert_eq!(iso.as_date(), NaiveDate::from_ymd_opt(2026, 10, 16));
    }
}
