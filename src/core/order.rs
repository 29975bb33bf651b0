//! Order and catalog item shapes handed to the messaging checkout

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OrderItem {
    pub name: String,
    /// Canonical unit price in the base currency.
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Order {
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShareableItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub compare_price: Option<f64>,
    #[serde(default)]
    pub collection: Option<String>,
}

impl ShareableItem {
    /// Whole-percent discount against the compare price, if there is one.
    pub fn discount_percent(&self) -> Option<i64> {
        let compare = self.compare_price?;
        if compare > self.price && compare > 0.0 {
            Some((((compare - self.price) / compare) * 100.0).round() as i64)
        } else {
            None
        }
    }
}

/// Reads a YAML document describing an order or an item.
pub fn load_yaml<T, P>(path: P) -> Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read file: {}", path.as_ref().display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse file: {}", path.as_ref().display()))
}
