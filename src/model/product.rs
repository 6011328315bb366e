//! Product catalog entry with a reservable stock counter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
///
/// The checkout core treats `stock` as a counter guarded by the product
/// actor's serialized reserve/release actions; everything else is catalog
/// metadata snapshotted onto order lines at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub is_active: bool,
}

impl Product {
    /// Creates a new active Product instance.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sku: impl Into<String>,
        price: Decimal,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: sku.into(),
            description: String::new(),
            price,
            stock,
            is_active: true,
        }
    }

    /// Whether any stock remains.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
}
