//! Shipping address book entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved shipping address belonging to a user.
///
/// The checkout core only ever *reads* addresses (and snapshots their fields
/// onto orders); the CRUD surface exists so the flow is complete end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreate {
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

/// Payload for updating an existing address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
    pub is_active: Option<bool>,
}

impl Address {
    pub fn from_create(id: impl Into<String>, params: AddressCreate) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: params.user_id,
            full_name: params.full_name,
            phone: params.phone,
            address_line1: params.address_line1,
            address_line2: params.address_line2,
            city: params.city,
            state: params.state,
            postal_code: params.postal_code,
            country: params.country,
            is_default: params.is_default,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
