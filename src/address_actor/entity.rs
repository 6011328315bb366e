//! Entity trait implementation for the Address domain type.

use async_trait::async_trait;
use chrono::Utc;

use crate::framework::ActorEntity;
use crate::model::{Address, AddressCreate, AddressUpdate};

#[async_trait]
impl ActorEntity for Address {
    type Id = String;
    type CreateParams = AddressCreate;
    type UpdateParams = AddressUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = ();
    type Context = ();

    /// Creates a new Address from creation parameters.
    fn from_create_params(id: String, params: AddressCreate) -> Result<Self, String> {
        if params.phone.len() < 10 {
            return Err("phone number must be at least 10 digits".to_string());
        }
        if params.postal_code.is_empty() {
            return Err("postal code is required".to_string());
        }
        Ok(Address::from_create(id, params))
    }

    async fn on_update(&mut self, update: AddressUpdate, _ctx: &Self::Context) -> Result<(), String> {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(phone) = update.phone {
            if phone.len() < 10 {
                return Err("phone number must be at least 10 digits".to_string());
            }
            self.phone = phone;
        }
        if let Some(address_line1) = update.address_line1 {
            self.address_line1 = address_line1;
        }
        if let Some(address_line2) = update.address_line2 {
            self.address_line2 = address_line2;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(postal_code) = update.postal_code {
            self.postal_code = postal_code;
        }
        if let Some(country) = update.country {
            self.country = country;
        }
        if let Some(is_default) = update.is_default {
            self.is_default = is_default;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }
}
