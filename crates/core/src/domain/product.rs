use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tracked product. Construct through [`Product::new`], which is the single
/// validation path for both user input and deserialized records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

/// Proposed replacement values for an existing product. All fields are parsed
/// and validated before any of them is applied, so a rejected update leaves
/// the record untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpdate {
    /// `None` keeps the current name.
    pub name: Option<String>,
    pub quantity: u32,
    pub price: f64,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Result<Self, CatalogError> {
        let product_id = product_id.into().trim().to_string();
        if product_id.is_empty() {
            return Err(CatalogError::EmptyId);
        }

        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        validate_price(price)?;

        Ok(Self { product_id: ProductId(product_id), name, quantity, price })
    }

    pub fn stock_in(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }

    pub fn stock_out(&mut self, amount: u32) -> Result<(), CatalogError> {
        if amount > self.quantity {
            return Err(CatalogError::InsufficientStock {
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity -= amount;
        Ok(())
    }

    pub(crate) fn apply_update(&mut self, update: ProductUpdate) -> Result<(), CatalogError> {
        validate_price(update.price)?;
        let name = match update.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(CatalogError::EmptyName);
                }
                name
            }
            None => self.name.clone(),
        };

        self.name = name;
        self.quantity = update.quantity;
        self.price = update.price;
        Ok(())
    }
}

fn validate_price(price: f64) -> Result<(), CatalogError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::InvalidPrice(price));
    }
    Ok(())
}
