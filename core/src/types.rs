//! Request payloads and the optional typed view of responses.
//!
//! # Design
//! Request types validate themselves before they are serialized, so an
//! out-of-range price or a blank SKU never reaches the wire. Response types
//! mirror what the products API returns but the client does not enforce them;
//! operations hand back `serde_json::Value` and callers convert if they want.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest accepted price or stock value (fits a signed 32-bit column).
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Payload for `POST /api/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    #[serde(default)]
    pub stock: i64,
}

impl NewProduct {
    /// Product with an empty description and zero stock.
    pub fn new(name: impl Into<String>, sku: impl Into<String>, price_cents: i64) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            description: String::new(),
            price_cents,
            stock: 0,
        }
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Return a trimmed copy, or the first rule it breaks.
    pub fn validated(&self) -> Result<NewProduct, ValidationError> {
        let name = non_empty("name", &self.name)?;
        let sku = non_empty("sku", &self.sku)?;
        check_quantity("price_cents", self.price_cents)?;
        check_quantity("stock", self.stock)?;
        Ok(NewProduct {
            name,
            sku,
            description: self.description.trim().to_string(),
            price_cents: self.price_cents,
            stock: self.stock,
        })
    }
}

/// Payload for `PATCH /api/products/{id}/`. Serializes to exactly `{"stock": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub stock: i64,
}

impl StockUpdate {
    pub fn new(stock: i64) -> Result<Self, ValidationError> {
        check_quantity("stock", stock)?;
        Ok(Self { stock })
    }
}

/// Page selection for `GET /api/products/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub per_page: u32,
    pub page: u32,
}

impl ListQuery {
    pub fn new(per_page: u32, page: u32) -> Self {
        Self { per_page, page }
    }

    /// Copy with `per_page` clamped into `1..=MAX_PER_PAGE`. A `page` of 0 is
    /// rejected, not clamped.
    pub fn validated(&self) -> Result<ListQuery, ValidationError> {
        if self.page < 1 {
            return Err(ValidationError::OutOfRange {
                field: "page",
                value: i64::from(self.page),
                min: 1,
                max: i64::from(u32::MAX),
            });
        }
        Ok(ListQuery {
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            page: self.page,
        })
    }

    pub fn query_string(&self) -> String {
        format!("?per_page={}&page={}", self.per_page, self.page)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
        }
    }
}

/// Whether the caller explicitly agreed to a destructive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    Granted,
    #[default]
    Withheld,
}

impl From<bool> for Confirmation {
    fn from(granted: bool) -> Self {
        if granted {
            Confirmation::Granted
        } else {
            Confirmation::Withheld
        }
    }
}

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// The envelope returned by `GET /api/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
    pub total: u64,
}

fn non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

fn check_quantity(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if !(0..=MAX_QUANTITY).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}
