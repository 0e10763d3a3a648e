use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::promotion::Promotion;

/// Stock handling variants in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockPolicy {
    /// Quantity tracked normally; active while stock remains
    Stocked,
    /// Never held in stock (licenses, services); always active
    NonStocked,
    /// Stocked, but a single purchase may not exceed `maximum` units
    PerOrderLimit { maximum: i32 },
}

/// A catalog entry: identity, unit price, stock policy and an optional
/// shared promotion.
///
/// Invariants: price >= 0 and quantity >= 0 at all times. The name is fixed
/// at construction; quantity changes only through [`Product::purchase`].
#[derive(Debug, Clone)]
pub struct Product {
    id: Uuid,
    name: String,
    price: f64,
    quantity: i32,
    stock: StockPolicy,
    promotion: Option<Arc<Promotion>>,
}

impl Product {
    /// Create a regular stocked product.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: i32,
    ) -> Result<Self, ProductError> {
        Self::with_policy(name, price, quantity, StockPolicy::Stocked)
    }

    /// Create a product that is never held in stock and is always active.
    pub fn non_stocked(name: impl Into<String>, price: f64) -> Result<Self, ProductError> {
        Self::with_policy(name, price, 0, StockPolicy::NonStocked)
    }

    /// Create a stocked product capped at `maximum` units per purchase.
    pub fn limited(
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        maximum: i32,
    ) -> Result<Self, ProductError> {
        Self::with_policy(name, price, quantity, StockPolicy::PerOrderLimit { maximum })
    }

    fn with_policy(
        name: impl Into<String>,
        price: f64,
        quantity: i32,
        stock: StockPolicy,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::InvalidName);
        }
        if price < 0.0 {
            return Err(ProductError::InvalidPrice(price));
        }
        if quantity < 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            price,
            quantity,
            stock,
            promotion: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Units currently on hand. Always 0 for non-stocked products.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn stock_policy(&self) -> StockPolicy {
        self.stock
    }

    pub fn promotion(&self) -> Option<&Arc<Promotion>> {
        self.promotion.as_ref()
    }

    /// Replace the current promotion, if any.
    pub fn set_promotion(&mut self, promotion: Arc<Promotion>) {
        self.promotion = Some(promotion);
    }

    /// Update the unit price, rejecting negative values.
    pub fn set_price(&mut self, price: f64) -> Result<(), ProductError> {
        if price < 0.0 {
            return Err(ProductError::InvalidPrice(price));
        }
        self.price = price;
        Ok(())
    }

    /// Whether the product can currently be purchased.
    ///
    /// Stocked products go inactive when stock runs out; there is no restock
    /// operation, so the transition is one-way. Non-stocked products are
    /// always active.
    pub fn is_active(&self) -> bool {
        match self.stock {
            StockPolicy::NonStocked => true,
            StockPolicy::Stocked | StockPolicy::PerOrderLimit { .. } => self.quantity > 0,
        }
    }

    /// Purchase `quantity` units, returning the line total.
    ///
    /// Stock is decremented (where tracked) only after every check passes;
    /// a failed check leaves the product untouched. Pricing delegates to the
    /// promotion when one is set, otherwise `price * quantity`.
    pub fn purchase(&mut self, quantity: i32) -> Result<f64, ProductError> {
        if quantity <= 0 {
            return Err(ProductError::InvalidQuantity(quantity));
        }

        match self.stock {
            StockPolicy::NonStocked => {}
            StockPolicy::Stocked => {
                self.check_stock(quantity)?;
                self.quantity -= quantity;
            }
            StockPolicy::PerOrderLimit { maximum } => {
                if quantity > maximum {
                    return Err(ProductError::QuantityExceedsLimit {
                        requested: quantity,
                        maximum,
                    });
                }
                self.check_stock(quantity)?;
                self.quantity -= quantity;
            }
        }

        Ok(self.line_price(quantity))
    }

    fn check_stock(&self, requested: i32) -> Result<(), ProductError> {
        if requested > self.quantity {
            return Err(ProductError::OutOfStock {
                requested,
                available: self.quantity,
            });
        }
        Ok(())
    }

    fn line_price(&self, quantity: i32) -> f64 {
        match &self.promotion {
            Some(promotion) => promotion.apply(self.price, quantity),
            None => self.price * quantity as f64,
        }
    }
}

/// One-line summary rendered verbatim by the menu.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Price: ${:.2}", self.name, self.price)?;
        match self.stock {
            StockPolicy::Stocked => write!(f, ", Quantity: {}", self.quantity)?,
            StockPolicy::NonStocked => write!(f, " (non-stocked)")?,
            StockPolicy::PerOrderLimit { maximum } => {
                write!(f, ", Quantity: {} (max {} per order)", self.quantity, maximum)?
            }
        }
        match &self.promotion {
            Some(promotion) => write!(f, ", Promotion: {}", promotion.name()),
            None => write!(f, ", Promotion: none"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product name cannot be empty")]
    InvalidName,

    #[error("Price cannot be negative: {0}")]
    InvalidPrice(f64),

    #[error("Quantity must be non-negative: {0}")]
    InvalidQuantity(i32),

    #[error("Not enough stock: requested {requested}, available {available}")]
    OutOfStock { requested: i32, available: i32 },

    #[error("Requested {requested} but at most {maximum} allowed per order")]
    QuantityExceedsLimit { requested: i32, maximum: i32 },
}
