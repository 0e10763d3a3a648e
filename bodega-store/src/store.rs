use bodega_catalog::{Product, ProductError};
use uuid::Uuid;

/// One requested line of an order: which product, and how many units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

impl OrderLine {
    pub fn new(product_id: Uuid, quantity: i32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Owns the product catalog and executes orders against it
pub struct Store {
    products: Vec<Product>,
}

impl Store {
    /// Create a store over an ordered product list; insertion order is kept.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Every product the store owns, active or not.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Active products only, in insertion order.
    pub fn get_all_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// Total units on hand across all products, inactive ones included.
    /// Non-stocked products always contribute 0.
    pub fn get_total_quantity(&self) -> i32 {
        self.products.iter().map(|p| p.quantity()).sum()
    }

    /// Process an order, returning the combined price of all lines.
    ///
    /// Lines run sequentially in the given order, each delegating stock
    /// checks and pricing to the product. There is no rollback: when line k
    /// fails, the call aborts but lines 1..k-1 keep their stock mutations.
    pub fn order(&mut self, lines: &[OrderLine]) -> Result<f64, StoreError> {
        let mut total_price = 0.0;

        for line in lines {
            let product = self.get_product_mut(line.product_id)?;
            total_price += product.purchase(line.quantity)?;
        }

        Ok(total_price)
    }

    fn get_product_mut(&mut self, product_id: Uuid) -> Result<&mut Product, StoreError> {
        self.products
            .iter_mut()
            .find(|p| p.id() == product_id)
            .ok_or(StoreError::ProductNotFound(product_id))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error(transparent)]
    Product(#[from] ProductError),
}
