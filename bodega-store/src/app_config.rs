use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use bodega_catalog::{Product, ProductError, Promotion, PromotionKind};
use serde::Deserialize;

/// Built-in demo catalog; config files and environment variables override it.
const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub name: String,
}

/// Declarative catalog: keyed promotions plus the products referencing them.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default)]
    pub promotions: Vec<PromotionConfig>,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PromotionConfig {
    /// Key products use to reference this promotion
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: PromotionKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub non_stocked: bool,
    pub max_per_order: Option<i32>,
    pub promotion: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start from the built-in demo catalog
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of BODEGA)
            .add_source(config::Environment::with_prefix("BODEGA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

impl CatalogConfig {
    /// Materialize the catalog: shared promotion instances first, then the
    /// product list handed to `Store::new`. Invoked once at startup.
    pub fn build(&self) -> Result<Vec<Product>, CatalogBuildError> {
        let mut promotions: HashMap<&str, Arc<Promotion>> = HashMap::new();
        for promo in &self.promotions {
            let shared = Arc::new(Promotion::new(promo.name.clone(), promo.kind));
            if promotions.insert(promo.key.as_str(), shared).is_some() {
                return Err(CatalogBuildError::DuplicatePromotion(promo.key.clone()));
            }
        }

        let mut products = Vec::with_capacity(self.products.len());
        for entry in &self.products {
            let mut product = if entry.non_stocked {
                if entry.quantity != 0 || entry.max_per_order.is_some() {
                    return Err(CatalogBuildError::ConflictingStockPolicy(entry.name.clone()));
                }
                Product::non_stocked(entry.name.as_str(), entry.price)?
            } else if let Some(maximum) = entry.max_per_order {
                Product::limited(entry.name.as_str(), entry.price, entry.quantity, maximum)?
            } else {
                Product::new(entry.name.as_str(), entry.price, entry.quantity)?
            };

            if let Some(key) = &entry.promotion {
                let promotion = promotions.get(key.as_str()).ok_or_else(|| {
                    CatalogBuildError::UnknownPromotion {
                        key: key.clone(),
                        product: entry.name.clone(),
                    }
                })?;
                product.set_promotion(Arc::clone(promotion));
            }

            products.push(product);
        }

        Ok(products)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogBuildError {
    #[error("Duplicate promotion key: {0}")]
    DuplicatePromotion(String),

    #[error("Product {product:?} references unknown promotion key {key:?}")]
    UnknownPromotion { key: String, product: String },

    #[error("Product {0:?} cannot be non-stocked and carry stock or a per-order maximum")]
    ConflictingStockPolicy(String),

    #[error(transparent)]
    Product(#[from] ProductError),
}
