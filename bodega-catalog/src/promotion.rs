use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pricing strategies a promotion can apply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionKind {
    /// For every pair of units, the second is charged at half price
    SecondHalfPrice,
    /// Every third unit is free
    ThirdOneFree,
    /// Flat percentage off the whole line
    PercentDiscount { percent: f64 },
}

/// A named pricing promotion, shared across products via `Arc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    id: Uuid,
    name: String,
    kind: PromotionKind,
}

impl Promotion {
    pub fn new(name: impl Into<String>, kind: PromotionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name shown next to the product carrying this promotion
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PromotionKind {
        self.kind
    }

    /// Total price for `quantity` units at `unit_price`.
    ///
    /// Pure and deterministic; never mutates the promotion. Callers pass
    /// `quantity > 0` and `unit_price >= 0`. The percent discount is applied
    /// unclamped: a percent above 100 produces a negative total and is the
    /// caller's responsibility.
    pub fn apply(&self, unit_price: f64, quantity: i32) -> f64 {
        match self.kind {
            PromotionKind::SecondHalfPrice => {
                let half_price_units = quantity / 2;
                let full_price_units = quantity - half_price_units;
                unit_price * full_price_units as f64 + unit_price * 0.5 * half_price_units as f64
            }
            PromotionKind::ThirdOneFree => {
                let free_units = quantity / 3;
                unit_price * (quantity - free_units) as f64
            }
            PromotionKind::PercentDiscount { percent } => {
                unit_price * quantity as f64 * (1.0 - percent / 100.0)
            }
        }
    }
}
