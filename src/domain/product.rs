use crate::error::{Result, ShopError};
use rust_decimal::Decimal;

/// Category-specific product data. Rendering dispatches on the variant;
/// new categories are added as new variants, not new conditionals elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKind {
    Electronics { brand: String },
    Clothing { size: String },
}

/// A catalog entry with a stock counter.
///
/// Stock is only mutated through [`Product::decrease_stock`] and
/// [`Product::set_stock`]; the counter cannot go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    unit_price: Decimal,
    stock: u32,
    kind: ProductKind,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        stock: u32,
        kind: ProductKind,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ShopError::Validation(
                "product ID cannot be empty".to_string(),
            ));
        }
        if unit_price < Decimal::ZERO {
            return Err(ShopError::Validation(
                "price must be non-negative".to_string(),
            ));
        }
        Ok(Self {
            id,
            name: name.into(),
            unit_price,
            stock,
            kind,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    /// Removes sold units from stock. Fails without mutating if more units are
    /// requested than remain.
    pub fn decrease_stock(&mut self, qty: u32) -> Result<()> {
        if qty > self.stock {
            return Err(ShopError::InsufficientStock {
                name: self.name.clone(),
                requested: qty,
                in_stock: self.stock,
            });
        }
        self.stock -= qty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn phone() -> Product {
        Product::new(
            "E01",
            "Smartphone",
            dec!(299.99),
            5,
            ProductKind::Electronics {
                brand: "Samsung".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Product::new(
            "E01",
            "Smartphone",
            dec!(-1.0),
            5,
            ProductKind::Electronics {
                brand: "Samsung".to_string(),
            },
        );
        assert!(matches!(result, Err(ShopError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_id() {
        let result = Product::new(
            "  ",
            "Smartphone",
            dec!(1.0),
            5,
            ProductKind::Clothing {
                size: "M".to_string(),
            },
        );
        assert!(matches!(result, Err(ShopError::Validation(_))));
    }

    #[test]
    fn test_decrease_stock() {
        let mut product = phone();
        product.decrease_stock(3).unwrap();
        assert_eq!(product.stock(), 2);
        assert!(product.is_available());

        product.decrease_stock(2).unwrap();
        assert_eq!(product.stock(), 0);
        assert!(!product.is_available());
    }

    #[test]
    fn test_decrease_stock_insufficient() {
        let mut product = phone();
        let result = product.decrease_stock(6);
        assert!(matches!(
            result,
            Err(ShopError::InsufficientStock {
                requested: 6,
                in_stock: 5,
                ..
            })
        ));
        // unchanged on failure
        assert_eq!(product.stock(), 5);
    }
}
