use crate::domain::product::Product;
use crate::error::{Result, ShopError};

/// One cart position. References the catalog by product id rather than
/// holding the product, so prices stay live until checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Ordered pre-checkout accumulation of lines, unique by product id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product`, merging into an existing line for
    /// the same id.
    ///
    /// The stock check covers the added increment only; the merged quantity is
    /// re-validated when stock is committed at checkout.
    pub fn add_line(&mut self, product: &Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity);
        }
        if quantity > product.stock() {
            return Err(ShopError::InsufficientStock {
                name: product.name().to_string(),
                requested: quantity,
                in_stock: product.stock(),
            });
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id())
        {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product_id: product.id().to_string(),
                quantity,
            });
        }
        Ok(())
    }

    /// Removes the line for `product_id`. Not an error if absent.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Empties the cart. Only called after a committed checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
