use crate::domain::cart::Cart;
use crate::domain::instrument::PaymentInstrument;
use crate::error::{Result, ShopError};

/// The single shopper of a session: a name, a cart, and an ordered list of
/// payment instruments (order matters for display indexing only).
///
/// Order history is kept behind the [`crate::domain::ports::OrderLedger`]
/// port, not on the customer.
#[derive(Debug)]
pub struct Customer {
    name: String,
    pub cart: Cart,
    instruments: Vec<PaymentInstrument>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ShopError::Validation(
                "customer name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            cart: Cart::new(),
            instruments: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instruments(&self) -> &[PaymentInstrument] {
        &self.instruments
    }

    pub fn add_instrument(&mut self, instrument: PaymentInstrument) {
        self.instruments.push(instrument);
    }

    /// Removes the instrument at `index` (0-based).
    pub fn remove_instrument(&mut self, index: usize) -> Result<()> {
        if index >= self.instruments.len() {
            return Err(ShopError::InvalidIndex);
        }
        self.instruments.remove(index);
        Ok(())
    }

    /// Mutable access to the instrument at `index` (0-based).
    pub fn instrument_mut(&mut self, index: usize) -> Result<&mut PaymentInstrument> {
        self.instruments.get_mut(index).ok_or(ShopError::InvalidIndex)
    }
}
