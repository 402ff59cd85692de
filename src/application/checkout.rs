use crate::domain::customer::Customer;
use crate::domain::instrument::PaymentInstrument;
use crate::domain::money::Amount;
use crate::domain::order::{Order, OrderLine, PaymentRecord};
use crate::domain::ports::{CatalogStoreBox, OrderLedgerBox};
use crate::error::{Result, ShopError};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Volume-discount policy. Subtotals strictly above `discount_threshold` earn
/// `discount_rate` off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutPolicy {
    pub discount_threshold: Decimal,
    pub discount_rate: Decimal,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            discount_threshold: dec!(100),
            discount_rate: dec!(0.10),
        }
    }
}

/// The priced cart at checkout time, before any payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// One caller-supplied settlement event.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentChoice {
    /// Charge `amount` against the customer's instrument at the given
    /// 1-based index.
    Pay { instrument: usize, amount: Decimal },
    Cancel,
}

/// Outcome of a successful settlement event.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentProgress {
    Charged {
        instrument: String,
        amount: Decimal,
        remaining: Decimal,
    },
    Settled,
}

/// Orchestrates checkout: quoting, payment settlement, stock commitment, and
/// order archival.
///
/// [`CheckoutEngine::begin`] computes the quote and opens a
/// [`CheckoutSession`]; the caller feeds [`PaymentChoice`] events until the
/// balance settles, then calls [`CheckoutSession::commit`]. Abandoning a
/// session before commit leaves catalog and ledger untouched, but does not
/// reverse charges already applied within it.
pub struct CheckoutEngine {
    catalog: CatalogStoreBox,
    ledger: OrderLedgerBox,
    policy: CheckoutPolicy,
}

impl CheckoutEngine {
    pub fn new(catalog: CatalogStoreBox, ledger: OrderLedgerBox) -> Self {
        Self::with_policy(catalog, ledger, CheckoutPolicy::default())
    }

    pub fn with_policy(
        catalog: CatalogStoreBox,
        ledger: OrderLedgerBox,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            catalog,
            ledger,
            policy,
        }
    }

    /// Prices the customer's cart against current catalog prices and opens a
    /// settlement session.
    ///
    /// Fails with [`ShopError::EmptyCart`] on an empty cart and
    /// [`ShopError::ProductNotFound`] if a line references a missing product;
    /// neither leaves any side effect.
    pub async fn begin<'a>(&'a self, customer: &'a mut Customer) -> Result<CheckoutSession<'a>> {
        if customer.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let mut priced = Vec::with_capacity(customer.cart.lines().len());
        for line in customer.cart.lines() {
            let product = self
                .catalog
                .get(&line.product_id)
                .await?
                .ok_or_else(|| ShopError::ProductNotFound(line.product_id.clone()))?;
            priced.push(OrderLine {
                product_id: line.product_id.clone(),
                name: product.name().to_string(),
                unit_price: product.unit_price(),
                quantity: line.quantity,
            });
        }

        let subtotal: Decimal = priced
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum();
        let discount = if subtotal > self.policy.discount_threshold {
            subtotal * self.policy.discount_rate
        } else {
            Decimal::ZERO
        };
        let quote = Quote {
            subtotal,
            discount,
            total: subtotal - discount,
        };
        tracing::debug!(
            subtotal = %quote.subtotal,
            discount = %quote.discount,
            total = %quote.total,
            "checkout quoted"
        );

        Ok(CheckoutSession {
            engine: self,
            customer,
            priced,
            quote,
            remaining: quote.total,
            payments: Vec::new(),
        })
    }

    /// The completed-order history, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.ledger.all().await
    }
}

/// One in-flight checkout.
///
/// Holds the cart snapshot priced at [`CheckoutEngine::begin`] time and the
/// running settlement state. Exact decimal arithmetic means `remaining`
/// reaches zero exactly; there is no tolerance window.
pub struct CheckoutSession<'a> {
    engine: &'a CheckoutEngine,
    customer: &'a mut Customer,
    priced: Vec<OrderLine>,
    quote: Quote,
    remaining: Decimal,
    payments: Vec<PaymentRecord>,
}

impl CheckoutSession<'_> {
    pub fn quote(&self) -> Quote {
        self.quote
    }

    pub fn remaining(&self) -> Decimal {
        self.remaining
    }

    pub fn is_settled(&self) -> bool {
        self.remaining == Decimal::ZERO
    }

    /// The customer's instruments, for display indexing (1-based to callers).
    pub fn instruments(&self) -> &[PaymentInstrument] {
        self.customer.instruments()
    }

    /// Applies one settlement event.
    ///
    /// [`ShopError::InsufficientFunds`] is recoverable: the session stays
    /// usable and `remaining` is unchanged, so the caller may retry with a
    /// different instrument or amount. `Cancel`, a bad index, and a bad
    /// amount abort the checkout; charges applied in earlier events are not
    /// reversed.
    pub fn apply(&mut self, choice: PaymentChoice) -> Result<PaymentProgress> {
        if self.is_settled() {
            return Err(ShopError::Validation(
                "payment already settled".to_string(),
            ));
        }
        let (index, amount) = match choice {
            PaymentChoice::Cancel => return Err(ShopError::CheckoutCancelled),
            PaymentChoice::Pay { instrument, amount } => (instrument, amount),
        };

        let index = index.checked_sub(1).ok_or(ShopError::InvalidIndex)?;
        if amount <= Decimal::ZERO || amount > self.remaining {
            return Err(ShopError::InvalidPaymentAmount);
        }

        let instrument = self.customer.instrument_mut(index)?;
        let descriptor = instrument.describe();
        let kind = instrument.kind();
        if let Err(err) = instrument.charge(Amount::new(amount)?) {
            tracing::warn!(instrument = %descriptor, %amount, "charge declined");
            return Err(err);
        }

        self.payments.push(PaymentRecord {
            kind,
            instrument: descriptor.clone(),
            amount,
        });
        self.remaining -= amount;

        if self.is_settled() {
            Ok(PaymentProgress::Settled)
        } else {
            Ok(PaymentProgress::Charged {
                instrument: descriptor,
                amount,
                remaining: self.remaining,
            })
        }
    }

    /// Commits the settled checkout: decrements stock per line, archives the
    /// order, and clears the cart.
    ///
    /// Stock is re-validated here; on an [`ShopError::InsufficientStock`]
    /// failure partway through, lines already decremented stay decremented
    /// and charged instruments are not refunded. The engine deliberately does
    /// not attempt a two-phase commit across payments and inventory.
    pub async fn commit(self) -> Result<Order> {
        if !self.is_settled() {
            return Err(ShopError::Validation(
                "cannot commit an unsettled checkout".to_string(),
            ));
        }

        for line in &self.priced {
            let mut product = self
                .engine
                .catalog
                .get(&line.product_id)
                .await?
                .ok_or_else(|| ShopError::ProductNotFound(line.product_id.clone()))?;
            product.decrease_stock(line.quantity)?;
            self.engine.catalog.store(product).await?;
        }

        let order = Order {
            lines: self.priced,
            total_paid: self.quote.total,
            payments: self.payments,
            placed_at: Utc::now(),
        };
        self.engine.ledger.append(order.clone()).await?;
        self.customer.cart.clear();
        tracing::info!(total = %order.total_paid, payments = order.payments.len(), "order placed");

        Ok(order)
    }
}
