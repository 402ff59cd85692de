use crate::domain::instrument::InstrumentKind;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A cart line frozen at checkout time: name and unit price are copied so the
/// order stays stable under later catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Created at the moment a charge succeeds; never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRecord {
    pub kind: InstrumentKind,
    pub instrument: String,
    pub amount: Decimal,
}

/// A completed checkout. Immutable once constructed and appended to the
/// ledger in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub lines: Vec<OrderLine>,
    pub total_paid: Decimal,
    pub payments: Vec<PaymentRecord>,
    pub placed_at: DateTime<Utc>,
}
