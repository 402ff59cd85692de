use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShopError>;

/// Errors surfaced by the shop core.
///
/// Everything here is recoverable at the interaction-loop boundary; only a
/// validation failure while seeding the catalog at startup aborts the process.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid payment instrument: {0}")]
    InvalidInstrument(String),

    #[error("product ID {0} already exists")]
    DuplicateId(String),
    #[error("product {0} not found")]
    ProductNotFound(String),
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error("insufficient stock for {name}: requested {requested}, {in_stock} in stock")]
    InsufficientStock {
        name: String,
        requested: u32,
        in_stock: u32,
    },
    #[error("insufficient funds on {instrument}")]
    InsufficientFunds { instrument: String },
    #[error("cart is empty")]
    EmptyCart,
    #[error("invalid payment amount")]
    InvalidPaymentAmount,
    #[error("invalid payment instrument index")]
    InvalidIndex,
    #[error("checkout cancelled")]
    CheckoutCancelled,

    #[error("admin privileges required")]
    AdminRequired,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
