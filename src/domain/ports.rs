use super::order::Order;
use super::product::Product;
use crate::error::Result;
use async_trait::async_trait;

/// Storage port for the product catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn store(&self, product: Product) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Product>>;
    async fn exists(&self, id: &str) -> Result<bool>;
    /// All products in a deterministic, restartable order.
    async fn all(&self) -> Result<Vec<Product>>;
}

pub type CatalogStoreBox = Box<dyn CatalogStore>;

/// Append-only history of completed orders.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    async fn append(&self, order: Order) -> Result<()>;
    /// All orders in chronological insertion order.
    async fn all(&self) -> Result<Vec<Order>>;
}

pub type OrderLedgerBox = Box<dyn OrderLedger>;

/// Injected credential check backing the admin session.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

pub type CredentialVerifierBox = Box<dyn CredentialVerifier>;
