use crate::domain::order::Order;
use crate::domain::ports::{CatalogStore, OrderLedger};
use crate::domain::product::Product;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory catalog store.
///
/// `Clone` shares the underlying map, so one catalog can sit behind several
/// boxed ports (the checkout engine and the admin service see the same stock).
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn store(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.id().to_string(), product);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let products = self.products.read().await;
        Ok(products.contains_key(id))
    }

    async fn all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        // HashMap backing has no insertion order; id order keeps the listing
        // deterministic and restartable.
        all.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(all)
    }
}

/// A thread-safe append-only order ledger.
#[derive(Default, Clone)]
pub struct InMemoryOrderLedger {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderLedger for InMemoryOrderLedger {
    async fn append(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.push(order);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }
}
