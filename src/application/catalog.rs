use crate::domain::ports::CatalogStoreBox;
use crate::domain::product::Product;
use crate::error::{Result, ShopError};

/// Catalog admin surface: product creation and lookup over the store port.
pub struct CatalogService {
    store: CatalogStoreBox,
}

impl CatalogService {
    pub fn new(store: CatalogStoreBox) -> Self {
        Self { store }
    }

    /// Adds a new product, refusing duplicate ids.
    pub async fn add_product(&self, product: Product) -> Result<()> {
        if self.store.exists(product.id()).await? {
            return Err(ShopError::DuplicateId(product.id().to_string()));
        }
        tracing::info!(id = product.id(), name = product.name(), "product added");
        self.store.store(product).await
    }

    pub async fn product(&self, id: &str) -> Result<Product> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ShopError::ProductNotFound(id.to_string()))
    }

    /// All products, id-sorted. Restartable: repeated calls without
    /// interleaved mutation yield identical listings.
    pub async fn products(&self) -> Result<Vec<Product>> {
        self.store.all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductKind;
    use crate::infrastructure::in_memory::InMemoryCatalog;
    use rust_decimal_macros::dec;

    fn laptop() -> Product {
        Product::new(
            "E02",
            "Laptop",
            dec!(799.99),
            2,
            ProductKind::Electronics {
                brand: "Dell".to_string(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let service = CatalogService::new(Box::new(InMemoryCatalog::new()));
        service.add_product(laptop()).await.unwrap();

        let found = service.product("E02").await.unwrap();
        assert_eq!(found.name(), "Laptop");

        assert!(matches!(
            service.product("E99").await,
            Err(ShopError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let service = CatalogService::new(Box::new(InMemoryCatalog::new()));
        service.add_product(laptop()).await.unwrap();
        assert!(matches!(
            service.add_product(laptop()).await,
            Err(ShopError::DuplicateId(_))
        ));
    }

    #[tokio::test]
    async fn test_listing_is_idempotent() {
        let service = CatalogService::new(Box::new(InMemoryCatalog::new()));
        service.add_product(laptop()).await.unwrap();

        let first = service.products().await.unwrap();
        let second = service.products().await.unwrap();
        assert_eq!(first, second);
    }
}
