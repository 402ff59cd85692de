use crate::domain::product::{Product, ProductKind};
use crate::error::{Result, ShopError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Category {
    Electronics,
    Clothing,
}

/// One seed-file row: `category,id,name,price,stock,attribute`, where
/// `attribute` is the brand for electronics and the size for clothing.
#[derive(Debug, Deserialize)]
struct ProductRow {
    category: Category,
    id: String,
    name: String,
    price: Decimal,
    stock: u32,
    attribute: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = ShopError;

    fn try_from(row: ProductRow) -> Result<Product> {
        let kind = match row.category {
            Category::Electronics => ProductKind::Electronics {
                brand: row.attribute,
            },
            Category::Clothing => ProductKind::Clothing {
                size: row.attribute,
            },
        };
        Product::new(row.id, row.name, row.price, row.stock, kind)
    }
}

/// Reads catalog seed products from a CSV source.
///
/// Wraps `csv::Reader` and yields `Result<Product>` lazily, so large seed
/// files stream without loading everything up front.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    /// Creates a new `CatalogReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads, deserializes, and validates
    /// products.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader
            .into_deserialize::<ProductRow>()
            .map(|result| result.map_err(ShopError::from).and_then(Product::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "category, id, name, price, stock, attribute\n\
                    electronics, E01, Smartphone, 299.99, 5, Samsung\n\
                    clothing, C01, T-shirt, 19.99, 10, M";
        let reader = CatalogReader::new(data.as_bytes());
        let results: Vec<Result<Product>> = reader.products().collect();

        assert_eq!(results.len(), 2);
        let phone = results[0].as_ref().unwrap();
        assert_eq!(phone.id(), "E01");
        assert_eq!(phone.unit_price(), dec!(299.99));
        assert_eq!(
            phone.kind(),
            &ProductKind::Electronics {
                brand: "Samsung".to_string()
            }
        );

        let shirt = results[1].as_ref().unwrap();
        assert_eq!(shirt.stock(), 10);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "category, id, name, price, stock, attribute\n\
                    furniture, F01, Couch, 400.0, 1, Oak";
        let reader = CatalogReader::new(data.as_bytes());
        let results: Vec<Result<Product>> = reader.products().collect();

        assert!(results[0].is_err());
    }

    #[test]
    fn test_reader_rejects_negative_price() {
        let data = "category, id, name, price, stock, attribute\n\
                    clothing, C01, T-shirt, -19.99, 10, M";
        let reader = CatalogReader::new(data.as_bytes());
        let results: Vec<Result<Product>> = reader.products().collect();

        assert!(matches!(results[0], Err(ShopError::Validation(_))));
    }
}
