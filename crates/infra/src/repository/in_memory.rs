use std::sync::RwLock;

use catalog_core::ProductId;
use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError};

/// In-memory product repository.
///
/// Intended for tests/dev. Rows are kept in insertion order; lookups are linear.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with products as-is (ids are not reassigned).
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            rows: RwLock::new(products.into_iter().collect()),
        }
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;

        let saved = match product.id_typed() {
            Some(id) => {
                match rows.iter_mut().find(|p| p.id_typed() == Some(id)) {
                    Some(slot) => *slot = product.clone(),
                    None => rows.push(product.clone()),
                }
                product.clone()
            }
            None => {
                let saved = product.to_builder().id(ProductId::new()).build()?;
                rows.push(saved.clone());
                saved
            }
        };

        tracing::debug!(product_id = ?saved.id_typed(), "product saved (in-memory)");
        Ok(saved)
    }

    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;
        Ok(rows.iter().find(|p| p.id_typed() == Some(id)).cloned())
    }

    fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;
        Ok(rows.clone())
    }

    fn delete_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;
        let before = rows.len();
        rows.retain(|p| p.id_typed() != Some(id));
        Ok(rows.len() != before)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| RepositoryError::storage("lock poisoned"))?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::SellerId;
    use rust_decimal::Decimal;

    fn unsaved(title: &str, category: &str) -> Product {
        Product::builder()
            .basic_info(title, None, Decimal::new(1999, 2), Some("USD".into()))
            .categorization(Some(category.to_string()), None)
            .seller(Some(SellerId::new()), None)
            .stock(3)
            .build()
            .unwrap()
    }

    #[test]
    fn save_assigns_id_to_new_products() {
        let repo = InMemoryProductRepository::new();
        let saved = repo.save(&unsaved("iPhone 15 Pro Max", "Phones")).unwrap();

        let id = saved.id_typed().expect("id assigned");
        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.title(), "iPhone 15 Pro Max");
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn save_with_id_replaces_existing_row() {
        let repo = InMemoryProductRepository::new();
        let saved = repo.save(&unsaved("Kindle", "Books")).unwrap();
        let updated = saved.reduce_stock(2).unwrap();

        repo.save(&updated).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let found = repo.find_by_id(saved.id_typed().unwrap()).unwrap().unwrap();
        assert_eq!(found.available_quantity(), 1);
    }

    #[test]
    fn save_with_unknown_id_appends() {
        let repo = InMemoryProductRepository::new();
        let product = unsaved("Kindle", "Books").to_builder().id(ProductId::new()).build().unwrap();
        repo.save(&product).unwrap();
        assert_eq!(repo.find_all().unwrap(), vec![product]);
    }

    #[test]
    fn find_all_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        for title in ["a", "b", "c"] {
            repo.save(&unsaved(title, "Misc")).unwrap();
        }
        let titles: Vec<_> = repo
            .find_all()
            .unwrap()
            .iter()
            .map(|p| p.title().to_string())
            .collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn keyword_and_title_queries() {
        let repo = InMemoryProductRepository::new();
        repo.save(&unsaved("iPhone 15 Pro Max", "Phones")).unwrap();
        repo.save(&unsaved("Galaxy S24", "Phones")).unwrap();

        assert_eq!(repo.find_by_keyword("iphone").unwrap().len(), 1);
        assert_eq!(repo.count_by_keyword("phones").unwrap(), 2);
        assert_eq!(repo.count_by_keyword("samsung").unwrap(), 0);

        assert!(repo.find_by_title("Galaxy S24").unwrap().is_some());
        assert!(repo.find_by_title("galaxy s24").unwrap().is_none());
    }

    #[test]
    fn category_and_seller_queries() {
        let repo = InMemoryProductRepository::new();
        let phone = repo.save(&unsaved("Galaxy S24", "Phones")).unwrap();
        repo.save(&unsaved("Kindle", "Books")).unwrap();

        assert_eq!(repo.find_by_category("Books").unwrap().len(), 1);
        assert_eq!(repo.find_by_category("books").unwrap().len(), 0);
        assert_eq!(repo.find_by_seller(phone.seller_id()).unwrap(), vec![phone]);
    }

    #[test]
    fn delete_by_id_reports_removal() {
        let repo = InMemoryProductRepository::new();
        let saved = repo.save(&unsaved("Kindle", "Books")).unwrap();
        let id = saved.id_typed().unwrap();

        assert!(repo.delete_by_id(id).unwrap());
        assert!(!repo.delete_by_id(id).unwrap());
        assert!(repo.find_by_id(id).unwrap().is_none());
    }

    #[test]
    fn arc_repository_forwards() {
        let repo: std::sync::Arc<dyn ProductRepository> =
            std::sync::Arc::new(InMemoryProductRepository::with_products(vec![]));
        repo.save(&unsaved("Kindle", "Books")).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }
}
