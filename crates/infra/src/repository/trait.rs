use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use catalog_core::{DomainError, ProductId, SellerId};
use catalog_products::Product;

use crate::keyword::matches_keyword;

/// Repository operation error.
///
/// These are **infrastructure errors** (IO, encoding, corrupted rows) as opposed to
/// domain errors raised while building or changing a product.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row no longer satisfies the product invariants.
    #[error("stored product is invalid: {0}")]
    Invalid(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Product storage port.
///
/// ## Save semantics
///
/// - A product **without** an id is appended under a freshly generated
///   `ProductId`; the returned product carries it.
/// - A product **with** an id replaces the stored row with that id, or is appended
///   when no such row exists.
///
/// ## Query semantics
///
/// - `find_all` returns products in insertion order.
/// - `find_by_title` is an exact match and returns the first hit.
/// - `find_by_keyword`/`count_by_keyword` use [`matches_keyword`]; callers pass a
///   trimmed, lowercased keyword.
///
/// The derived lookups have default implementations on top of `find_all`;
/// adapters override them only when they can do better.
///
/// There is no compare-and-swap: two writers that load the same product and save
/// different snapshots race, and the last `save` wins.
pub trait ProductRepository: Send + Sync {
    fn save(&self, product: &Product) -> Result<Product, RepositoryError>;

    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Remove a product; returns whether a row was deleted.
    fn delete_by_id(&self, id: ProductId) -> Result<bool, RepositoryError>;

    fn find_by_title(&self, title: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self.find_all()?.into_iter().find(|p| p.title() == title))
    }

    fn find_by_keyword(&self, keyword: &str) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|p| matches_keyword(p, keyword))
            .collect())
    }

    fn count_by_keyword(&self, keyword: &str) -> Result<usize, RepositoryError> {
        Ok(self
            .find_all()?
            .iter()
            .filter(|p| matches_keyword(p, keyword))
            .count())
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|p| p.category() == Some(category))
            .collect())
    }

    fn find_by_seller(&self, seller_id: SellerId) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|p| p.seller_id() == seller_id)
            .collect())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.find_all()?.len())
    }
}

impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        (**self).save(product)
    }

    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_all()
    }

    fn delete_by_id(&self, id: ProductId) -> Result<bool, RepositoryError> {
        (**self).delete_by_id(id)
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Product>, RepositoryError> {
        (**self).find_by_title(title)
    }

    fn find_by_keyword(&self, keyword: &str) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_by_keyword(keyword)
    }

    fn count_by_keyword(&self, keyword: &str) -> Result<usize, RepositoryError> {
        (**self).count_by_keyword(keyword)
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_by_category(category)
    }

    fn find_by_seller(&self, seller_id: SellerId) -> Result<Vec<Product>, RepositoryError> {
        (**self).find_by_seller(seller_id)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        (**self).count()
    }
}
