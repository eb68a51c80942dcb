//! Infrastructure layer: product storage adapters, record mapping, config.

pub mod config;
pub mod keyword;
pub mod record;
pub mod repository;

pub use config::{StorageBackend, StorageConfig};
pub use keyword::matches_keyword;
pub use record::ProductRecord;
pub use repository::{
    InMemoryProductRepository, JsonFileProductRepository, ProductRepository, RepositoryError,
};
