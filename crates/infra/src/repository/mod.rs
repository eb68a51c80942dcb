//! Product persistence boundary (repository port) and its adapters.
//!
//! The domain never talks to storage; application code loads a `Product`
//! through this port, asks it for a new snapshot, and hands that back to `save`.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryProductRepository;
pub use json_file::JsonFileProductRepository;
pub use r#trait::{ProductRepository, RepositoryError};
