//! Products domain module.
//!
//! This crate contains the business rules for catalog products, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage). A `Product` is an
//! immutable snapshot; every business operation returns a new snapshot built and
//! re-validated through `ProductBuilder`.

pub mod listing;
pub mod product;
pub mod rating;
pub mod stock;

pub use listing::{ListingType, ProductCondition, ProductStatus};
pub use product::{Dimensions, Product, ProductBuilder};
pub use rating::Rating;
pub use stock::Stock;
