//! Product catalog use cases: request validation, the product service and its errors.

pub mod dto;
pub mod error;
pub mod service;

pub use dto::{FieldViolation, ProductRequest, ProductResponse};
pub use error::{ServiceError, ServiceResult};
pub use service::ProductService;
