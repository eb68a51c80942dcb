use thiserror::Error;

use catalog_core::DomainError;
use catalog_infra::RepositoryError;

use crate::dto::FieldViolation;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of a catalog use case.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product not found: {0}")]
    NotFound(String),

    #[error("invalid product request: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(id: impl core::fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Stable machine-readable code for callers that render errors.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "PRODUCT_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(DomainError::InsufficientStock { .. }) => "INSUFFICIENT_STOCK",
            Self::Domain(_) => "INVALID_ARGUMENT",
            Self::Repository(_) => "STORAGE_ERROR",
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation(v) => v,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_the_variant() {
        assert_eq!(ServiceError::not_found("x").code(), "PRODUCT_NOT_FOUND");
        assert_eq!(ServiceError::Validation(vec![]).code(), "VALIDATION_ERROR");
        assert_eq!(
            ServiceError::from(DomainError::insufficient_stock(5, 2)).code(),
            "INSUFFICIENT_STOCK"
        );
        assert_eq!(
            ServiceError::from(DomainError::invalid_argument("bad")).code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(
            ServiceError::from(RepositoryError::storage("disk full")).code(),
            "STORAGE_ERROR"
        );
    }

    #[test]
    fn messages_are_readable() {
        let err = ServiceError::Validation(vec![FieldViolation {
            field: "title".to_string(),
            message: "Title is required".to_string(),
            rejected_value: None,
        }]);
        assert_eq!(err.to_string(), "invalid product request: title: Title is required");
        assert_eq!(err.violations().len(), 1);

        let err = ServiceError::from(DomainError::insufficient_stock(5, 2));
        assert_eq!(
            err.to_string(),
            "insufficient stock (requested: 5, available: 2)"
        );
    }
}
