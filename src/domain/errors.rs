use thiserror::Error;
use uuid::Uuid;

/// Failure modes of order placement. Business-rule failures
/// (`ProductNotFound`, `InsufficientStock`, `CustomerNotFound`) are not
/// retryable; `Storage` covers infrastructure faults a caller may retry.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: Uuid,
        available: i32,
        requested: i32,
    },

    #[error("Customer {0} not found")]
    CustomerNotFound(Uuid),

    #[error("Storage failure: {0}")]
    Storage(String),
}
