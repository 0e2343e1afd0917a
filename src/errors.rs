use actix_web::HttpResponse;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::errors::OrderError;

/// Transport-level rendering of the order flow's failures.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock for product {product_id}")]
    OutOfStock {
        product_id: Uuid,
        available: i32,
        requested: i32,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::InvalidInput(msg) => AppError::BadRequest(msg),
            OrderError::ProductNotFound(id) => AppError::NotFound(format!("product {id}")),
            OrderError::CustomerNotFound(id) => AppError::NotFound(format!("customer {id}")),
            OrderError::InsufficientStock {
                product_id,
                available,
                requested,
            } => AppError::OutOfStock {
                product_id,
                available,
                requested,
            },
            OrderError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": msg
            })),
            AppError::NotFound(what) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("{} not found", what)
            })),
            AppError::OutOfStock {
                product_id,
                available,
                requested,
            } => HttpResponse::Conflict().json(serde_json::json!({
                "error": "insufficient stock",
                "product_id": product_id,
                "available": available,
                "requested": requested
            })),
            // Storage details stay in the logs, not in the response body.
            AppError::Internal(msg) => {
                log::error!("internal error: {msg}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn bad_request_returns_400() {
        let resp = AppError::BadRequest("empty order".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("product x".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn out_of_stock_returns_409() {
        let resp = AppError::OutOfStock {
            product_id: Uuid::new_v4(),
            available: 100,
            requested: 150,
        }
        .error_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("connection reset".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_input_maps_to_bad_request() {
        let app_err: AppError = OrderError::InvalidInput("bad".to_string()).into();
        assert!(matches!(app_err, AppError::BadRequest(_)));
    }

    #[test]
    fn product_not_found_maps_to_not_found() {
        let app_err: AppError = OrderError::ProductNotFound(Uuid::new_v4()).into();
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn customer_not_found_maps_to_not_found() {
        let app_err: AppError = OrderError::CustomerNotFound(Uuid::new_v4()).into();
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn insufficient_stock_maps_to_out_of_stock_with_shortfall() {
        let app_err: AppError = OrderError::InsufficientStock {
            product_id: Uuid::new_v4(),
            available: 1,
            requested: 5,
        }
        .into();
        match app_err {
            AppError::OutOfStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 1);
                assert_eq!(requested, 5);
            }
            other => panic!("expected OutOfStock, got {other:?}"),
        }
    }

    #[test]
    fn storage_maps_to_internal() {
        let app_err: AppError = OrderError::Storage("disk on fire".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
