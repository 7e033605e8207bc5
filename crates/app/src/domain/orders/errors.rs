//! Orders service errors.

use storefront::orders::OrderError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("storefront API error: {0}")]
    Api(#[from] ApiError),
}
