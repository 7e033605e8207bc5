//! Wishlist service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum WishlistServiceError {
    #[error("storefront API error: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_the_api_error() {
        let error = WishlistServiceError::from(ApiError::NotFound("product 7".to_string()));

        assert_eq!(error.to_string(), "storefront API error: not found: product 7");
    }
}
