//! HTTP client for the storefront API.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use storefront::{orders::NewOrder, products::ProductId};
use tracing::debug;

use super::{ApiError, PlacedOrder, StorefrontApi, models::WishlistEntry};

/// Settings for connecting to the storefront API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// API origin, e.g. `"http://localhost:8000"`.
    pub base_url: String,

    /// Bearer token of the signed-in user.
    pub token: Option<String>,
}

/// [`StorefrontApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    settings: ApiSettings,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a new client from the given settings.
    #[must_use]
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            settings,
            http: Client::new(),
        }
    }

    /// Absolute URL of a `/api/v1/` path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/{}",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));

        match &self.settings.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        debug!(%status, url = %response.url(), "storefront api response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        Err(ApiError::from_status(status, body))
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn place_order(&self, order: &NewOrder) -> Result<PlacedOrder, ApiError> {
        let response = Self::send(self.request(Method::POST, "orders/").json(order)).await?;

        Ok(response.json().await?)
    }

    async fn list_wishlist(&self) -> Result<Vec<ProductId>, ApiError> {
        let response = Self::send(self.request(Method::GET, "wishlist/")).await?;
        let entries: Vec<WishlistEntry> = response.json().await?;

        Ok(entries.into_iter().map(|entry| entry.product_id).collect())
    }

    async fn add_to_wishlist(&self, product_id: ProductId) -> Result<(), ApiError> {
        let path = format!("wishlist/add/{product_id}");

        Self::send(self.request(Method::POST, &path)).await?;

        Ok(())
    }

    async fn remove_from_wishlist(&self, product_id: ProductId) -> Result<(), ApiError> {
        let path = format!("wishlist/remove/{product_id}");

        Self::send(self.request(Method::DELETE, &path)).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpStorefrontApi {
        HttpStorefrontApi::new(ApiSettings {
            base_url: base_url.to_string(),
            token: None,
        })
    }

    #[test]
    fn url_joins_without_double_slashes() {
        assert_eq!(
            client("http://localhost:8000/").url("/orders/"),
            "http://localhost:8000/api/v1/orders/"
        );
        assert_eq!(
            client("https://shop.example").url("wishlist/add/4"),
            "https://shop.example/api/v1/wishlist/add/4"
        );
    }
}
