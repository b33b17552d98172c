//! HTTP client for the storefront cart endpoints.

use std::time::Duration;

use async_trait::async_trait;
use imports::prelude::{Cart, CartItemId};
use reqwest::{Client, RequestBuilder, Response, StatusCode, header::AUTHORIZATION};
use tracing::debug;

use super::{AddCartItem, RemoteCartError, RemoteCartService, models::CartDocument};

/// Path of the cart resource below the API base URL.
const CART_PATH: &str = "orders/cart/";

/// Configuration for connecting to the storefront API.
#[derive(Debug, Clone)]
pub struct HttpCartConfig {
    /// API base URL, e.g. `"https://london-imports-api.onrender.com/api/v1"`.
    pub base_url: String,

    /// Bearer token of the signed-in customer, if any.
    pub access_token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// Cart service backed by the storefront REST API.
///
/// The API has no quantity endpoint, so [`RemoteCartService::update_item`]
/// always answers [`RemoteCartError::Unsupported`].
#[derive(Debug, Clone)]
pub struct HttpCartService {
    http: Client,
    cart_url: String,
    access_token: Option<String>,
}

impl HttpCartService {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: HttpCartConfig) -> Result<Self, RemoteCartError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            cart_url: cart_url(&config.base_url),
            access_token: config.access_token,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    async fn read_cart(response: Response) -> Result<Cart, RemoteCartError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteCartError::Unauthorized,
                StatusCode::NOT_FOUND => RemoteCartError::NotFound(text),
                StatusCode::BAD_REQUEST => RemoteCartError::Validation(text),
                _ => RemoteCartError::UnexpectedResponse {
                    status: status.as_u16(),
                    body: text,
                },
            });
        }

        let document: CartDocument = response.json().await?;

        Cart::try_from(document)
    }
}

#[async_trait]
impl RemoteCartService for HttpCartService {
    async fn get_cart(&self) -> Result<Cart, RemoteCartError> {
        debug!(url = %self.cart_url, "fetching cart");

        let response = self
            .authorized(self.http.get(&self.cart_url))
            .send()
            .await?;

        Self::read_cart(response).await
    }

    async fn add_item(&self, item: AddCartItem) -> Result<Cart, RemoteCartError> {
        debug!(product_id = %item.product_id, quantity = item.quantity, "adding cart item");

        let response = self
            .authorized(self.http.post(&self.cart_url))
            .json(&item)
            .send()
            .await?;

        Self::read_cart(response).await
    }

    async fn remove_item(&self, item: &CartItemId) -> Result<Cart, RemoteCartError> {
        debug!(item_id = %item, "removing cart item");

        let response = self
            .authorized(self.http.delete(&self.cart_url))
            .query(&[("item_id", item.as_str())])
            .send()
            .await?;

        Self::read_cart(response).await
    }

    async fn update_item(
        &self,
        _item: &CartItemId,
        _quantity: u32,
    ) -> Result<Cart, RemoteCartError> {
        Err(RemoteCartError::Unsupported)
    }
}

fn cart_url(base_url: &str) -> String {
    format!("{}/{CART_PATH}", base_url.trim_end_matches('/'))
}
