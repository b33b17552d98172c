//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::SessionAuth,
    config::AppConfig,
    domain::carts::CartStore,
    guest::FileGuestStore,
    remote::{HttpCartService, RemoteCartError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build cart service client")]
    CartService(#[source] RemoteCartError),
}

#[derive(Debug)]
pub struct AppContext {
    pub cart: CartStore,
    pub session: Arc<SessionAuth>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// The session starts signed in when an access token is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let remote = HttpCartService::new(config.api.http_cart_config())
            .map_err(AppInitError::CartService)?;

        let session = Arc::new(SessionAuth::from_token(config.api.access_token.as_deref()));
        let guest = FileGuestStore::new(&config.guest.guest_cart_dir);

        Ok(Self {
            cart: CartStore::new(Arc::new(remote), Arc::new(guest), session.clone()),
            session,
        })
    }
}
