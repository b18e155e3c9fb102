//! Login, logout and the route guard.
//!
//! Protected commands obtain their client through
//! [`authenticated_client`], which refuses to build one when no token is
//! stored.

use tracing::info;

use crate::client::WebManagerClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::token::{StoredToken, TokenStore};

/// Log in and store the issued token.
pub async fn login(config: &ClientConfig, username: &str, password: &str) -> Result<StoredToken> {
    let client = WebManagerClient::new(config)?;
    let token = client.login(username, password).await?;

    let stored = StoredToken::new(token, username);
    TokenStore::from_config(config).save(&stored)?;

    info!(username, "logged in");
    Ok(stored)
}

/// Forget the stored token. Returns true if one existed.
pub fn logout(config: &ClientConfig) -> Result<bool> {
    let removed = TokenStore::from_config(config).clear()?;
    if removed {
        info!("logged out");
    }
    Ok(removed)
}

/// Build a client carrying the stored token.
///
/// Fails with [`ClientError::NotAuthenticated`] when nobody is logged in.
pub fn authenticated_client(config: &ClientConfig) -> Result<WebManagerClient> {
    let stored = TokenStore::from_config(config)
        .load()?
        .ok_or(ClientError::NotAuthenticated)?;

    Ok(WebManagerClient::new(config)?.with_token(stored.token))
}
