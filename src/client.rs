//! Defines the global Amplify client.

use anyhow::{anyhow, Result};
use aws_config::from_env;
use aws_sdk_amplify::Client;
use once_cell::sync::OnceCell;
use std::env;

/// Normalize an endpoint override into a URL, assuming https when no
/// scheme is given.
fn endpoint_url(value: String) -> String {
    if value.starts_with("http://") || value.starts_with("https://") {
        value
    } else {
        format!("https://{}", value)
    }
}

/// Global Amplify client instance.
static CURRENT: OnceCell<Client> = OnceCell::new();

/// Initialize the global Amplify client.
pub async fn init() -> Result<()> {
    let config = if let Ok(endpoint) = env::var("AWS_ENDPOINT_URL") {
        from_env()
            .endpoint_url(endpoint_url(endpoint))
            .region("us-east-1") // should be OK since the endpoint was overridden
            .load()
    } else {
        from_env().load()
    }
    .await;
    let client = Client::new(&config);
    CURRENT
        .set(client)
        .map_err(|_| anyhow!("client::CURRENT was already initialized"))
}

/// Get the current Amplify client instance, or panic if it hasn't
/// been initialized.
pub fn current() -> &'static Client {
    CURRENT.get().expect("client is not initialized")
}
