//! Log out and discard the session token

use anyhow::Result;

use crate::api::ApiClient;

/// End the session; the local token is gone afterwards regardless of the
/// remote call's outcome.
pub async fn run(client: &ApiClient) -> Result<()> {
    client.logout().await?;
    println!("Logged out.");
    Ok(())
}
