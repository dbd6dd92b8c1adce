//! Show pending changes in the content store

use anyhow::Result;

use crate::api::ApiClient;

pub async fn run(client: &ApiClient) -> Result<()> {
    let response = client.git_status().await?;
    if response.files.is_empty() {
        println!("Working tree clean for content/.");
        return Ok(());
    }

    println!("Pending changes ({}):", response.files.len());
    for file in response.files {
        println!("  {} {}", file.status, file.path);
    }

    Ok(())
}
