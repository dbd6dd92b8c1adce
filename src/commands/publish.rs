//! Commit and push pending content changes

use anyhow::Result;

use crate::api::ApiClient;

/// Publish pending changes; refuses when the working tree is clean, the
/// same gate the interactive publish view applies.
pub async fn run(client: &ApiClient, message: Option<&str>) -> Result<()> {
    let status = client.git_status().await?;
    if status.files.is_empty() {
        println!("No pending changes in content/.");
        return Ok(());
    }

    tracing::info!("publishing {} pending file(s)", status.files.len());
    let result = client.publish(message).await?;

    println!("Committed {}: {}", result.commit_hash, result.message);
    for file in &result.files {
        println!("  {} {}", file.status, file.path);
    }
    if !result.output.trim().is_empty() {
        println!("{}", result.output.trim_end());
    }

    Ok(())
}
