//! List content from the CMS

use anyhow::Result;

use crate::api::types::ContentType;
use crate::api::ApiClient;

/// List content by type, optionally filtered by a title query.
pub async fn run(client: &ApiClient, kind: &str, query: &str) -> Result<()> {
    let kind = match kind {
        "note" | "notes" => ContentType::Note,
        "post" | "posts" => ContentType::Post,
        other => {
            anyhow::bail!("Unknown type: {}. Available: note, post", other);
        }
    };

    let response = client.list_content(kind, query).await?;
    println!("{}s ({} of {}):", kind, response.items.len(), response.total);
    for item in response.items {
        println!(
            "  {} - {} [{}]{}",
            item.date.as_deref().unwrap_or("no-date"),
            item.title,
            item.id,
            if item.draft.unwrap_or(false) {
                " (draft)"
            } else {
                ""
            }
        );
    }

    Ok(())
}
