//! Wire types for the CMS REST API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The two kinds of content the CMS manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Note,
    Post,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Note => "note",
            ContentType::Post => "post",
        }
    }

    /// The other content type
    pub fn toggled(self) -> Self {
        match self {
            ContentType::Note => ContentType::Post,
            ContentType::Post => ContentType::Note,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a content listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub path: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub draft: Option<bool>,
    pub updated_at: String,
}

/// One page of content summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentListResponse {
    pub items: Vec<ContentSummary>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

/// A full content record
///
/// The frontmatter mapping keeps the server's field order, so a document
/// survives an edit round-trip without its metadata being reshuffled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub path: String,
    pub frontmatter: Map<String, Value>,
    pub body: String,
    pub raw: String,
}

/// Response from the login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Response from the identity endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: String,
}

/// One pending file in the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStatusItem {
    pub status: String,
    pub path: String,
}

/// Snapshot of pending changes in the content store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitStatusResponse {
    pub changed: bool,
    pub files: Vec<GitStatusItem>,
}

/// Result of a publish action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub commit_hash: String,
    pub message: String,
    pub files: Vec<GitStatusItem>,
    pub output: String,
}

/// Request body for the login endpoint
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Request body for create/update content
///
/// `kind` is only sent on create; blank optional fields are omitted
/// entirely rather than sent as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentPayload {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentType>,
    pub title: String,
    pub date: String,
    pub categories: Vec<String>,
    pub draft: bool,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for the publish endpoint
#[derive(Debug, Serialize)]
pub struct PublishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_optional_fields_missing() {
        let json = r#"{
            "id": "note/hello",
            "type": "note",
            "path": "content/notes/hello.md",
            "slug": "hello",
            "title": "Hello",
            "updated_at": "2024-01-15T10:30:00Z"
        }"#;
        let summary: ContentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.kind, ContentType::Note);
        assert_eq!(summary.date, None);
        assert_eq!(summary.draft, None);
    }

    #[test]
    fn test_payload_omits_blank_optionals() {
        let payload = ContentPayload {
            kind: None,
            title: "Hello".to_string(),
            date: "2024-01-15".to_string(),
            categories: vec!["a".to_string()],
            draft: true,
            body: String::new(),
            link: None,
            comment: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("link"));
        assert!(!json.contains("comment"));
        assert!(!json.contains("type"));
    }

    #[test]
    fn test_payload_includes_type_on_create() {
        let payload = ContentPayload {
            kind: Some(ContentType::Post),
            title: "Hello".to_string(),
            date: "2024-01-15".to_string(),
            categories: Vec::new(),
            draft: false,
            body: "text".to_string(),
            link: Some("https://example.com".to_string()),
            comment: None,
        };
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "post");
        assert_eq!(json["link"], "https://example.com");
    }

    #[test]
    fn test_content_type_toggled() {
        assert_eq!(ContentType::Note.toggled(), ContentType::Post);
        assert_eq!(ContentType::Post.toggled(), ContentType::Note);
    }

    #[test]
    fn test_frontmatter_preserves_field_order() {
        let json = r#"{
            "id": "post/a",
            "type": "post",
            "path": "content/posts/a.md",
            "frontmatter": {"title": "A", "date": "2024-01-01", "categories": ["x"], "draft": true},
            "body": "",
            "raw": ""
        }"#;
        let document: ContentDocument = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = document.frontmatter.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "date", "categories", "draft"]);
    }
}
