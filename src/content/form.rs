//! Editor form state and validation

use serde_json::Value;

use crate::api::types::{ContentDocument, ContentPayload, ContentType};

/// Client-local draft of the document being edited.
///
/// `id` is present if and only if an existing document is being edited;
/// the categories field holds the comma-separated display form of the
/// frontmatter list.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    pub id: Option<String>,
    pub kind: ContentType,
    pub title: String,
    pub date: String,
    pub categories: String,
    pub draft: bool,
    pub link: String,
    pub comment: String,
    pub body: String,
}

impl EditorForm {
    /// Empty form tagged with a content type; the date defaults to today.
    pub fn empty(kind: ContentType, today: &str) -> Self {
        Self {
            id: None,
            kind,
            title: String::new(),
            date: today.to_string(),
            categories: String::new(),
            draft: true,
            link: String::new(),
            comment: String::new(),
            body: String::new(),
        }
    }

    /// Populate the form from a fetched document.
    ///
    /// Frontmatter categories are joined for display; draft defaults to
    /// true and the date to `today` when the frontmatter leaves them out.
    pub fn from_document(document: &ContentDocument, today: &str) -> Self {
        let frontmatter = &document.frontmatter;
        let title = frontmatter
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let date = frontmatter
            .get("date")
            .and_then(Value::as_str)
            .unwrap_or(today)
            .to_string();
        let categories = frontmatter
            .get("categories")
            .and_then(Value::as_array)
            .map(|values| join_categories(values.iter().filter_map(Value::as_str)))
            .unwrap_or_default();
        let draft = frontmatter
            .get("draft")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Self {
            id: Some(document.id.clone()),
            kind: document.kind,
            title,
            date,
            categories,
            draft,
            link: String::new(),
            comment: String::new(),
            body: document.body.clone(),
        }
    }

    /// Validate before save; a failure rejects the save locally with a
    /// message and no network call is made.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        let link = self.link.trim();
        if !link.is_empty() && reqwest::Url::parse(link).is_err() {
            return Err("Link must be a valid URL".to_string());
        }
        Ok(())
    }

    /// Build the request payload: the comma-separated categories become a
    /// trimmed list and blank link/comment are omitted. The content type
    /// is left unset; create fills it in.
    pub fn payload(&self) -> ContentPayload {
        ContentPayload {
            kind: None,
            title: self.title.clone(),
            date: self.date.clone(),
            categories: split_categories(&self.categories),
            draft: self.draft,
            body: self.body.clone(),
            link: opt_field(&self.link),
            comment: opt_field(&self.comment),
        }
    }
}

/// `"a, b ,c"` -> `["a", "b", "c"]`
pub fn split_categories(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// `["x", "y"]` -> `"x, y"`
pub fn join_categories<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

fn opt_field(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(frontmatter: serde_json::Value) -> ContentDocument {
        ContentDocument {
            id: "post/a".to_string(),
            kind: ContentType::Post,
            path: "content/posts/a.md".to_string(),
            frontmatter: frontmatter.as_object().unwrap().clone(),
            body: "Body text.".to_string(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_split_categories_trims_and_drops_empties() {
        assert_eq!(split_categories("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_categories(" , ,"), Vec::<String>::new());
        assert_eq!(split_categories(""), Vec::<String>::new());
    }

    #[test]
    fn test_join_categories_for_display() {
        assert_eq!(join_categories(["x", "y"].into_iter()), "x, y");
    }

    #[test]
    fn test_validate_requires_title() {
        let mut form = EditorForm::empty(ContentType::Note, "2024-01-15");
        assert!(form.validate().is_err());
        form.title = "   ".to_string();
        assert_eq!(form.validate().unwrap_err(), "Title is required");
        form.title = "Hello".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_link() {
        let mut form = EditorForm::empty(ContentType::Note, "2024-01-15");
        form.title = "Hello".to_string();
        form.link = "not a url".to_string();
        assert_eq!(form.validate().unwrap_err(), "Link must be a valid URL");

        form.link = "https://example.com/page".to_string();
        assert!(form.validate().is_ok());

        form.link = String::new();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_payload_round_trip_for_categories() {
        let mut form = EditorForm::empty(ContentType::Post, "2024-01-15");
        form.title = "Hello".to_string();
        form.categories = "a, b ,c".to_string();

        let payload = form.payload();
        assert_eq!(payload.categories, vec!["a", "b", "c"]);
        assert_eq!(payload.link, None);
        assert_eq!(payload.comment, None);
    }

    #[test]
    fn test_from_document_joins_categories() {
        let doc = document(json!({"title": "T", "categories": ["x", "y"]}));
        let form = EditorForm::from_document(&doc, "2024-01-15");
        assert_eq!(form.categories, "x, y");
        assert_eq!(form.title, "T");
        assert_eq!(form.id.as_deref(), Some("post/a"));
        assert_eq!(form.body, "Body text.");
    }

    #[test]
    fn test_from_document_defaults() {
        let doc = document(json!({"title": "T"}));
        let form = EditorForm::from_document(&doc, "2024-01-15");
        // Draft defaults to true, the date to today, and the
        // editor-only fields start blank.
        assert!(form.draft);
        assert_eq!(form.date, "2024-01-15");
        assert_eq!(form.categories, "");
        assert_eq!(form.link, "");
        assert_eq!(form.comment, "");
    }

    #[test]
    fn test_from_document_reads_explicit_draft() {
        let doc = document(json!({"title": "T", "draft": false, "date": "2023-10-01"}));
        let form = EditorForm::from_document(&doc, "2024-01-15");
        assert!(!form.draft);
        assert_eq!(form.date, "2023-10-01");
    }
}
