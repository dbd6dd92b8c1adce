//! Product catalog presentation
//!
//! A stateless leaf, unrelated to the editing workflow: it renders one
//! catalog item as an HTML card fragment for the product listing page.

use serde::{Deserialize, Serialize};

use crate::content::sanitize::escape_html;

/// One item in a product collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductItem {
    pub name: String,
    pub description: String,
    pub cover: String,
    pub link: String,
}

/// A named group of products
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCollection {
    pub collection: String,
    pub description: String,
    pub items: Vec<ProductItem>,
}

/// Render one product as an HTML card.
///
/// The outbound link opens in a new browsing context with `rel=noopener`,
/// so an externally supplied target gets no reference back to the opener.
pub fn product_card(product: &ProductItem) -> String {
    format!(
        r#"<a class="product-card" href="{href}" target="_blank" rel="noopener noreferrer">
  <img src="{cover}" alt="{name}" loading="lazy">
  <div class="product-card-body">
    <h3>{name}</h3>
    <p>{description}</p>
  </div>
</a>"#,
        href = escape_html(&product.link),
        cover = escape_html(&product.cover),
        name = escape_html(&product.name),
        description = escape_html(&product.description),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ProductItem {
        ProductItem {
            name: "Widget".to_string(),
            description: "A useful widget.".to_string(),
            cover: "https://cdn.example.com/widget.png".to_string(),
            link: "https://example.com/widget".to_string(),
        }
    }

    #[test]
    fn test_card_isolates_outbound_link() {
        let html = product_card(&product());
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(r#"href="https://example.com/widget""#));
    }

    #[test]
    fn test_card_renders_all_fields() {
        let html = product_card(&product());
        assert!(html.contains("<h3>Widget</h3>"));
        assert!(html.contains("<p>A useful widget.</p>"));
        assert!(html.contains(r#"src="https://cdn.example.com/widget.png""#));
    }

    #[test]
    fn test_card_escapes_interpolated_fields() {
        let mut item = product();
        item.name = "<script>alert(1)</script>".to_string();
        let html = product_card(&item);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_collection_deserializes() {
        let json = r#"{
            "collection": "Tools",
            "description": "Things we ship",
            "items": [{
                "name": "Widget",
                "description": "A useful widget.",
                "cover": "https://cdn.example.com/widget.png",
                "link": "https://example.com/widget"
            }]
        }"#;
        let collection: ProductCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.items.len(), 1);
        assert_eq!(collection.items[0].name, "Widget");
    }
}
