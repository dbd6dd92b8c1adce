//! Allowlist HTML sanitizer for preview output

/// Tags allowed through the sanitizer; everything else is escaped so it
/// renders as text.
const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "table", "thead", "tbody", "tr",
    "th", "td", "a", "img", "strong", "em", "del", "code", "pre", "blockquote", "hr", "br",
    "div", "span", "sup",
];

/// Tags whose entire content is dropped, not just the tag itself
const DROPPED_CONTENT_TAGS: &[&str] = &["script", "style"];

#[derive(Debug)]
struct TagToken {
    name: String,
    closing: bool,
    attrs: Vec<(String, String)>,
    /// Byte index just past the closing `>`
    end: usize,
}

/// Sanitize an HTML fragment: keep allowed tags with their safe
/// attributes, drop script/style subtrees entirely, and escape every
/// other tag so it displays as text.
pub fn sanitize_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let bytes = html.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            let start = i;
            while i < bytes.len() && bytes[i] != b'<' {
                i += 1;
            }
            out.push_str(&html[start..i]);
            continue;
        }

        if html[i..].starts_with("<!--") {
            match html[i..].find("-->") {
                Some(pos) => {
                    i += pos + 3;
                    continue;
                }
                None => {
                    out.push_str("&lt;");
                    i += 1;
                    continue;
                }
            }
        }

        match parse_tag(html, i) {
            Some(tag) if DROPPED_CONTENT_TAGS.contains(&tag.name.as_str()) => {
                i = if tag.closing {
                    tag.end
                } else {
                    skip_past_closing(html, tag.end, &tag.name)
                };
            }
            Some(tag) if ALLOWED_TAGS.contains(&tag.name.as_str()) => {
                push_tag(&mut out, &tag);
                i = tag.end;
            }
            _ => {
                out.push_str("&lt;");
                i += 1;
            }
        }
    }

    out
}

/// Whether an attribute survives sanitization for a given tag.
fn allowed_attr(tag: &str, name: &str) -> bool {
    matches!((tag, name), ("a", "href") | ("img", "src") | ("img", "alt"))
}

fn push_tag(out: &mut String, tag: &TagToken) {
    if tag.closing {
        out.push_str("</");
        out.push_str(&tag.name);
        out.push('>');
        return;
    }
    out.push('<');
    out.push_str(&tag.name);
    for (name, value) in &tag.attrs {
        if !allowed_attr(&tag.name, name) {
            continue;
        }
        if (name == "href" || name == "src") && !safe_url(value) {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    out.push('>');
}

/// Only http(s), mailto and relative targets survive; anything with
/// another scheme (javascript: in particular) is dropped. Whitespace and
/// control characters are ignored when detecting the scheme, since
/// browsers ignore them too.
fn safe_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_whitespace())
        .collect();
    let lower = compact.to_ascii_lowercase();
    match lower.split_once(':') {
        None => true,
        Some((scheme, _)) => {
            let scheme_like = scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if scheme_like {
                matches!(scheme, "http" | "https" | "mailto")
            } else {
                // ':' inside a path or query, not a scheme
                true
            }
        }
    }
}

/// Skip past `</name>` for tags whose content is dropped; without a
/// closing tag the rest of the fragment is dropped.
fn skip_past_closing(html: &str, from: usize, name: &str) -> usize {
    let needle = format!("</{}", name);
    let lower = html[from..].to_ascii_lowercase();
    match lower.find(&needle) {
        Some(pos) => {
            let after = from + pos + needle.len();
            match html[after..].find('>') {
                Some(end) => after + end + 1,
                None => html.len(),
            }
        }
        None => html.len(),
    }
}

fn parse_tag(html: &str, start: usize) -> Option<TagToken> {
    let bytes = html.as_bytes();
    let mut i = start + 1;
    let closing = if i < bytes.len() && bytes[i] == b'/' {
        i += 1;
        true
    } else {
        false
    };

    let name_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name = html[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        let attr_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'>'
            && bytes[i] != b'/'
        {
            i += 1;
        }
        if i == attr_start {
            return None;
        }
        let attr_name = html[attr_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
                value = unescape_entities(&html[value_start..i]);
                i += 1;
            } else {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = unescape_entities(&html[value_start..i]);
            }
        }
        attrs.push((attr_name, value));
    }

    Some(TagToken {
        name,
        closing,
        attrs,
        end: i,
    })
}

/// Simple HTML escaping
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Reverse of `escape_html`, plus the non-breaking space entity
pub fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag_and_content_removed() {
        let html = "<p>hi</p><script>alert(1)</script><p>bye</p>";
        let clean = sanitize_html(html);
        assert!(!clean.contains("<script"));
        assert!(!clean.contains("alert(1)"));
        assert!(clean.contains("<p>hi</p>"));
        assert!(clean.contains("<p>bye</p>"));
    }

    #[test]
    fn test_allowed_tags_survive() {
        let html = "<h1>Title</h1><ul><li>one</li></ul><pre><code>x</code></pre>";
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_event_handler_attributes_dropped() {
        let html = r#"<p onclick="alert(1)">hi</p>"#;
        assert_eq!(sanitize_html(html), "<p>hi</p>");
    }

    #[test]
    fn test_safe_href_kept_javascript_dropped() {
        let html = r#"<a href="https://example.com">ok</a><a href="javascript:alert(1)">bad</a>"#;
        let clean = sanitize_html(html);
        assert!(clean.contains(r#"<a href="https://example.com">ok</a>"#));
        assert!(clean.contains("<a>bad</a>"));
        assert!(!clean.contains("javascript:"));
    }

    #[test]
    fn test_scheme_detection_ignores_embedded_whitespace() {
        assert!(!safe_url("java\nscript:alert(1)"));
        assert!(!safe_url(" javascript:alert(1)"));
        assert!(safe_url("/relative/path"));
        assert!(safe_url("page.html"));
        assert!(safe_url("https://example.com/a:b"));
        assert!(safe_url("mailto:me@example.com"));
    }

    #[test]
    fn test_unknown_tags_escaped_to_text() {
        let html = "<marquee>hi</marquee>";
        let clean = sanitize_html(html);
        assert!(!clean.contains("<marquee"));
        assert!(clean.contains("&lt;marquee"));
        assert!(clean.contains("hi"));
    }

    #[test]
    fn test_img_keeps_src_and_alt_only() {
        let html = r#"<img src="/cat.png" alt="cat" onerror="alert(1)">"#;
        let clean = sanitize_html(html);
        assert!(clean.contains(r#"src="/cat.png""#));
        assert!(clean.contains(r#"alt="cat""#));
        assert!(!clean.contains("onerror"));
    }

    #[test]
    fn test_html_comments_dropped() {
        let clean = sanitize_html("before<!-- more -->after");
        assert_eq!(clean, "beforeafter");
    }

    #[test]
    fn test_unclosed_script_drops_rest() {
        let clean = sanitize_html("<p>a</p><script>alert(1)");
        assert_eq!(clean, "<p>a</p>");
    }

    #[test]
    fn test_escape_round_trip() {
        let raw = r#"a & b < c > "d" 'e'"#;
        assert_eq!(unescape_entities(&escape_html(raw)), raw);
    }
}
