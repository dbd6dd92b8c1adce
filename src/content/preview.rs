//! Markdown preview pipeline
//!
//! Two stages, order-dependent: parse markdown to HTML, then sanitize the
//! result. Nothing downstream may consume unsanitized parser output. The
//! pipeline is synchronous and recomputed from scratch on each change.

use pulldown_cmark::{html, Options, Parser};

use crate::content::sanitize::{sanitize_html, unescape_entities};

/// Render a markdown body to sanitized preview HTML.
pub fn render_preview(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION;
    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    sanitize_html(&html_output)
}

/// One display line of the terminal preview pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLine {
    Heading(u8, String),
    Bullet(String),
    Quote(String),
    Code(String),
    Text(String),
    Rule,
    Blank,
}

/// Convert sanitized preview HTML into terminal display lines.
///
/// Consumes sanitizer output only; tags are assumed well formed because
/// the sanitizer escaped everything it did not rebuild itself.
pub fn preview_lines(html: &str) -> Vec<PreviewLine> {
    let mut builder = LineBuilder::default();
    let bytes = html.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            let close = match html[i..].find('>') {
                Some(pos) => i + pos,
                None => break,
            };
            builder.tag(&html[i + 1..close]);
            i = close + 1;
        } else {
            let start = i;
            while i < bytes.len() && bytes[i] != b'<' {
                i += 1;
            }
            builder.text(&unescape_entities(&html[start..i]));
        }
    }

    builder.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Text,
    Heading(u8),
    Bullet,
    Quote,
    Code,
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<PreviewLine>,
    current: String,
    mode: Mode,
    href: Option<String>,
}

impl LineBuilder {
    fn tag(&mut self, tag: &str) {
        let (name, rest) = split_tag(tag);
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                self.mode = Mode::Heading(name.as_bytes()[1] - b'0');
            }
            "/h1" | "/h2" | "/h3" | "/h4" | "/h5" | "/h6" => {
                self.flush();
                self.mode = Mode::Text;
                self.blank();
            }
            "li" => {
                self.flush();
                self.mode = Mode::Bullet;
            }
            "/li" => {
                self.flush();
                self.mode = Mode::Text;
            }
            "blockquote" => {
                self.flush();
                self.mode = Mode::Quote;
            }
            "/blockquote" => {
                self.flush();
                self.mode = Mode::Text;
                self.blank();
            }
            "pre" => {
                self.flush();
                self.mode = Mode::Code;
            }
            "/pre" => {
                self.flush();
                self.mode = Mode::Text;
                self.blank();
            }
            "/p" => {
                self.flush();
                self.blank();
            }
            "p" | "ul" | "ol" | "/ul" | "/ol" | "table" | "/table" | "tr" | "/tr" => self.flush(),
            "/th" | "/td" => {
                if !self.current.is_empty() {
                    self.current.push_str("  ");
                }
            }
            "br" => self.flush(),
            "hr" => {
                self.flush();
                self.lines.push(PreviewLine::Rule);
            }
            "code" | "/code" => {
                if self.mode != Mode::Code {
                    self.current.push('`');
                }
            }
            "a" => {
                self.href = extract_attr(rest, "href");
            }
            "/a" => {
                if let Some(href) = self.href.take() {
                    self.current.push_str(&format!(" ({})", href));
                }
            }
            "img" => {
                let alt = extract_attr(rest, "alt").unwrap_or_default();
                self.current.push_str(&format!("[{}]", alt));
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.mode == Mode::Code {
            self.current.push_str(text);
            return;
        }
        // Soft breaks inside a block collapse to spaces.
        for (index, part) in text.split('\n').enumerate() {
            if index > 0 && !self.current.is_empty() && !self.current.ends_with(' ') {
                self.current.push(' ');
            }
            self.current.push_str(part);
        }
    }

    fn flush(&mut self) {
        if self.mode == Mode::Code {
            let block = std::mem::take(&mut self.current);
            for line in block.trim_end_matches('\n').split('\n') {
                self.lines.push(PreviewLine::Code(line.to_string()));
            }
            return;
        }

        let text = std::mem::take(&mut self.current);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let line = match self.mode {
            Mode::Heading(level) => PreviewLine::Heading(level, text.to_string()),
            Mode::Bullet => PreviewLine::Bullet(text.to_string()),
            Mode::Quote => PreviewLine::Quote(text.to_string()),
            Mode::Code => unreachable!(),
            Mode::Text => PreviewLine::Text(text.to_string()),
        };
        self.lines.push(line);
    }

    fn blank(&mut self) {
        if !matches!(self.lines.last(), Some(PreviewLine::Blank) | None) {
            self.lines.push(PreviewLine::Blank);
        }
    }

    fn finish(mut self) -> Vec<PreviewLine> {
        self.flush();
        while matches!(self.lines.last(), Some(PreviewLine::Blank)) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Split a tag's inner text into its name and the attribute remainder.
fn split_tag(tag: &str) -> (&str, &str) {
    match tag.find(|c: char| c.is_ascii_whitespace()) {
        Some(pos) => (&tag[..pos], &tag[pos..]),
        None => (tag.trim_end_matches('/'), ""),
    }
}

/// Pull one double-quoted attribute value out of sanitized tag text.
fn extract_attr(rest: &str, name: &str) -> Option<String> {
    let needle = format!("{}=\"", name);
    let start = rest.find(&needle)? + needle.len();
    let end = rest[start..].find('"')? + start;
    Some(unescape_entities(&rest[start..end]))
}
