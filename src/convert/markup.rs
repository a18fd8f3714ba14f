//! Markdown to styled HTML with comrak.

use comrak::{Options, markdown_to_html};

/// The stylesheet every document is rendered with.
pub const STYLESHEET: &str = include_str!("../../assets/style.css");

/// Render markdown to an HTML fragment.
pub fn markdown_to_fragment(markdown: &str) -> String {
    let mut options = Options::default();

    // GitHub Flavored Markdown extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.superscript = true;
    options.extension.shortcodes = true;
    options.extension.header_ids = Some(String::new());
    options.extension.description_lists = true;

    markdown_to_html(markdown, &options)
}

/// Render markdown to a complete HTML page carrying `stylesheet` inline.
pub fn styled_document(markdown: &str, stylesheet: &str) -> String {
    let body = markdown_to_fragment(markdown);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{stylesheet}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_renders_heading_with_id() {
        let html = markdown_to_fragment("# Hello World");
        assert!(html.contains("<h1"));
        assert!(html.contains("hello-world"));
        assert!(html.contains("Hello World</h1>"));
    }

    #[test]
    fn test_fragment_renders_gfm_table_and_strikethrough() {
        let html = markdown_to_fragment("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_styled_document_embeds_stylesheet_once() {
        let html = styled_document("text", "body { color: red; }\n");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("body { color: red; }").count(), 1);
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<p>text</p>"));
    }

    #[test]
    fn test_raw_html_is_not_passed_through() {
        let html = markdown_to_fragment("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_bundled_stylesheet_is_not_empty() {
        assert!(STYLESHEET.contains("body"));
    }
}
