//! Markdown to HTML for the result view and for the export render container.

use pulldown_cmark::{html, Options, Parser};

/// Inline styles applied inside the export container. Rasterization only
/// sees what is inside the container, so page CSS cannot be relied on.
const EXPORT_STYLE: &str = "\
.brd-export { font-family: Arial, Helvetica, sans-serif; font-size: 12px; line-height: 1.55; color: #1f2933; padding: 32px 40px; background: #ffffff; }\
.brd-export h1 { font-size: 24px; color: #0b3d91; border-bottom: 2px solid #0b3d91; padding-bottom: 6px; }\
.brd-export h2 { font-size: 18px; color: #0b3d91; margin-top: 22px; }\
.brd-export h3 { font-size: 14px; color: #334e68; }\
.brd-export hr { border: none; border-top: 1px solid #d9e2ec; margin: 18px 0; }\
.brd-export table { border-collapse: collapse; width: 100%; }\
.brd-export td, .brd-export th { border: 1px solid #d9e2ec; padding: 4px 6px; }\
.brd-export code { background: #f0f4f8; padding: 1px 3px; }";

/// Escapes the five HTML special characters.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders markdown with tables and strikethrough enabled.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let normalized = markdown.replace("\r\n", "\n");
    let parser = Parser::new_ext(&normalized, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Self-contained styled markup for the off-screen export container.
pub fn styled_document(title: &str, markdown: &str) -> String {
    format!(
        r#"<style>{}</style><div class="brd-export" data-title="{}">{}</div>"#,
        EXPORT_STYLE,
        escape_html(title),
        markdown_to_html(markdown)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_tables() {
        let html = markdown_to_html("# BRD\r\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>BRD</h1>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn styled_document_escapes_title() {
        let doc = styled_document("R&D \"Alpha\"", "text");
        assert!(doc.contains(r#"data-title="R&amp;D &quot;Alpha&quot;""#));
        assert!(doc.starts_with("<style>"));
        assert!(doc.contains("<p>text</p>"));
    }
}
