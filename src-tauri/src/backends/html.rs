use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};

use super::{decode_bytes, DocumentBackend};
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// HTML input: a structural re-rendering into markdown. Headings,
/// paragraphs, list items and preformatted blocks carry over; everything
/// else (scripts, styles, layout markup) contributes nothing.
pub struct HtmlBackend;

impl HtmlBackend {
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Document, ConvertError> {
        let html = Html::parse_document(&decode_bytes(data));
        let title = select_first_text(&html, "title")?;
        let body = render_markdown(&html)?;

        let mut doc = Document::from_markdown(body, InputFormat::Html);
        doc.metadata.title = title;
        Ok(doc)
    }
}

impl DocumentBackend for HtmlBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Html
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let data = fs::read(path)?;
        self.parse_bytes(&data)
    }
}

fn selector(css: &str) -> Result<Selector, ConvertError> {
    Selector::parse(css).map_err(|e| ConvertError::Parse(format!("bad selector {css:?}: {e:?}")))
}

fn select_first_text(html: &Html, css: &str) -> Result<Option<String>, ConvertError> {
    let sel = selector(css)?;
    Ok(html
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty()))
}

fn render_markdown(html: &Html) -> Result<String, ConvertError> {
    let sel = selector("h1, h2, h3, h4, h5, h6, p, li, pre")?;
    let mut blocks: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for el in html.select(&sel) {
        // Anything inside an <li> is already covered by that item's text.
        if has_ancestor(el, "li") {
            continue;
        }
        let tag = el.value().name();
        if tag != "li" && !items.is_empty() {
            blocks.push(items.join("\n"));
            items.clear();
        }
        match tag {
            "li" => {
                let text = inline_text(el);
                if !text.is_empty() {
                    items.push(format!("- {text}"));
                }
            }
            "p" => {
                let text = inline_text(el);
                if !text.is_empty() {
                    blocks.push(text);
                }
            }
            "pre" => {
                let raw = el.text().collect::<String>();
                let raw = raw.trim_matches('\n');
                if !raw.is_empty() {
                    blocks.push(format!("```\n{raw}\n```"));
                }
            }
            heading => {
                let level = heading[1..].parse::<usize>().unwrap_or(1);
                let text = inline_text(el);
                if !text.is_empty() {
                    blocks.push(format!("{} {}", "#".repeat(level), text));
                }
            }
        }
    }
    if !items.is_empty() {
        blocks.push(items.join("\n"));
    }
    Ok(blocks.join("\n\n"))
}

/// Element text with source whitespace collapsed to single spaces.
fn inline_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_ancestor(el: ElementRef, name: &str) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_paragraphs_and_lists() {
        let input = b"<html><head><title>Page</title></head><body>\
            <h1>Top</h1><p>Intro\n  text.</p>\
            <ul><li>one</li><li><p>two</p></li></ul>\
            <h2>Next</h2><p>More.</p></body></html>";
        let doc = HtmlBackend.parse_bytes(input).unwrap();
        assert_eq!(doc.metadata.title.as_deref(), Some("Page"));
        assert_eq!(
            doc.markdown,
            "# Top\n\nIntro text.\n\n- one\n- two\n\n## Next\n\nMore."
        );
    }

    #[test]
    fn nested_paragraph_text_is_not_duplicated() {
        let doc = HtmlBackend
            .parse_bytes(b"<ul><li><p>only once</p></li></ul>")
            .unwrap();
        assert_eq!(doc.markdown, "- only once");
    }

    #[test]
    fn pre_becomes_a_fenced_block() {
        let doc = HtmlBackend
            .parse_bytes(b"<pre>let x = 1;\nlet y = 2;</pre>")
            .unwrap();
        assert_eq!(doc.markdown, "```\nlet x = 1;\nlet y = 2;\n```");
    }

    #[test]
    fn markup_without_content_yields_an_empty_document() {
        let doc = HtmlBackend
            .parse_bytes(b"<html><body><div><script>x()</script></div></body></html>")
            .unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.metadata.title, None);
    }
}
