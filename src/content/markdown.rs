//! Markdown rendering for article excerpts and page copy

use pulldown_cmark::{html, Options, Parser};

const MORE_MARKER: &str = "<!-- more -->";

/// Markdown renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is handled separately in FrontMatter::parse()
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Pick the markdown used as an article summary.
    ///
    /// Everything before `<!-- more -->` when the marker is present, otherwise
    /// the first prose paragraph of the body.
    pub fn excerpt(body: &str) -> Option<String> {
        if let Some(pos) = body.find(MORE_MARKER) {
            let excerpt = body[..pos].trim();
            return (!excerpt.is_empty()).then(|| excerpt.to_string());
        }

        body.replace("\r\n", "\n")
            .split("\n\n")
            .map(str::trim)
            .find(|block| is_prose(block))
            .map(str::to_string)
    }
}

/// Headings, fences, html blocks, lists and quotes don't make a summary
fn is_prose(block: &str) -> bool {
    !block.is_empty()
        && !block.starts_with('#')
        && !block.starts_with("```")
        && !block.starts_with("~~~")
        && !block.starts_with('<')
        && !block.starts_with('>')
        && !block.starts_with("- ")
        && !block.starts_with("* ")
        && !block.starts_with('|')
        && !block.starts_with("---")
}
