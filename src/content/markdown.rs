//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// Markdown renderer with syntax highlighting and heading anchors
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    highlight: HighlightConfig,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with default highlighting settings
    pub fn new() -> Self {
        Self::with_options(HighlightConfig::default())
    }

    /// Create with explicit highlighting settings
    pub fn with_options(highlight: HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            highlight,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is stripped before rendering, so YAML metadata blocks
        // stay disabled here.
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();

        let mut in_code = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        // Heading currently being collected: tag name, explicit id, inner
        // events, plain text for the anchor slug.
        let mut heading: Option<(String, Option<String>, Vec<Event>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code = false;
                    let highlighted = self.highlight_code(&code_buf, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_lang = None;
                }
                Event::Text(text) if in_code => {
                    code_buf.push_str(&text);
                }
                Event::Start(Tag::Heading { level, id, .. }) => {
                    heading = Some((
                        level.to_string(),
                        id.map(|s| s.to_string()),
                        Vec::new(),
                        String::new(),
                    ));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((tag, explicit_id, inner, text)) = heading.take() {
                        let anchor = explicit_id.unwrap_or_else(|| slug::slugify(&text));
                        events.push(Event::Html(
                            format!(r#"<{} id="{}">"#, tag, anchor).into(),
                        ));
                        events.extend(inner);
                        events.push(Event::Html(format!("</{}>", tag).into()));
                    }
                }
                other => {
                    if let Some((_, _, inner, text)) = heading.as_mut() {
                        match &other {
                            Event::Text(t) => text.push_str(t),
                            Event::Code(t) => text.push_str(t),
                            _ => {}
                        }
                        inner.push(other);
                    } else {
                        events.push(other);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        if !self.highlight.enable {
            return format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            );
        }

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.highlight.theme)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.highlight.line_number {
                    self.add_line_numbers(&highlighted, lang)
                } else {
                    format!(r#"<div class="highlight {}">{}</div>"#, lang, highlighted)
                }
            }
            Err(_) => {
                // Fallback to plain code block
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang,
                    html_escape(code)
                )
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let line_count = lines.len();

        let mut gutter = String::new();
        let mut code_lines = String::new();

        for (i, line) in lines.iter().enumerate() {
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            if i < line_count - 1 {
                gutter.push('\n');
            }

            code_lines.push_str(line);
            if i < line_count - 1 {
                code_lines.push('\n');
            }
        }

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang, gutter, code_lines
        )
    }

    /// Parse excerpt from content (split by <!-- more -->)
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        if let Some(pos) = content.find("<!-- more -->") {
            let excerpt = content[..pos].trim().to_string();
            let remaining = content[pos + 13..].trim().to_string();
            let full = format!("{}\n\n{}", excerpt, remaining);
            (Some(excerpt), full)
        } else {
            (None, content.to_string())
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains(r#"<h1 id="hello-world">"#));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
    }

    #[test]
    fn test_explicit_heading_id_wins() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Getting started {#setup}").unwrap();
        assert!(html.contains(r#"<h2 id="setup">"#));
    }

    #[test]
    fn test_highlight_disabled_emits_plain_block() {
        let renderer = MarkdownRenderer::with_options(HighlightConfig {
            enable: false,
            ..Default::default()
        });
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_split_excerpt() {
        let content = "This is excerpt.\n<!-- more -->\nThis is more content.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(excerpt, Some("This is excerpt.".to_string()));
        assert!(full.contains("This is excerpt."));
        assert!(full.contains("This is more content."));
    }
}
