//! Built-in templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; there is no on-disk
//! theme to install or configure.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded template set
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The templates generate HTML; URLs and pre-rendered content must
        // not be escaped again.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("builtin/layout.html")),
            ("index.html", include_str!("builtin/index.html")),
            ("post.html", include_str!("builtin/post.html")),
            ("page.html", include_str!("builtin/page.html")),
            ("archive.html", include_str!("builtin/archive.html")),
            ("tag.html", include_str!("builtin/tag.html")),
            ("tags.html", include_str!("builtin/tags.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}

/// Site-wide data available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub posts: Vec<PostData>,
    pub pages: Vec<PageData>,
    pub tags: HashMap<String, usize>,
    pub word_count: usize,
}

/// Configuration data available to every template
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    /// Application base path, normalized to end with a slash
    pub root: String,
    pub post_dir: String,
    pub tag_dir: String,
    pub archive_dir: String,
    pub per_page: usize,
}

/// A post as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub date: String,
    pub date_iso: String,
    pub updated: Option<String>,
    pub path: String,
    pub permalink: String,
    pub tags: Vec<TagLink>,
    pub featured: bool,
    pub content: String,
    pub excerpt: Option<String>,
    pub word_count: usize,
}

/// A standalone page as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub title: String,
    pub date: String,
    pub path: String,
    pub permalink: String,
    pub content: String,
    pub layout: String,
}

/// A tag name with its listing URL
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub path: String,
}

/// Tag listing data
#[derive(Debug, Clone, Serialize)]
pub struct TagData {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub count: usize,
}

/// One year of the archive
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveYearData {
    pub year: i32,
    pub posts: Vec<PostData>,
}

/// Pagination state for index pages
#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub per_page: usize,
    pub total: usize,
    pub current: usize,
    pub current_url: String,
    pub prev_link: String,
    pub next_link: String,
}

/// Previous/next post navigation
#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        // Tera validates templates at load time; a bad block or missing
        // parent fails here.
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_render_page_template() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData {
                title: "Test".into(),
                subtitle: String::new(),
                description: String::new(),
                author: "A".into(),
                language: "en".into(),
                url: "https://example.com".into(),
                root: "/".into(),
                post_dir: "posts".into(),
                tag_dir: "tags".into(),
                archive_dir: "archives".into(),
                per_page: 10,
            },
        );
        context.insert("page_title", "About");
        context.insert("page_content", "<p>Hi</p>");
        context.insert("current_year", "2024");

        let html = renderer.render("page.html", &context).unwrap();
        assert!(html.contains("About"));
        assert!(html.contains("<p>Hi</p>"));
    }
}
