//! Content loader - loads posts and pages from source directory

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Page, Post};
use crate::permalink::PermalinkResolver;
use crate::Papyrus;

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    app: &'a Papyrus,
    renderer: MarkdownRenderer,
    resolver: PermalinkResolver,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(app: &'a Papyrus) -> Self {
        let renderer = MarkdownRenderer::with_options(app.config.highlight.clone());
        let resolver = PermalinkResolver::from_config(&app.config);
        Self {
            app,
            renderer,
            resolver,
        }
    }

    /// Load all posts from source/_posts
    ///
    /// Draft and future-dated posts are filtered according to the site
    /// configuration; the result is sorted newest-first. Fails when two
    /// published posts resolve to the same slug.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.app.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path, &posts_dir) {
                    Ok(post) => {
                        if post.draft && !self.app.config.render_drafts {
                            tracing::debug!("Skipping draft: {}", post.source);
                            continue;
                        }
                        if !self.app.config.future && post.date > now_fixed() {
                            tracing::debug!("Skipping future-dated post: {}", post.source);
                            continue;
                        }
                        posts.push(post);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        self.check_slug_uniqueness(&posts)?;

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Slugs must be unique among published posts; two posts sharing one
    /// would silently overwrite each other's output directory.
    fn check_slug_uniqueness(&self, posts: &[Post]) -> Result<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for post in posts.iter().filter(|p| !p.draft) {
            if let Some(other) = seen.insert(&post.slug, &post.source) {
                anyhow::bail!(
                    "duplicate slug {:?}: both {} and {} resolve to it",
                    post.slug,
                    other,
                    post.source
                );
            }
        }
        Ok(())
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, posts_dir: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        let tz = self.app.config.tz();

        // Get file metadata for dates
        let metadata = fs::metadata(path)?;
        let file_modified = metadata
            .modified()
            .ok()
            .map(|t| DateTime::<Utc>::from(t).with_timezone(&tz).fixed_offset());

        // Determine dates
        let date = fm
            .parse_date(tz)
            .or(file_modified)
            .unwrap_or_else(now_fixed);
        let updated = fm.parse_updated(tz).or(file_modified);

        // Get title from front-matter or filename
        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        // The content identifier is the path relative to the posts dir with
        // the extension stripped; a post in its own asset folder keeps the
        // folder name as a prefix segment.
        let relative = path.strip_prefix(posts_dir).unwrap_or(path);
        let id = relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        // Resolve the URL path; a front-matter slug overrides the
        // filename-derived one.
        let resolved_id = fm.slug.clone().unwrap_or_else(|| id.clone());
        let slug = self
            .resolver
            .slug_of(&resolved_id)
            .with_context(|| format!("cannot derive slug for {:?}", path))?
            .to_string();
        let permalink_path = self.resolver.resolve(&resolved_id)?;

        let permalink = format!(
            "{}{}",
            self.app.config.url.trim_end_matches('/'),
            permalink_path
        );

        // Calculate source path relative to source dir
        let source = relative_source(path, &self.app.source_dir);

        // Split excerpt and render markdown
        let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
        let content_html = self.renderer.render(&full_md)?;
        let excerpt_html = excerpt_md
            .as_ref()
            .map(|e| self.renderer.render(e).unwrap_or_default());

        let mut post = Post::new(id, slug, title, date);
        post.description = fm.description.clone().unwrap_or_default();
        post.author = fm
            .author
            .clone()
            .unwrap_or_else(|| self.app.config.author.clone());
        post.updated = updated;
        post.raw = body.to_string();
        post.content = content_html;
        post.excerpt = excerpt_html;
        post.tags = fm.tags.clone();
        post.featured = fm.featured;
        post.draft = fm.draft;
        post.layout = fm.layout.clone().unwrap_or_else(|| "post".to_string());
        post.source = source;
        post.full_source = path.to_path_buf();
        post.path = permalink_path;
        post.permalink = permalink;
        post.assets = collect_assets(path, posts_dir);
        post.extra = fm.extra;

        Ok(post)
    }

    /// Load all pages (non-post markdown files)
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.app.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            // Skip special directories
            let relative = path.strip_prefix(&self.app.source_dir).unwrap_or(path);
            let first_component = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str());

            if let Some(first) = first_component {
                if first.starts_with('_') {
                    continue;
                }
            }

            if path.is_file() && is_markdown_file(path) {
                match self.load_page(path) {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        tracing::warn!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        let tz = self.app.config.tz();

        let metadata = fs::metadata(path)?;
        let file_modified = metadata
            .modified()
            .ok()
            .map(|t| DateTime::<Utc>::from(t).with_timezone(&tz).fixed_offset());

        let date = fm
            .parse_date(tz)
            .or(file_modified)
            .unwrap_or_else(now_fixed);
        let updated = fm.parse_updated(tz).or(file_modified);

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let source = relative_source(path, &self.app.source_dir);

        // Pages keep their source-tree location in the URL; index.md maps to
        // its parent directory.
        let page_path = {
            let without_ext = source.trim_end_matches(".md").trim_end_matches(".markdown");

            if without_ext.ends_with("/index") || without_ext == "index" {
                without_ext.trim_end_matches("index").to_string()
            } else {
                without_ext.to_string() + "/"
            }
        };

        let page_path = if page_path.is_empty() {
            "/".to_string()
        } else {
            page_path
        };

        let permalink = format!(
            "{}{}{}",
            self.app.config.url.trim_end_matches('/'),
            self.app.config.root,
            page_path.trim_start_matches('/')
        );

        let content_html = self.renderer.render(body)?;

        let mut page = Page::new(title, date, source);
        page.updated = updated;
        page.raw = body.to_string();
        page.content = content_html;
        page.layout = fm.layout.unwrap_or_else(|| "page".to_string());
        page.full_source = path.to_path_buf();
        page.path = page_path;
        page.permalink = permalink;
        page.extra = fm.extra;

        Ok(page)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Non-markdown files sitting next to a post belong to it and are copied
/// into its output directory. Only posts in their own asset folder have
/// co-located assets; files at the top of the posts dir are shared.
fn collect_assets(post_path: &Path, posts_dir: &Path) -> Vec<std::path::PathBuf> {
    let Some(dir) = post_path.parent() else {
        return Vec::new();
    };
    if dir == posts_dir {
        return Vec::new();
    }

    let mut assets: Vec<_> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && !is_markdown_file(p))
        .collect();
    assets.sort();
    assets
}

fn relative_source(path: &Path, source_dir: &Path) -> String {
    path.strip_prefix(source_dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn now_fixed() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Papyrus;
    use std::fs;

    fn write_site(dir: &Path, posts: &[(&str, &str)]) {
        fs::create_dir_all(dir.join("source/_posts")).unwrap();
        fs::write(dir.join("papyrus.yml"), "title: Test\n").unwrap();
        for (name, content) in posts {
            let path = dir.join("source/_posts").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn test_load_posts_nested_asset_folder() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            &[(
                "20250402-introducing-remote-swe-agents/introducing-remote-swe-agents.md",
                "---\ntitle: Intro\ndate: 2025-04-02\n---\nbody\n",
            )],
        );
        fs::write(
            tmp.path()
                .join("source/_posts/20250402-introducing-remote-swe-agents/diagram.png"),
            b"png",
        )
        .unwrap();

        let app = Papyrus::new(tmp.path()).unwrap();
        let posts = ContentLoader::new(&app).load_posts().unwrap();
        assert_eq!(posts.len(), 1);

        let post = &posts[0];
        assert_eq!(
            post.id,
            "20250402-introducing-remote-swe-agents/introducing-remote-swe-agents"
        );
        // The asset-folder prefix never leaks into the URL.
        assert_eq!(post.slug, "introducing-remote-swe-agents");
        assert_eq!(post.path, "/posts/introducing-remote-swe-agents/");
        assert_eq!(post.assets.len(), 1);
    }

    #[test]
    fn test_drafts_skipped_by_default() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            &[
                ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nx\n"),
                (
                    "b.md",
                    "---\ntitle: B\ndate: 2024-01-02\ndraft: true\n---\nx\n",
                ),
            ],
        );

        let app = Papyrus::new(tmp.path()).unwrap();
        let posts = ContentLoader::new(&app).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "A");
    }

    #[test]
    fn test_duplicate_slug_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            &[
                ("2024-old/hello.md", "---\ntitle: Old\ndate: 2024-01-01\n---\nx\n"),
                ("2025-new/hello.md", "---\ntitle: New\ndate: 2025-01-01\n---\nx\n"),
            ],
        );

        let app = Papyrus::new(tmp.path()).unwrap();
        let err = ContentLoader::new(&app).load_posts().unwrap_err();
        assert!(err.to_string().contains("duplicate slug"));
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            &[
                ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nx\n"),
                ("b.md", "---\ntitle: B\ndate: 2024-06-01\n---\nx\n"),
            ],
        );

        let app = Papyrus::new(tmp.path()).unwrap();
        let posts = ContentLoader::new(&app).load_posts().unwrap();
        assert_eq!(posts[0].title, "B");
        assert_eq!(posts[1].title, "A");
    }

    #[test]
    fn test_slug_override() {
        let tmp = tempfile::tempdir().unwrap();
        write_site(
            tmp.path(),
            &[(
                "some-file.md",
                "---\ntitle: T\ndate: 2024-01-01\nslug: pretty-name\n---\nx\n",
            )],
        );

        let app = Papyrus::new(tmp.path()).unwrap();
        let posts = ContentLoader::new(&app).load_posts().unwrap();
        assert_eq!(posts[0].slug, "pretty-name");
        assert_eq!(posts[0].path, "/posts/pretty-name/");
    }
}
