//! Generator module - generates static HTML files using built-in Tera templates

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{Page, Post};
use crate::helpers::{date_xml, encode_path, escape_xml, strip_html, toc, url_for};
use crate::templates::{
    ArchiveYearData, ConfigData, NavPost, PageData, PaginationData, PostData, SiteData, TagData,
    TagLink, TemplateRenderer,
};
use crate::Papyrus;

/// Static site generator using embedded Tera templates
pub struct Generator {
    app: Papyrus,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Papyrus) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            app: app.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post], pages: &[Page]) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.app.public_dir)?;

        // Copy source assets (images, etc.)
        self.copy_source_assets()?;

        // Sort posts by date (newest first)
        let mut sorted_posts: Vec<_> = posts.to_vec();
        sorted_posts.sort_by(|a, b| b.date.cmp(&a.date));

        let site_data = self.build_site_data(&sorted_posts, pages);
        let config_data = self.build_config_data();

        self.generate_index_pages(&sorted_posts, &site_data, &config_data)?;
        self.generate_post_pages(&sorted_posts, &site_data, &config_data)?;
        self.generate_page_pages(pages, &site_data, &config_data)?;
        self.generate_archive_page(&sorted_posts, &site_data, &config_data)?;
        self.generate_tag_pages(&sorted_posts, &site_data, &config_data)?;
        self.generate_atom_feed(&sorted_posts)?;
        self.generate_sitemap(&sorted_posts, pages)?;

        Ok(())
    }

    /// Project a post into its template representation
    fn post_data(&self, post: &Post) -> PostData {
        let config = &self.app.config;
        let tags = post
            .tags
            .iter()
            .map(|tag| TagLink {
                name: tag.clone(),
                path: url_for(
                    config,
                    &format!("{}/{}/", config.tag_dir, slug::slugify(tag)),
                ),
            })
            .collect();

        PostData {
            title: post.title.clone(),
            description: post.description.clone(),
            author: post.author.clone(),
            date: post.date.format(&config.date_format).to_string(),
            date_iso: date_xml(&post.date),
            updated: post
                .updated
                .map(|d| d.format(&config.date_format).to_string()),
            path: post.path.clone(),
            permalink: post.permalink.clone(),
            tags,
            featured: post.featured,
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            word_count: count_words(&post.content),
        }
    }

    /// Build site data for templates
    fn build_site_data(&self, posts: &[Post], pages: &[Page]) -> SiteData {
        let mut tags: HashMap<String, usize> = HashMap::new();
        let mut total_word_count = 0;

        let post_data: Vec<PostData> = posts
            .iter()
            .map(|p| {
                for tag in &p.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
                let data = self.post_data(p);
                total_word_count += data.word_count;
                data
            })
            .collect();

        let page_data = pages
            .iter()
            .map(|p| PageData {
                title: p.title.clone(),
                date: p.date.format(&self.app.config.date_format).to_string(),
                path: format!("/{}", p.path.trim_start_matches('/')),
                permalink: p.permalink.clone(),
                content: p.content.clone(),
                layout: p.layout.clone(),
            })
            .collect();

        SiteData {
            posts: post_data,
            pages: page_data,
            tags,
            word_count: total_word_count,
        }
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        let config = &self.app.config;
        let mut root = config.root.clone();
        if !root.ends_with('/') {
            root.push('/');
        }

        ConfigData {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root,
            post_dir: config.post_dir.clone(),
            tag_dir: config.tag_dir.clone(),
            archive_dir: config.archive_dir.clone(),
            per_page: config.per_page,
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self, site_data: &SiteData, config_data: &ConfigData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("config", config_data);
        context.insert(
            "current_year",
            &chrono::Utc::now()
                .with_timezone(&self.app.config.tz())
                .year()
                .to_string(),
        );
        context
    }

    /// The output location of a URL path, relative to the public dir
    fn output_rel_path(&self, url_path: &str) -> String {
        url_path
            .strip_prefix(self.app.config.root.trim_end_matches('/'))
            .unwrap_or(url_path)
            .trim_start_matches('/')
            .to_string()
    }

    fn write_output(&self, rel: &str, html: &str) -> Result<PathBuf> {
        let output_path = self.app.public_dir.join(rel);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(output_path)
    }

    /// Generate index pages with pagination and the featured section
    fn generate_index_pages(
        &self,
        posts: &[Post],
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<()> {
        let config = &self.app.config;
        let per_page = config.per_page.max(1);
        let total_pages = posts.len().div_ceil(per_page).max(1);

        let featured_posts: Vec<PostData> = posts
            .iter()
            .filter(|p| p.featured)
            .take(config.featured_limit)
            .map(|p| self.post_data(p))
            .collect();

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(posts.len());
            let page_posts: Vec<PostData> =
                posts[start..end].iter().map(|p| self.post_data(p)).collect();

            let page_url = |n: usize| -> String {
                if n == 1 {
                    url_for(config, "")
                } else {
                    url_for(config, &format!("page/{}/", n))
                }
            };

            let pagination = PaginationData {
                per_page,
                total: total_pages,
                current: page_num,
                current_url: page_url(page_num),
                prev_link: if page_num > 1 {
                    page_url(page_num - 1)
                } else {
                    String::new()
                },
                next_link: if page_num < total_pages {
                    page_url(page_num + 1)
                } else {
                    String::new()
                },
            };

            let mut context = self.create_base_context(site_data, config_data);
            context.insert("page_posts", &page_posts);
            // Featured posts only headline the first page.
            if page_num == 1 {
                context.insert("featured_posts", &featured_posts);
            } else {
                context.insert("featured_posts", &Vec::<PostData>::new());
            }
            context.insert("pagination", &pagination);
            context.insert("is_home", &true);

            let html = self.renderer.render("index.html", &context)?;

            let rel = if page_num == 1 {
                "index.html".to_string()
            } else {
                format!("page/{}/index.html", page_num)
            };
            let output_path = self.write_output(&rel, &html)?;
            tracing::debug!("Generated: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(
        &self,
        posts: &[Post],
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<()> {
        for (i, post) in posts.iter().enumerate() {
            // Posts are sorted newest-first: the previous (older) post is the
            // next element, the next (newer) one the previous element.
            let prev_post = posts.get(i + 1).map(|p| NavPost {
                title: p.title.clone(),
                path: p.path.clone(),
            });
            let next_post = if i > 0 {
                posts.get(i - 1).map(|p| NavPost {
                    title: p.title.clone(),
                    path: p.path.clone(),
                })
            } else {
                None
            };

            let toc_html = toc(&post.content, 3);
            let has_toc = toc_html.contains("toc-item");

            let mut context = self.create_base_context(site_data, config_data);
            context.insert("post", &self.post_data(post));
            context.insert("toc", &toc_html);
            context.insert("show_toc", &has_toc);
            context.insert("prev_post", &prev_post);
            context.insert("next_post", &next_post);

            let html = self.renderer.render("post.html", &context)?;

            let rel = format!("{}index.html", self.output_rel_path(&post.path));
            let output_path = self.write_output(&rel, &html)?;

            self.copy_post_assets(post)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Copy a post's co-located assets next to its output page
    fn copy_post_assets(&self, post: &Post) -> Result<()> {
        if post.assets.is_empty() {
            return Ok(());
        }

        let out_dir = self.app.public_dir.join(self.output_rel_path(&post.path));
        fs::create_dir_all(&out_dir)?;

        for asset in &post.assets {
            if let Some(name) = asset.file_name() {
                fs::copy(asset, out_dir.join(name))
                    .with_context(|| format!("Failed to copy asset {:?}", asset))?;
            }
        }

        Ok(())
    }

    /// Generate standalone pages
    fn generate_page_pages(
        &self,
        pages: &[Page],
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<()> {
        for page in pages {
            let mut context = self.create_base_context(site_data, config_data);
            context.insert("page_title", &page.title);
            context.insert(
                "page_date",
                &page.date.format(&self.app.config.date_format).to_string(),
            );
            context.insert("page_content", &page.content);

            let html = self.renderer.render("page.html", &context)?;

            let stripped = page.path.trim_start_matches('/');
            let rel = if stripped.is_empty() {
                "index.html".to_string()
            } else {
                format!("{}index.html", ensure_trailing_slash(stripped))
            };
            let output_path = self.write_output(&rel, &html)?;
            tracing::debug!("Generated page: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate archive page grouped by year
    fn generate_archive_page(
        &self,
        posts: &[Post],
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<()> {
        let mut years_map: BTreeMap<i32, Vec<PostData>> = BTreeMap::new();

        for post in posts {
            years_map
                .entry(post.date.year())
                .or_default()
                .push(self.post_data(post));
        }

        // Newest year first
        let archive_years: Vec<ArchiveYearData> = years_map
            .into_iter()
            .rev()
            .map(|(year, posts)| ArchiveYearData { year, posts })
            .collect();

        let mut context = self.create_base_context(site_data, config_data);
        context.insert("archive_years", &archive_years);
        context.insert("is_home", &false);

        let html = self.renderer.render("archive.html", &context)?;

        let rel = format!("{}/index.html", self.app.config.archive_dir);
        self.write_output(&rel, &html)?;
        tracing::info!("Generated archive page");

        Ok(())
    }

    /// Generate per-tag listing pages and the tag index
    fn generate_tag_pages(
        &self,
        posts: &[Post],
        site_data: &SiteData,
        config_data: &ConfigData,
    ) -> Result<()> {
        let config = &self.app.config;
        let mut tags_map: BTreeMap<String, Vec<PostData>> = BTreeMap::new();

        for post in posts {
            for tag in &post.tags {
                if tag.trim().is_empty() {
                    continue;
                }
                tags_map
                    .entry(tag.clone())
                    .or_default()
                    .push(self.post_data(post));
            }
        }

        let mut all_tags: Vec<TagData> = Vec::new();

        for (tag, tag_posts) in &tags_map {
            let tag_slug = slug::slugify(tag);
            if tag_slug.is_empty() {
                continue;
            }

            let mut context = self.create_base_context(site_data, config_data);
            context.insert("tag_name", tag);
            context.insert("tag_posts", tag_posts);

            let html = self.renderer.render("tag.html", &context)?;

            let rel = format!("{}/{}/index.html", config.tag_dir, tag_slug);
            self.write_output(&rel, &html)?;

            all_tags.push(TagData {
                name: tag.clone(),
                path: url_for(config, &format!("{}/{}/", config.tag_dir, tag_slug)),
                slug: tag_slug,
                count: tag_posts.len(),
            });
        }

        // Most used tags first
        all_tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        let mut context = self.create_base_context(site_data, config_data);
        context.insert("all_tags", &all_tags);
        let html = self.renderer.render("tags.html", &context)?;
        self.write_output(&format!("{}/index.html", config.tag_dir), &html)?;

        tracing::info!("Generated {} tag pages", all_tags.len());
        Ok(())
    }

    /// Generate Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.app.config;
        let base_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}{}atom.xml\" rel=\"self\"/>\n",
            base_url,
            absolute(&ensure_trailing_slash(&config.root))
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        // Include recent posts (limit to 20)
        for post in posts.iter().take(20) {
            let href = format!("{}{}", base_url, encode_path(&absolute(&post.path)));

            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", href));
            feed.push_str(&format!("    <id>{}</id>\n", href));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                post.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                post.updated.unwrap_or(post.date).to_rfc3339()
            ));
            if !post.description.is_empty() {
                feed.push_str(&format!(
                    "    <summary>{}</summary>\n",
                    escape_xml(&post.description)
                ));
            }
            // Feed readers need absolute URLs in the content itself
            let content = post.excerpt.as_ref().unwrap_or(&post.content);
            let content_with_full_urls = convert_relative_urls_to_absolute(content, base_url);
            let clean_content = strip_invalid_xml_chars(&content_with_full_urls);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                clean_content
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.app.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Generate sitemap.xml listing every generated page
    fn generate_sitemap(&self, posts: &[Post], pages: &[Page]) -> Result<()> {
        let config = &self.app.config;

        let mut sitemap = String::new();
        sitemap.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        sitemap.push('\n');
        sitemap.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        sitemap.push('\n');

        let mut push_url = |path: &str, lastmod: Option<String>| {
            sitemap.push_str("  <url>\n");
            sitemap.push_str(&format!(
                "    <loc>{}</loc>\n",
                escape_xml(&format!(
                    "{}{}",
                    config.url.trim_end_matches('/'),
                    encode_path(&absolute(path))
                ))
            ));
            if let Some(lastmod) = lastmod {
                sitemap.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
            }
            sitemap.push_str("  </url>\n");
        };

        push_url(&ensure_trailing_slash(&config.root), None);
        for post in posts {
            let lastmod = date_xml(&post.updated.unwrap_or(post.date));
            push_url(&post.path, Some(lastmod));
        }
        for page in pages {
            push_url(&full_page_path(config, &page.path), Some(date_xml(&page.date)));
        }
        push_url(&url_for(config, &format!("{}/", config.tag_dir)), None);
        push_url(&url_for(config, &format!("{}/", config.archive_dir)), None);

        sitemap.push_str("</urlset>\n");

        let output_path = self.app.public_dir.join("sitemap.xml");
        fs::write(&output_path, sitemap)?;
        tracing::info!("Generated sitemap.xml");

        Ok(())
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.app.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                let ext = path.extension().and_then(|e| e.to_str());

                // Markdown files are processed separately
                if matches!(ext, Some("md") | Some("markdown")) {
                    continue;
                }

                // Files under _posts/_drafts belong to posts, not the site tree
                if path
                    .components()
                    .any(|c| c.as_os_str() == "_posts" || c.as_os_str() == "_drafts")
                {
                    continue;
                }

                let relative = path.strip_prefix(source_dir)?;
                let dest = self.app.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

fn absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn full_page_path(config: &crate::config::SiteConfig, page_path: &str) -> String {
    format!(
        "{}/{}",
        config.root.trim_end_matches('/'),
        page_path.trim_start_matches('/')
    )
}

/// Count words in HTML content (strips tags first)
fn count_words(html: &str) -> usize {
    let text = strip_html(html);
    // Count CJK characters individually and runs of alphanumerics as words
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else if c > '\u{4E00}' && c < '\u{9FFF}' {
            count += 1;
            in_word = false;
        } else {
            in_word = false;
        }
    }

    count
}

/// Convert relative URLs in HTML content to absolute URLs
fn convert_relative_urls_to_absolute(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Papyrus;
    use std::path::Path;

    fn write_post(dir: &Path, name: &str, content: &str) {
        let path = dir.join("source/_posts").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_site(config: &str, posts: &[(&str, &str)]) -> (tempfile::TempDir, Papyrus) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("source/_posts")).unwrap();
        fs::write(tmp.path().join("papyrus.yml"), config).unwrap();
        for (name, content) in posts {
            write_post(tmp.path(), name, content);
        }

        let app = Papyrus::new(tmp.path()).unwrap();
        let loader = ContentLoader::new(&app);
        let posts = loader.load_posts().unwrap();
        let pages = loader.load_pages().unwrap();
        Generator::new(&app).unwrap().generate(&posts, &pages).unwrap();
        (tmp, app)
    }

    #[test]
    fn test_generate_full_site() {
        let (_tmp, app) = build_site(
            "title: Test Blog\nurl: https://example.com\n",
            &[
                (
                    "hello.md",
                    "---\ntitle: Hello\ndate: 2024-01-15\ntags: [rust]\nfeatured: true\n---\n# Hi\n\nbody\n",
                ),
                (
                    "2024-06-01-second/second.md",
                    "---\ntitle: Second\ndate: 2024-06-01\n---\nmore\n",
                ),
            ],
        );

        assert!(app.public_dir.join("index.html").exists());
        assert!(app.public_dir.join("posts/hello/index.html").exists());
        assert!(app.public_dir.join("posts/second/index.html").exists());
        assert!(app.public_dir.join("tags/rust/index.html").exists());
        assert!(app.public_dir.join("tags/index.html").exists());
        assert!(app.public_dir.join("archives/index.html").exists());
        assert!(app.public_dir.join("atom.xml").exists());
        assert!(app.public_dir.join("sitemap.xml").exists());

        let index = fs::read_to_string(app.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Featured"));
        assert!(index.contains("/posts/hello/"));

        let feed = fs::read_to_string(app.public_dir.join("atom.xml")).unwrap();
        assert!(feed.contains("https://example.com/posts/hello/"));
    }

    #[test]
    fn test_asset_folder_assets_copied() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("source/_posts")).unwrap();
        fs::write(tmp.path().join("papyrus.yml"), "title: T\n").unwrap();
        write_post(
            tmp.path(),
            "2024-intro/intro.md",
            "---\ntitle: Intro\ndate: 2024-01-01\n---\n![d](diagram.png)\n",
        );
        fs::write(
            tmp.path().join("source/_posts/2024-intro/diagram.png"),
            b"png",
        )
        .unwrap();

        let app = Papyrus::new(tmp.path()).unwrap();
        let loader = ContentLoader::new(&app);
        let posts = loader.load_posts().unwrap();
        Generator::new(&app).unwrap().generate(&posts, &[]).unwrap();

        assert!(app.public_dir.join("posts/intro/diagram.png").exists());
    }

    #[test]
    fn test_base_path_in_output_urls_not_output_dirs() {
        let (_tmp, app) = build_site(
            "title: T\nroot: /blog/\nurl: https://example.com\n",
            &[("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\nx\n")],
        );

        // URLs carry the base path; the output tree does not.
        assert!(app.public_dir.join("posts/a/index.html").exists());
        let index = fs::read_to_string(app.public_dir.join("index.html")).unwrap();
        assert!(index.contains("/blog/posts/a/"));
    }

    #[test]
    fn test_pagination() {
        let posts: Vec<(String, String)> = (1..=12)
            .map(|i| {
                (
                    format!("p{:02}.md", i),
                    format!("---\ntitle: P{}\ndate: 2024-01-{:02}\n---\nx\n", i, i),
                )
            })
            .collect();
        let posts_ref: Vec<(&str, &str)> = posts
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();

        let (_tmp, app) = build_site("title: T\nper_page: 10\n", &posts_ref);

        assert!(app.public_dir.join("index.html").exists());
        assert!(app.public_dir.join("page/2/index.html").exists());
        assert!(!app.public_dir.join("page/3").exists());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(count_words("<p>hello world</p>"), 2);
        assert_eq!(count_words("<p>你好世界</p>"), 4);
    }
}
