//! Post and Page models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Content identifier: source path relative to the posts directory with
    /// the extension stripped. May contain directory segments when the post
    /// lives in its own asset folder.
    pub id: String,

    /// URL slug: the final segment of `id`, or a front-matter override
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short description used in listings and feeds
    pub description: String,

    /// Post author
    pub author: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Last updated date
    pub updated: Option<DateTime<FixedOffset>>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Post excerpt (before <!-- more -->)
    pub excerpt: Option<String>,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post is featured on the front page
    pub featured: bool,

    /// Whether the post is a draft
    pub draft: bool,

    /// Layout template to use
    pub layout: String,

    /// Source file path (relative)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (without origin)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Asset files co-located with the post, copied next to its output page
    pub assets: Vec<PathBuf>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: String, slug: String, title: String, date: DateTime<FixedOffset>) -> Self {
        Self {
            id,
            slug,
            title,
            description: String::new(),
            author: String::new(),
            date,
            updated: None,
            raw: String::new(),
            content: String::new(),
            excerpt: None,
            tags: Vec::new(),
            featured: false,
            draft: false,
            layout: "post".to_string(),
            source: String::new(),
            full_source: PathBuf::new(),
            path: String::new(),
            permalink: String::new(),
            assets: Vec::new(),
            extra: HashMap::new(),
        }
    }

    /// Get the previous (older) post in a list sorted newest-first
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        posts.get(pos + 1)
    }

    /// Get the next (newer) post in a list sorted newest-first
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        if pos > 0 {
            posts.get(pos - 1)
        } else {
            None
        }
    }
}

/// A standalone page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page title
    pub title: String,

    /// Creation date
    pub date: DateTime<FixedOffset>,

    /// Last updated date
    pub updated: Option<DateTime<FixedOffset>>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Layout template to use
    pub layout: String,

    /// Source file path (relative)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (without origin)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Page {
    /// Create a new page with minimal required fields
    pub fn new(title: String, date: DateTime<FixedOffset>, source: String) -> Self {
        Self {
            title,
            date,
            updated: None,
            raw: String::new(),
            content: String::new(),
            layout: "page".to_string(),
            source: source.clone(),
            full_source: PathBuf::from(&source),
            path: String::new(),
            permalink: String::new(),
            extra: HashMap::new(),
        }
    }
}

/// A tag with associated posts
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub permalink: String,
    pub count: usize,
}

impl Tag {
    pub fn new(name: &str, base_url: &str, root: &str, tag_dir: &str) -> Self {
        let slug = slug::slugify(name);
        let path = format!(
            "{}/{}/{}/",
            root.trim_end_matches('/'),
            tag_dir,
            slug
        );
        let permalink = format!("{}{}", base_url.trim_end_matches('/'), path);
        Self {
            name: name.to_string(),
            slug,
            path,
            permalink,
            count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(id: &str, day: u32) -> Post {
        let date = chrono::FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .unwrap();
        Post::new(id.to_string(), id.to_string(), id.to_string(), date)
    }

    #[test]
    fn test_prev_next_navigation() {
        // Sorted newest-first, as the loader produces them
        let posts = vec![post("c", 3), post("b", 2), post("a", 1)];

        assert_eq!(posts[1].prev(&posts).map(|p| p.id.as_str()), Some("a"));
        assert_eq!(posts[1].next(&posts).map(|p| p.id.as_str()), Some("c"));
        assert!(posts[0].next(&posts).is_none());
        assert!(posts[2].prev(&posts).is_none());
    }

    #[test]
    fn test_tag_paths() {
        let tag = Tag::new("Remote Work", "https://example.com", "/", "tags");
        assert_eq!(tag.slug, "remote-work");
        assert_eq!(tag.path, "/tags/remote-work/");
        assert_eq!(tag.permalink, "https://example.com/tags/remote-work/");
    }
}
