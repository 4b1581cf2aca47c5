//! Site configuration (papyrus.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// IANA timezone name; frontmatter dates without an explicit offset are
    /// interpreted in this zone.
    pub timezone: String,

    // URL
    pub url: String,
    /// Application base path the site is served under ("/" at domain root).
    pub root: String,
    /// URL section all posts are grouped under.
    pub post_dir: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub tag_dir: String,
    pub archive_dir: String,

    // Writing
    pub new_post_name: String,
    pub default_layout: String,
    pub render_drafts: bool,
    /// Whether posts dated in the future are published.
    pub future: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Home page
    pub per_page: usize,
    /// Maximum number of featured posts shown on the front page.
    pub featured_limit: usize,

    // Date / Time format
    pub date_format: String,
    pub time_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Papyrus".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            post_dir: "posts".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            tag_dir: "tags".to_string(),
            archive_dir: "archives".to_string(),

            new_post_name: ":title.md".to_string(),
            default_layout: "post".to_string(),
            render_drafts: false,
            future: true,
            highlight: HighlightConfig::default(),

            per_page: 10,
            featured_limit: 4,

            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M:%S".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The configured timezone, falling back to UTC on unknown names.
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone {:?}, falling back to UTC", self.timezone);
            chrono_tz::UTC
        })
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Papyrus");
        assert_eq!(config.root, "/");
        assert_eq!(config.post_dir, "posts");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.tz(), chrono_tz::UTC);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
root: /blog/
timezone: Asia/Tokyo
per_page: 20
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.root, "/blog/");
        assert_eq!(config.tz(), chrono_tz::Asia::Tokyo);
        assert_eq!(config.per_page, 20);
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let mut config = SiteConfig::default();
        config.timezone = "Mars/Olympus".to_string();
        assert_eq!(config.tz(), chrono_tz::UTC);
    }

    #[test]
    fn test_extra_fields_preserved() {
        let yaml = "title: X\ngithub_username: octocat\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.extra.get("github_username").and_then(|v| v.as_str()),
            Some("octocat")
        );
    }
}
