//! Permalink resolution
//!
//! Maps a post identifier to its externally visible URL path. Identifiers
//! carry whatever directory structure the author used on disk (a post in
//! its own asset folder has an id like `2024-06-01-intro/intro`); only the
//! final segment survives into the URL, so the public address of a post is
//! decoupled from how the source tree is organized.

use thiserror::Error;

use crate::config::SiteConfig;

/// Error raised for identifiers that cannot produce a usable slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermalinkError {
    /// Empty id, separator-only id, or an id ending in a separator.
    #[error("malformed content identifier: {0:?}")]
    MalformedId(String),
}

/// Resolves content identifiers to site-relative URL paths.
///
/// Configuration is injected at construction; resolution itself is a pure
/// function of the id and the `include_base` flag.
#[derive(Debug, Clone)]
pub struct PermalinkResolver {
    /// Application base path the whole site is served under ("" when the
    /// site lives at the domain root). Stored without a trailing slash.
    base: String,
    /// Fixed URL section all posts are grouped under, e.g. "posts".
    section: String,
}

impl PermalinkResolver {
    /// Create a resolver with an explicit base path and section name.
    pub fn new(base: impl Into<String>, section: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            section: section.into(),
        }
    }

    /// Create a resolver from the site configuration (`root` + `post_dir`).
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.root.clone(), config.post_dir.clone())
    }

    /// Resolve an id to its canonical path, including the base path and
    /// post section: `{base}/{section}/{slug}/`.
    pub fn resolve(&self, id: &str) -> Result<String, PermalinkError> {
        self.resolve_with_base(id, true)
    }

    /// Resolve an id, optionally omitting the base path and section.
    ///
    /// With `include_base` false the result is just `/{slug}/`, useful for
    /// links relative to the section listing itself.
    pub fn resolve_with_base(
        &self,
        id: &str,
        include_base: bool,
    ) -> Result<String, PermalinkError> {
        let slug = self.slug_of(id)?;

        if include_base {
            Ok(format!("{}/{}/{}/", self.base, self.section, slug))
        } else {
            Ok(format!("/{}/", slug))
        }
    }

    /// Extract the canonical slug from an id: the last `/`-separated
    /// segment. An id without a separator is its own slug.
    pub fn slug_of<'a>(&self, id: &'a str) -> Result<&'a str, PermalinkError> {
        let last = id.rsplit('/').next().unwrap_or_default();
        if last.is_empty() {
            return Err(PermalinkError::MalformedId(id.to_string()));
        }
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(base: &str) -> PermalinkResolver {
        PermalinkResolver::new(base, "posts")
    }

    #[test]
    fn test_plain_id_is_its_own_slug() {
        let r = resolver("");
        assert_eq!(
            r.resolve("introducing-remote-swe-agents").unwrap(),
            "/posts/introducing-remote-swe-agents/"
        );
        assert_eq!(
            r.resolve_with_base("introducing-remote-swe-agents", false)
                .unwrap(),
            "/introducing-remote-swe-agents/"
        );
    }

    #[test]
    fn test_directory_prefix_is_discarded() {
        let r = resolver("");
        assert_eq!(
            r.resolve("20250402-introducing-remote-swe-agents/introducing-remote-swe-agents")
                .unwrap(),
            "/posts/introducing-remote-swe-agents/"
        );
        // Only the final segment matters, however deep the nesting.
        assert_eq!(
            r.resolve("a/b/c/my-slug").unwrap(),
            r.resolve("my-slug").unwrap()
        );
    }

    #[test]
    fn test_base_path() {
        let r = resolver("blog");
        assert_eq!(r.resolve("my-slug").unwrap(), "blog/posts/my-slug/");
        // Trailing slash on the configured base collapses.
        let r = resolver("/blog/");
        assert_eq!(r.resolve("my-slug").unwrap(), "/blog/posts/my-slug/");
    }

    #[test]
    fn test_without_base_omits_base_and_section() {
        let r = resolver("blog");
        let path = r.resolve_with_base("my-slug", false).unwrap();
        assert_eq!(path, "/my-slug/");
        assert!(!path.contains("blog"));
        assert!(!path.contains("posts"));
    }

    #[test]
    fn test_deterministic() {
        let r = resolver("blog");
        assert_eq!(r.resolve("a/b").unwrap(), r.resolve("a/b").unwrap());
    }

    #[test]
    fn test_malformed_ids_rejected() {
        let r = resolver("");
        for id in ["", "/", "//", "my-slug/", "a/b/"] {
            assert_eq!(
                r.resolve(id),
                Err(PermalinkError::MalformedId(id.to_string())),
                "id {:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn test_from_config() {
        let mut config = SiteConfig::default();
        config.root = "/blog/".to_string();
        config.post_dir = "articles".to_string();
        let r = PermalinkResolver::from_config(&config);
        assert_eq!(r.resolve("hello").unwrap(), "/blog/articles/hello/");
    }
}
