//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post or page
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Featured posts get their own section on the front page.
    pub featured: bool,
    /// Drafts are skipped unless drafts rendering is enabled.
    pub draft: bool,
    /// Explicit slug override; the filename-derived slug is used otherwise.
    pub slug: Option<String>,
    pub layout: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        // Check for YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // Check for JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        // Find the closing ---
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        if let Some(end_pos) = rest.find("\n---") {
            let yaml_content = &rest[..end_pos];
            let remaining = &rest[end_pos + 4..]; // Skip \n---
            let remaining = remaining.trim_start_matches(['\n', '\r']);

            // If YAML content is empty or whitespace-only, return default
            if yaml_content.trim().is_empty() {
                return Ok((FrontMatter::default(), remaining));
            }

            // A --- fence is also valid markdown (thematic break); only treat
            // the block as front-matter if it has at least one "key: value"
            // line whose key is a plain identifier and whose colon is not part
            // of a URL.
            let has_yaml_structure = yaml_content.lines().any(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return false;
                }
                if let Some(colon_pos) = trimmed.find(':') {
                    let before_colon = &trimmed[..colon_pos];
                    let is_valid_key = !before_colon.is_empty()
                        && before_colon
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                        && before_colon != "http"
                        && before_colon != "https"
                        && before_colon != "ftp";
                    if is_valid_key {
                        let after_colon = &trimmed[colon_pos + 1..];
                        return after_colon.is_empty() || after_colon.starts_with(' ');
                    }
                }
                false
            });

            if !has_yaml_structure {
                // This doesn't look like YAML, treat as no front-matter
                return Ok((FrontMatter::default(), content));
            }

            match serde_yaml::from_str::<FrontMatter>(yaml_content) {
                Ok(fm) => Ok((fm, remaining)),
                Err(e) => {
                    // If YAML parsing fails, log a warning and return default
                    tracing::warn!(
                        "Failed to parse YAML front-matter, treating as content: {}",
                        e
                    );
                    Ok((FrontMatter::default(), content))
                }
            }
        } else {
            // No closing ---, treat as no front-matter
            Ok((FrontMatter::default(), content))
        }
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = &rest[end_pos + 3..];
                let remaining = remaining.trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        // Try parsing as a JSON object at the start
        if content.starts_with('{') {
            // Find matching closing brace
            let mut depth = 0;
            let mut end_pos = 0;
            for (i, c) in content.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            end_pos = i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if end_pos > 0 {
                let json_content = &content[..end_pos];
                let remaining = &content[end_pos..];
                let remaining = remaining.trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        Err(anyhow!("Invalid JSON front-matter"))
    }

    /// Parse the date string into a timezone-aware DateTime
    pub fn parse_date(&self, tz: Tz) -> Option<DateTime<FixedOffset>> {
        self.date.as_ref().and_then(|s| parse_date_string(s, tz))
    }

    /// Parse the updated date string into a timezone-aware DateTime
    pub fn parse_updated(&self, tz: Tz) -> Option<DateTime<FixedOffset>> {
        self.updated.as_ref().and_then(|s| parse_date_string(s, tz))
    }
}

/// Parse a date string in various formats. Strings without an explicit
/// offset are interpreted in the site timezone.
pub fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    // Offset-carrying formats first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let naive_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(dt, tz);
        }
    }

    // Date-only formats
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return localize(dt, tz);
        }
    }

    None
}

fn localize(dt: NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&dt)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: First steps
date: 2024-01-15 10:30:00
featured: true
tags:
  - rust
  - blogging
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.description, Some("First steps".to_string()));
        assert_eq!(fm.tags, vec!["rust", "blogging"]);
        assert!(fm.featured);
        assert!(!fm.draft);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"], "draft": true}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(fm.draft);
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_parse_date_in_site_timezone() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date(chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %:z").to_string(), "2024-01-15 +09:00");
    }

    #[test]
    fn test_parse_date_with_explicit_offset() {
        let dt = parse_date_string("2024-01-15T10:30:00-05:00", chrono_tz::UTC).unwrap();
        assert_eq!(dt.format("%:z").to_string(), "-05:00");
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = r#"---
title: Single Tag Post
date: 2024-01-15
tags: Notes
---

Content here.
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Single Tag Post".to_string()));
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        // Content that uses --- as markdown separator, not YAML front-matter
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Some random text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        // Content with URLs containing colons should not be mistaken for YAML
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_slug_override() {
        let content = "---\ntitle: T\nslug: custom-slug\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.slug, Some("custom-slug".to_string()));
    }
}
