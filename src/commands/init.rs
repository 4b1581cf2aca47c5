//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

/// Default site configuration written by `init`
const DEFAULT_CONFIG: &str = r#"# Papyrus Configuration

# Site
title: Papyrus
subtitle: ''
description: ''
author: John Doe
language: en
timezone: UTC

# URL
url: http://example.com
root: /
post_dir: posts

# Directory
source_dir: source
public_dir: public
tag_dir: tags
archive_dir: archives

# Writing
new_post_name: :title.md
default_layout: post
render_drafts: false
future: true
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Home page
per_page: 10
featured_limit: 4

# Date / Time format
date_format: '%Y-%m-%d'
time_format: '%H:%M:%S'
"#;

/// Default post scaffold
const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
description: ''
tags: []
draft: false
---
"#;

/// Welcome post written into a fresh site
const WELCOME_POST: &str = r#"---
title: Hello Papyrus
description: Your first post.
tags:
  - getting-started
---
Welcome to your new blog. This post lives in `source/_posts`; edit it or
create another one with:

```bash
papyrus new "My New Post"
```

Run `papyrus serve` to preview the site with live reload.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("source/_drafts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?} exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;
    fs::write(
        target_dir.join("source/_posts/hello-papyrus.md"),
        WELCOME_POST,
    )?;

    tracing::info!("Initialized site in {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_site_layout() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join(CONFIG_FILE).exists());
        assert!(tmp.path().join("source/_posts/hello-papyrus.md").exists());
        assert!(tmp.path().join("scaffolds/post.md").exists());

        // The generated config round-trips through the loader
        let config = SiteConfig::load(tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.post_dir, "posts");
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
