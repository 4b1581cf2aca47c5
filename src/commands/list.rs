//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::Papyrus;

/// List site content by type
pub fn run(app: &Papyrus, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(app);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let mut flags = Vec::new();
                if post.featured {
                    flags.push("featured");
                }
                if post.draft {
                    flags.push("draft");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", flags.join(", "))
                };
                println!(
                    "  {} - {}{} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    flags,
                    post.source
                );
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}]", page.title, page.source);
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, page, tag", content_type);
        }
    }

    Ok(())
}
