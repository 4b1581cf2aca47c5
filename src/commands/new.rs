//! Create a new post or page

use anyhow::Result;
use std::fs;

use crate::Papyrus;

/// Create a new post/page/draft
pub fn create_post(app: &Papyrus, title: &str, layout: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Utc::now().with_timezone(&app.config.tz());

    // Determine the target directory based on layout
    let target_dir = match layout {
        "draft" => app.source_dir.join("_drafts"),
        "page" => {
            let slug = slug::slugify(title);
            app.source_dir.join(&slug)
        }
        _ => app.source_dir.join("_posts"),
    };

    fs::create_dir_all(&target_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let post_name = &app.config.new_post_name;
        let slug = slug::slugify(title);

        post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = if layout == "page" {
        target_dir.join("index.md")
    } else {
        target_dir.join(&filename)
    };

    // Load scaffold template
    let scaffold_path = app.base_dir.join("scaffolds").join(format!("{}.md", layout));
    let scaffold_content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        // Default scaffold
        "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n".to_string()
    };

    // Replace template variables
    let content = scaffold_content
        .replace("{{ title }}", title)
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // An explicit --path may point into a subdirectory
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

/// Run the new command
pub fn run(app: &Papyrus, title: &str, layout: Option<&str>) -> Result<()> {
    let layout = layout.unwrap_or(&app.config.default_layout);
    create_post(app, title, layout, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> (tempfile::TempDir, Papyrus) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("source/_posts")).unwrap();
        let app = Papyrus::new(tmp.path()).unwrap();
        (tmp, app)
    }

    #[test]
    fn test_create_post_from_title() {
        let (tmp, app) = site();
        create_post(&app, "My First Post", "post", None).unwrap();

        let path = tmp.path().join("source/_posts/my-first-post.md");
        assert!(path.exists());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("title: My First Post"));
    }

    #[test]
    fn test_create_draft_goes_to_drafts_dir() {
        let (tmp, app) = site();
        create_post(&app, "Half Done", "draft", None).unwrap();
        assert!(tmp.path().join("source/_drafts/half-done.md").exists());
    }

    #[test]
    fn test_existing_post_is_not_overwritten() {
        let (_tmp, app) = site();
        create_post(&app, "Twice", "post", None).unwrap();
        assert!(create_post(&app, "Twice", "post", None).is_err());
    }

    #[test]
    fn test_explicit_path() {
        let (tmp, app) = site();
        create_post(&app, "T", "post", Some("2024-custom/custom")).unwrap();
        assert!(tmp
            .path()
            .join("source/_posts/2024-custom/custom.md")
            .exists());
    }
}
