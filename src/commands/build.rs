//! Build the static site

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::{Papyrus, CONFIG_FILE};

/// Build the static site
pub fn run(app: &Papyrus) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(app);
    let posts = loader.load_posts()?;
    let pages = loader.load_pages()?;

    tracing::info!("Loaded {} posts and {} pages", posts.len(), pages.len());

    let generator = Generator::new(app)?;
    generator.generate(&posts, &pages)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and rebuild
pub async fn watch(app: &Papyrus) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(app.source_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    let config_path = app.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(
            Path::new(&config_path),
            notify::RecursiveMode::NonRecursive,
        )?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Coalesce bursts of events into one rebuild
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    // Reload config so edits to papyrus.yml apply
                    match Papyrus::new(&app.base_dir).and_then(|fresh| run(&fresh)) {
                        Ok(_) => {}
                        Err(e) => tracing::error!("Build failed: {}", e),
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Keep waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
