//! papyrus: a fast markdown static blog generator
//!
//! This crate renders a directory of markdown posts with frontmatter
//! metadata into a deployable static site, using embedded Tera templates
//! and a built-in development server with live reload.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod permalink;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// Site configuration file name
pub const CONFIG_FILE: &str = "papyrus.yml";

/// The main application handle: configuration plus the resolved site layout
#[derive(Clone)]
pub struct Papyrus {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory
    pub source_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Papyrus {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::init_site(&self.base_dir)
    }

    /// Generate the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, layout: Option<&str>) -> Result<()> {
        commands::new::run(self, title, layout)
    }
}
