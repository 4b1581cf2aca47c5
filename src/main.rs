//! CLI entry point for papyrus

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "papyrus")]
#[command(version)]
#[command(about = "A fast markdown static blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or page
    New {
        /// Layout to use (post, page, draft)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new post
        title: String,

        /// Path for the new post
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Build static files
    #[command(alias = "b")]
    Build {
        /// Watch for file changes and rebuild
        #[arg(short, long)]
        watch: bool,

        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },

    /// Start a local server with live reload
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Serve without watching for changes
        #[arg(long)]
        no_watch: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, page, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "papyrus=debug,info"
    } else {
        "papyrus=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            papyrus::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            layout,
            title,
            path,
        } => {
            let app = papyrus::Papyrus::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", layout, title);
            papyrus::commands::new::create_post(&app, &title, &layout, path.as_deref())?;
        }

        Commands::Build { watch, drafts } => {
            let mut app = papyrus::Papyrus::new(&base_dir)?;
            if drafts {
                app.config.render_drafts = true;
            }
            tracing::info!("Building static files...");

            papyrus::commands::build::run(&app)?;
            println!("Build finished!");

            if watch {
                tracing::info!("Watching for file changes...");
                papyrus::commands::build::watch(&app).await?;
            }
        }

        Commands::Serve {
            port,
            ip,
            open,
            no_watch,
        } => {
            let app = papyrus::Papyrus::new(&base_dir)?;

            // Build first
            tracing::info!("Building static files...");
            app.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            papyrus::server::start(&app, &ip, port, !no_watch, open).await?;
        }

        Commands::Clean => {
            let app = papyrus::Papyrus::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let app = papyrus::Papyrus::new(&base_dir)?;
            papyrus::commands::list::run(&app, &r#type)?;
        }
    }

    Ok(())
}
