//! CLI entry point for frontpage

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "frontpage")]
#[command(version)]
#[command(about = "A static home-page generator for a personal technical blog", long_about = None)]
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

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Category the article is grouped under on the home page
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Public path of the article
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate the home page
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the generated output
    Clean,

    /// List site information
    List {
        /// What to list (post, category, query)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "frontpage=debug,info"
    } else {
        "frontpage=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            frontpage::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            path,
        } => {
            let site = frontpage::Site::new(&base_dir)?;
            let file = frontpage::commands::new::create_article(
                &site,
                &title,
                category.as_deref(),
                path.as_deref(),
            )?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let site = frontpage::Site::new(&base_dir)?;
            let report = site.generate()?;
            println!(
                "Generated {:?} ({} articles in {} categories)",
                report.output, report.articles, report.groups
            );

            if watch {
                frontpage::commands::generate::watch(&site, |_| {})?;
            }
        }

        Commands::Server { port, ip, r#static } => {
            let site = frontpage::Site::new(&base_dir)?;
            site.generate()?;
            frontpage::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = frontpage::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = frontpage::Site::new(&base_dir)?;
            frontpage::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("frontpage version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
