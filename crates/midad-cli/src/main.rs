//! Midad CLI
//!
//! Command-line admin console and reader for Midad - a bilingual
//! Arabic-first blog backed by a local key-value content store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use midad_core::{Catalog, Config};

mod commands;
mod content;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "midad")]
#[command(about = "Midad - Arabic-first blog with a local content store")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as the blog admin
    Login {
        /// Admin email
        #[arg(long)]
        email: String,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Log out, clearing the saved session
    Logout,
    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// List categories
    Category {
        #[command(subcommand)]
        command: Option<CategoryCommands>,
    },
    /// Manage the media library
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },
    /// Inspect and discard autosaved drafts
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (session, storage, content counts)
    Status,
}

#[derive(Subcommand)]
enum PostCommands {
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Post title
        title: String,
        /// Short summary shown on listing pages
        #[arg(short, long)]
        excerpt: String,
        /// Full HTML body (defaults to the excerpt when omitted)
        #[arg(long)]
        content: Option<String>,
        /// Category slug
        #[arg(short, long)]
        category: String,
        /// Cover image URL (defaults to the configured cover)
        #[arg(long)]
        cover_image: Option<String>,
        /// Tags to add
        #[arg(short, long)]
        tag: Vec<String>,
        /// URL of an externally hosted HTML fragment for the body
        #[arg(long)]
        html_file: Option<String>,
    },
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Filter by category slug
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show post details
    Show {
        /// Post ID
        id: String,
    },
    /// Edit a post
    Edit {
        /// Post ID
        id: String,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Render a post by its public route
    View {
        /// Route in the form <category>/<slug>
        route: String,
    },
}

#[derive(Subcommand, Clone)]
enum CategoryCommands {
    /// List categories with post counts
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
enum MediaCommands {
    /// List the media library
    #[command(alias = "ls")]
    List,
    /// Upload a local file
    #[command(alias = "add")]
    Upload {
        /// Path to the file
        path: PathBuf,
    },
    /// Delete a media item
    #[command(alias = "rm")]
    Delete {
        /// Media item ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// List saved drafts
    #[command(alias = "ls")]
    List,
    /// Show a draft by its storage key
    Show {
        /// Draft storage key
        key: String,
    },
    /// Discard a draft
    #[command(alias = "rm")]
    Clear {
        /// Draft storage key
        key: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, admin_email, admin_password, default_cover_image)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let mut config = Config::load()?;

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &mut config, &output);
    }

    let mut catalog = Catalog::open(&config)?;

    // Writes require a logged-in admin session, mirroring the protected
    // admin routes of the site
    if is_write_command(&cli.command) && catalog.session()?.is_none() {
        anyhow::bail!("Not logged in. Run `midad login` first.");
    }

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut catalog, &config, email, password, &output)
        }
        Commands::Logout => commands::auth::logout(&mut catalog, &output),
        Commands::Post { command } => {
            handle_post_command(command, &mut catalog, &config, &output).await
        }
        Commands::Category { command } => match command {
            Some(CategoryCommands::List) | None => commands::category::list(&mut catalog, &output),
        },
        Commands::Media { command } => handle_media_command(command, &mut catalog, &output),
        Commands::Draft { command } => handle_draft_command(command, &mut catalog, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&mut catalog, &config, &output),
    }
}

fn is_write_command(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Post {
            command: PostCommands::Create { .. }
                | PostCommands::Edit { .. }
                | PostCommands::Delete { .. }
        } | Commands::Media {
            command: MediaCommands::Upload { .. } | MediaCommands::Delete { .. }
        } | Commands::Draft {
            command: DraftCommands::Clear { .. }
        }
    )
}

async fn handle_post_command(
    command: PostCommands,
    catalog: &mut Catalog,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        PostCommands::Create {
            title,
            excerpt,
            content,
            category,
            cover_image,
            tag,
            html_file,
        } => commands::post::create(
            catalog, config, title, excerpt, content, category, cover_image, tag, html_file,
            output,
        ),
        PostCommands::List { category } => commands::post::list(catalog, category, output),
        PostCommands::Show { id } => commands::post::show(catalog, &id, output),
        PostCommands::Edit { id } => commands::post::edit(catalog, &id, output),
        PostCommands::Delete { id, force } => commands::post::delete(catalog, &id, force, output),
        PostCommands::View { route } => commands::post::view(catalog, &route, output).await,
    }
}

fn handle_media_command(
    command: MediaCommands,
    catalog: &mut Catalog,
    output: &Output,
) -> Result<()> {
    match command {
        MediaCommands::List => commands::media::list(catalog, output),
        MediaCommands::Upload { path } => commands::media::upload(catalog, &path, output),
        MediaCommands::Delete { id, force } => commands::media::delete(catalog, &id, force, output),
    }
}

fn handle_draft_command(
    command: DraftCommands,
    catalog: &mut Catalog,
    output: &Output,
) -> Result<()> {
    match command {
        DraftCommands::List => commands::draft::list(catalog, output),
        DraftCommands::Show { key } => commands::draft::show(catalog, &key, output),
        DraftCommands::Clear { key } => commands::draft::clear(catalog, &key, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config: &mut Config,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(config, &key, &value, output)
        }
    }
}
