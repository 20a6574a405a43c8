// SPDX-License-Identifier: AGPL-3.0-or-later
//! Secure Drive CLI
//!
//! A terminal front end for a Secure Drive object store.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "sdrive")]
#[command(author, version, about = "Secure Drive - list, upload and delete stored files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored files
    #[command(alias = "list")]
    Ls {
        /// Only objects in this folder
        #[arg(short, long)]
        folder: Option<String>,

        /// Name filter
        #[arg(short, long)]
        search: Option<String>,

        /// Sort column (name, size, created_at)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction (asc, desc)
        #[arg(long)]
        order: Option<String>,

        /// Page size (defaults to display.page_size)
        #[arg(short, long)]
        limit: Option<u64>,

        /// Zero-based page number
        #[arg(short, long, default_value_t = 0)]
        page: u64,
    },

    /// Show storage usage
    #[command(alias = "df")]
    Stats,

    /// Upload a local file
    Upload {
        /// File to upload
        path: PathBuf,

        /// Destination folder
        #[arg(short, long)]
        folder: Option<String>,

        /// Name to store the file under
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete stored objects
    Rm {
        /// Object id(s) to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Print the download URL of an object
    Url {
        /// Object id
        id: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Ls { folder, search, sort, order, limit, page } => {
            let args = commands::LsArgs { folder, search, sort, order, limit, page };
            commands::ls(&config, args).await
        }
        Commands::Stats => commands::stats(&config).await,
        Commands::Upload { path, folder, name } => {
            commands::upload(&config, &path, folder.as_deref(), name.as_deref()).await
        }
        Commands::Rm { ids } => commands::rm(&config, &ids).await,
        Commands::Url { id } => commands::url(&config, &id),
        Commands::Register { name, email } => commands::register(&config, name, email).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
