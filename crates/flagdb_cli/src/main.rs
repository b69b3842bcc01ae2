//! flagdb CLI
//!
//! Command-line tools for game flag databases.
//!
//! # Commands
//!
//! - `find` - Search the flag databases of a mod for a name fragment
//! - `generate` - Reconcile the flag databases against the mod's map and
//!   actor data

mod bootup;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// flagdb command-line flag database tools.
#[derive(Parser)]
#[command(name = "flagdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serialize rebuilt databases in big-endian byte order
    #[arg(global = true, short, long)]
    bigendian: bool,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the flag databases for a name fragment
    Find {
        /// Path to the mod directory
        directory: PathBuf,

        /// Name fragment to search for
        flag_name: String,

        /// Delete every matching flag
        #[arg(short, long)]
        delete: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Reconcile the flag databases against the mod's map and actor data
    Generate {
        /// Path to the mod directory
        directory: PathBuf,

        /// Generate actor bundle flags
        #[arg(short, long)]
        actor: bool,

        /// Generate revival flags with these overworld and dungeon reset
        /// types; -1 skips that half of the pass
        #[arg(
            short,
            long,
            num_args = 2,
            value_names = ["MAIN", "DUNGEON"],
            allow_negative_numbers = true
        )]
        revival: Option<Vec<i32>>,

        /// Path to a stock game dump to reconcile against
        #[arg(short, long)]
        game_dir: Option<PathBuf>,

        /// Keep actor bundle flags whose actor no longer exists
        #[arg(long)]
        no_prune: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Find {
            directory,
            flag_name,
            delete,
            format,
        } => {
            commands::find::run(&directory, &flag_name, delete, &format, cli.bigendian)?;
        }
        Commands::Generate {
            directory,
            actor,
            revival,
            game_dir,
            no_prune,
        } => {
            let revival = revival.map(|resets| (resets[0], resets[1]));
            commands::generate::run(
                &directory,
                actor,
                revival,
                game_dir.as_deref(),
                !no_prune,
                cli.bigendian,
            )?;
        }
        Commands::Version => {
            println!("flagdb CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("flagdb Core v{}", flagdb_core::VERSION);
        }
    }

    Ok(())
}
