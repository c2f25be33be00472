use clap::Subcommand;
use std::path::PathBuf;

pub mod entry;
pub mod maintenance;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the on-disk path for a key
    Map {
        /// Cache key (a mapped path is printed unchanged)
        key: String,
    },

    /// Store content under a key
    Put {
        /// Cache key
        key: String,

        /// Read content from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Write the content stored under a key to stdout
    Get {
        /// Cache key or mapped path
        key: String,
    },

    /// Show size and timestamps of an entry
    Stat {
        /// Cache key or mapped path
        key: String,
    },

    /// Delete an entry
    #[command(visible_alias = "rm")]
    Remove {
        /// Cache key or mapped path
        key: String,
    },

    /// List every entry currently on disk
    Reload {
        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Delete every entry in the cache
    Purge {
        /// Confirm the purge
        #[arg(long)]
        yes: bool,
    },
}
