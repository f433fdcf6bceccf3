use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "character-browser")]
#[command(about = "Search and page through Rick and Morty characters")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Character listing endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Delay after the last keystroke before searching, in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Write logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CommandArg>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// Browse characters interactively (default)
    Browse {
        /// Start with this search text
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Print one page of characters and exit
    List {
        /// Filter by character name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Page number to fetch
        #[arg(short, long, default_value_t = 1, conflicts_with = "url")]
        page: u64,

        /// Fetch this literal page URL instead (as returned in prev/next links)
        #[arg(short, long)]
        url: Option<String>,
    },
}

impl Args {
    /// The requested command, falling back to an unfiltered browse
    pub fn command(&self) -> CommandArg {
        self.command.clone().unwrap_or(CommandArg::Browse {
            name: String::new(),
        })
    }
}
