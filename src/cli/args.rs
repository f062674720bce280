//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Entry tree editor for BCM collision-mesh tables
#[derive(Parser, Debug)]
#[command(name = "bcmtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Document snapshot plus the entry the action applies to.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Entry snapshot (JSON)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Pre-order position of the entry (0 is the root)
    pub index: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the entry tree
    Show {
        /// Entry snapshot (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print one entry as JSON
    Entry {
        #[command(flatten)]
        target: Target,
    },

    /// List an entry and its descendants
    Subtree {
        #[command(flatten)]
        target: Target,
    },

    /// Recompute addresses and links and write the snapshot back
    Reindex {
        /// Entry snapshot (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Add clipboard entries (or a blank entry) as last child
    AddChild {
        #[command(flatten)]
        target: Target,
    },

    /// Add clipboard entries (or a blank entry) after the entry
    Append {
        #[command(flatten)]
        target: Target,
    },

    /// Add clipboard entries (or a blank entry) before the entry
    Insert {
        #[command(flatten)]
        target: Target,
    },

    /// Delete the entry
    Delete {
        #[command(flatten)]
        target: Target,

        /// Delete child entries as well
        #[arg(long, conflicts_with = "keep_children")]
        cascade: bool,

        /// Keep child entries, moving them into the entry's place
        #[arg(long)]
        keep_children: bool,
    },

    /// Copy the entry to the clipboard
    Copy {
        #[command(flatten)]
        target: Target,

        /// Copy only the entry, not its children
        #[arg(long)]
        no_children: bool,
    },

    /// Paste the clipboard's first entry over the entry's data
    Paste {
        #[command(flatten)]
        target: Target,
    },

    /// Show which actions apply to the entry
    Actions {
        #[command(flatten)]
        target: Target,
    },

    /// Inspect or empty the clipboard
    Clipboard {
        #[command(subcommand)]
        command: ClipboardCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}

#[derive(Subcommand, Debug)]
pub enum ClipboardCommands {
    /// List the copied entries
    Show,
    /// Forget the copied entries
    Clear,
}
