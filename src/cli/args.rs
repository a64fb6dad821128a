//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Menu layout reconciler: diff and selectively merge hierarchical menu configuration snapshots
#[derive(Parser, Debug)]
#[command(name = "menumerge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .menumerge.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the differences between two saved menu configurations
    Diff {
        /// Older snapshot ("from" side)
        from: PathBuf,
        /// Newer snapshot ("to" side)
        to: PathBuf,
        /// Capture leaf payloads by value so added branches keep full fidelity
        #[arg(long)]
        full_capture: bool,
    },

    /// Fold the differences between two snapshots into a target snapshot
    Apply {
        /// Older snapshot ("from" side)
        from: PathBuf,
        /// Newer snapshot ("to" side)
        to: PathBuf,
        /// Snapshot to reconcile (defaults to TO)
        #[arg(short, long)]
        target: Option<PathBuf>,
        /// Where to write the merged snapshot
        #[arg(short, long)]
        output: PathBuf,
        /// Drop branches whose target sibling disappeared instead of failing
        #[arg(long)]
        skip_missing: bool,
        /// Capture leaf payloads by value so added branches keep full fidelity
        #[arg(long)]
        full_capture: bool,
    },

    /// Print a saved menu configuration as a tree
    Show {
        /// Snapshot file
        path: PathBuf,
    },

    /// Check a saved menu configuration for ambiguous (duplicate) identities
    Validate {
        /// Snapshot file
        path: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
