//! Command-line definition.

use std::path::PathBuf;

use clap::Parser;

pub mod changelog;

/// A better git changelog. Shows the minimum path along the graph of applied
/// changes to go from one tree state to another.
#[derive(Debug, Parser)]
#[command(name = "changelog", version, about)]
pub struct Cli {
    /// The ref to show the path from.
    pub from_ref: String,

    /// The ref to show the path to.
    pub to_ref: String,

    /// Don't filter out changes present on both sides as cherry-picks.
    #[arg(long)]
    pub cherry_picks: bool,

    /// Only consider commits that change paths starting with this prefix.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Match cherry-picks by Change-Id trailer instead of commit metadata.
    #[arg(long, conflicts_with = "cherry_picks")]
    pub gerrit: bool,

    /// Path to the repository; defaults to the current directory.
    #[arg(long, visible_alias = "git-dir", value_name = "PATH", default_value = ".")]
    pub repo_path: PathBuf,

    /// Number of hex digits shown for commit ids.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(4..=40))]
    pub short_len: Option<u8>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Report the shared tree and path lengths on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress warnings.
    #[arg(short, long)]
    pub quiet: bool,
}
