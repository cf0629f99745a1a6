//! CLI definition

use std::path::PathBuf;

use clap::Parser;

/// Moves files from one directory to another, preserving the directory
/// structure, and uploads each file to the configured photo services before
/// removing the original.
#[derive(Parser)]
#[command(
    name = "photoferry",
    about = "Moves files from one directory to another",
    version
)]
pub struct Cli {
    /// Directory to watch for new files
    #[arg(value_name = "SOURCE_DIR")]
    pub source: PathBuf,

    /// Directory that receives the mirrored tree
    #[arg(value_name = "DEST_DIR")]
    pub dest: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
