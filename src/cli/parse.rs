//! CLI parse: clap types for fsmanifest. No behavior; definitions only.

use crate::logging::{LogFormat, LogOutput};
use crate::mode::{FileType, SpecialFlags};
use crate::output::FormatTemplate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fsmanifest - content-addressable filesystem manifests
#[derive(Parser)]
#[command(name = "fsmanifest", version)]
#[command(about = "Identify files and build portable filesystem manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log output
    #[arg(long, global = true, value_enum)]
    pub log_output: Option<LogOutput>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print content identifiers for files and directory trees (stdin when no paths)
    Id {
        /// Files or directories to identify
        paths: Vec<PathBuf>,
        /// Print mode, byte size and folder/link flags under each entry
        #[arg(short = 'm', long)]
        metadata: bool,
        /// Print absolute paths
        #[arg(short, long)]
        absolute: bool,
        /// Line layout
        #[arg(short, long, value_enum)]
        format: Option<FormatTemplate>,
        /// Maximum recursion depth (0 = only the named paths)
        #[arg(short, long)]
        depth: Option<usize>,
        /// Dereference symlinks
        #[arg(short = 'L', long)]
        follow_symlinks: bool,
        /// Worker threads (0 = one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Fail on the first unreadable object instead of skipping it
        #[arg(long)]
        abort_on_error: bool,
    },
    /// Write a JSON manifest for a directory tree
    Manifest {
        /// Root of the tree
        root: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Maximum recursion depth
        #[arg(short, long)]
        depth: Option<usize>,
        /// Dereference symlinks
        #[arg(short = 'L', long)]
        follow_symlinks: bool,
        /// Entry names to skip (repeatable)
        #[arg(long = "ignore")]
        ignore: Vec<String>,
        /// Worker threads (0 = one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Fail on the first unreadable object instead of skipping it
        #[arg(long)]
        abort_on_error: bool,
    },
    /// Compare a manifest against a directory tree
    Verify {
        /// Manifest file
        manifest: PathBuf,
        /// Root of the tree
        root: PathBuf,
        /// Dereference symlinks
        #[arg(short = 'L', long)]
        follow_symlinks: bool,
    },
    /// Encode or decode 10-character file modes
    Mode {
        #[command(subcommand)]
        command: ModeCommands,
    },
}

#[derive(Subcommand)]
pub enum ModeCommands {
    /// Decode a mode string such as `drwxr-xr-x`
    Decode {
        /// Mode string (characters past the tenth are ignored)
        mode: String,
    },
    /// Encode a mode from its parts
    Encode {
        /// File type
        #[arg(long = "type", default_value = "regular")]
        file_type: FileType,
        /// Octal permission bits
        #[arg(long, default_value = "644", value_parser = parse_octal)]
        perm: u32,
        /// Special flags (repeatable)
        #[arg(long = "flag", value_enum)]
        flags: Vec<SpecialFlagArg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpecialFlagArg {
    Append,
    Exclusive,
    Setuid,
    Setgid,
    Sticky,
}

impl From<SpecialFlagArg> for SpecialFlags {
    fn from(arg: SpecialFlagArg) -> Self {
        match arg {
            SpecialFlagArg::Append => SpecialFlags::APPEND,
            SpecialFlagArg::Exclusive => SpecialFlags::EXCLUSIVE,
            SpecialFlagArg::Setuid => SpecialFlags::SETUID,
            SpecialFlagArg::Setgid => SpecialFlags::SETGID,
            SpecialFlagArg::Sticky => SpecialFlags::STICKY,
        }
    }
}

fn parse_octal(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    let value =
        u32::from_str_radix(digits, 8).map_err(|_| format!("'{}' is not an octal number", s))?;
    if value > 0o777 {
        return Err(format!("'{}' is outside 0..=777", s));
    }
    Ok(value)
}
