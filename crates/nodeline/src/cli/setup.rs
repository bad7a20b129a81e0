use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nodeline", bin_name = "nodeline", version, disable_help_subcommand = true)]
#[command(about = "Edit tab-indented plain-text outlines", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// File type name, overriding the file extension (e.g. txt, public.plain-text)
    #[arg(long = "type", global = true, value_name = "NAME", help_heading = "Options")]
    pub file_type: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the outline with item paths
    #[command(alias = "ls", display_order = 1)]
    Show {
        /// Outline file
        file: PathBuf,
    },

    /// Add items, one per TEXT argument
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Outline file (created if missing)
        file: PathBuf,

        /// Item texts
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Add under this item (e.g. 1 or 2.3)
        #[arg(long, short = 'i', value_name = "PATH")]
        into: Option<String>,

        /// Position among the siblings, 1-based (default: last)
        #[arg(long, value_name = "N")]
        at: Option<usize>,

        /// Add the items already done
        #[arg(long)]
        done: bool,
    },

    /// Remove items and everything under them
    #[command(alias = "rm", display_order = 3)]
    Remove {
        /// Outline file
        file: PathBuf,

        /// Paths of the items (e.g. 1 2.1 3.1-3.4)
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// Move items, with their children, somewhere else
    #[command(alias = "mv", display_order = 4)]
    Move {
        /// Outline file
        file: PathBuf,

        /// Paths of the items (e.g. 1 2.1 3.1-3.4)
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// New parent (default: top level)
        #[arg(long, short = 'i', value_name = "PATH")]
        into: Option<String>,

        /// Position among the new siblings as they are now, 1-based (default: last)
        #[arg(long, value_name = "N")]
        at: Option<usize>,
    },

    /// Mark items as done
    #[command(display_order = 5)]
    Done {
        /// Outline file
        file: PathBuf,

        /// Paths of the items (e.g. 1 2.1 3.1-3.4)
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// Mark items as not done
    #[command(display_order = 6)]
    Reopen {
        /// Outline file
        file: PathBuf,

        /// Paths of the items (e.g. 1 2.1 3.1-3.4)
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// Rewrite the file with canonical indentation
    #[command(display_order = 7)]
    Normalize {
        /// Outline file
        file: PathBuf,
    },
}

impl Commands {
    pub fn file(&self) -> &PathBuf {
        match self {
            Commands::Show { file }
            | Commands::Add { file, .. }
            | Commands::Remove { file, .. }
            | Commands::Move { file, .. }
            | Commands::Done { file, .. }
            | Commands::Reopen { file, .. }
            | Commands::Normalize { file } => file,
        }
    }
}
