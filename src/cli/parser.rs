use crate::export::PayloadFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimesheet
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Quarterise a weekly tasklog and reconcile it with the portal timesheet form",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Print diagnostic traces
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file with default values
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show the hours and allowances of a tasklog as a weekly table
    Show {
        #[arg(long, short = 't', value_name = "FILE")]
        timesheet: String,

        #[arg(long, short = 'q', help = "Round hours before showing them")]
        quarterise: bool,
    },

    /// Round hours to the configured quantum and rewrite the tasklog
    Quarterise {
        #[arg(long, short = 't', value_name = "FILE")]
        timesheet: String,

        #[arg(long, short = 'o', value_name = "FILE", help = "Write here instead of in place")]
        out: Option<String>,
    },

    /// Build the form submission for a tasklog against the saved portal pages
    Query {
        #[arg(long, short = 't', value_name = "FILE")]
        timesheet: String,

        /// Week-ending date (YYYY-MM-DD), defaults to last Saturday
        #[arg(long, short = 'd')]
        date: Option<String>,

        #[arg(long, value_name = "DIR", help = "Folder with the saved portal pages")]
        cache: Option<String>,

        #[arg(long, help = "Minimum number of hours rows on the form")]
        rows: Option<usize>,

        #[arg(long, value_enum, default_value = "text")]
        format: PayloadFormat,

        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file if it exists")]
        force: bool,
    },
}
