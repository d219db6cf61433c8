use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for zcapture
/// CLI application to capture notes and tasks into a CSV ledger
#[derive(Parser)]
#[command(
    name = "zcapture",
    version = env!("CARGO_PKG_VERSION"),
    about = "A note-capture CLI: append entries to a CSV ledger, flag tasks and extract them",
    long_about = None
)]
pub struct Cli {
    /// Override ledger path (useful for tests or a custom ledger)
    #[arg(global = true, long = "ledger")]
    pub ledger: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the ledger and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Capture a single entry
    Add {
        /// Entry text
        text: String,

        #[arg(long = "task", short = 't', help = "Mark this entry as a task")]
        task: bool,

        #[arg(
            long = "completed",
            help = "Mark the entry completed (ledger must have a 'completed' column)"
        )]
        completed: bool,

        #[arg(
            long = "field",
            value_name = "KEY=VALUE",
            help = "Value for another ledger column (repeatable)"
        )]
        fields: Vec<String>,
    },

    /// Interactive capture session reading entries from stdin
    Capture,

    /// Make sure the ledger has every required column
    Migrate {
        #[arg(long = "check", help = "Only report what would change")]
        check: bool,
    },

    /// Extract task rows into a separate CSV file
    #[command(group(ArgGroup::new("status").args(["pending", "completed"])))]
    Extract {
        /// Source ledger (default: configured ledger)
        input: Option<String>,

        /// Destination file (default: tasks.csv next to the ledger)
        output: Option<String>,

        #[arg(long = "pending", help = "Only tasks not marked completed")]
        pending: bool,

        #[arg(long = "completed", help = "Only tasks marked completed")]
        completed: bool,
    },

    /// List pending tasks
    Tasks,
}
