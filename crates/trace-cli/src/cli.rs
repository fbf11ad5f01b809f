use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use trace_core::storage::BackendKind;
use trace_core::VERSION;

/// Trace - a personal journal with one entry per day
#[derive(Parser)]
#[command(name = "trace")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the local store
    #[arg(long, global = true, env = "TRACE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Where entries live (overrides the config file)
    #[arg(long, global = true, env = "TRACE_BACKEND", value_enum)]
    pub backend: Option<BackendArg>,

    /// Path to the config file
    #[arg(long, global = true, env = "TRACE_CONFIG", value_name = "PATH")]
    pub config: Option<String>,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_input: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Local,
    Remote,
}

impl From<BackendArg> for BackendKind {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Local => BackendKind::Local,
            BackendArg::Remote => BackendKind::Remote,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the account for this device (or the hosted service)
    Register,

    /// Check credentials and start a session
    Login,

    /// End the current session
    Logout,

    /// Show the signed-in account
    Whoami(JsonArgs),

    /// Write the entry for a date (today by default)
    Write(WriteArgs),

    /// Show the entry for a date
    Show(ShowArgs),

    /// List entries, newest first
    List(ListArgs),

    /// Search titles and bodies
    Search(SearchArgs),

    /// Delete the entry for a date
    Delete(DeleteArgs),

    /// Import entries from a JSON export
    Import(ImportArgs),

    /// Export all entries as JSON
    Export(ExportArgs),

    /// Show or change the color theme
    Theme(ThemeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct JsonArgs {
    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `write` command
#[derive(Args)]
pub struct WriteArgs {
    /// Entry date (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Entry title
    #[arg(long)]
    pub title: Option<String>,

    /// Entry body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry date (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Show the entry saved before DATE
    #[arg(long, conflicts_with = "next")]
    pub prev: bool,

    /// Show the entry saved after DATE
    #[arg(long)]
    pub next: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only list entries matching this text
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in titles and bodies
    pub query: String,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry date (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// JSON file to import
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Output file or directory ("-" for stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Arguments for the `theme` command
#[derive(Args)]
pub struct ThemeArgs {
    /// New theme
    #[arg(value_enum)]
    pub mode: Option<ThemeArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}
