use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codepaste", bin_name = "codepaste", version)]
#[command(about = "Keep your code snippets on a snippet server and find them fast", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Snippet API root, e.g. http://localhost:5000 (overrides config and CODEPASTE_BASE_URL)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List snippets
    #[command(alias = "ls")]
    List {
        /// Only show snippets whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search snippet titles
    Search { term: String },

    /// Add a new snippet
    #[command(alias = "n")]
    Add {
        /// Title of the snippet (words are joined with spaces)
        #[arg(num_args = 0..)]
        title: Vec<String>,

        /// Code of the snippet (otherwise read from a pipe or the editor)
        #[arg(short, long)]
        code: Option<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Show a snippet in full
    #[command(alias = "v")]
    View {
        /// Snippet id, or its position in the list (e.g. 3); an exact id match wins
        reference: String,
    },

    /// Edit a snippet, in the editor unless --title/--code are given
    #[command(alias = "e")]
    Edit {
        /// Snippet id, or its position in the list (e.g. 3); an exact id match wins
        reference: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a snippet
    #[command(alias = "rm")]
    Delete {
        /// Snippet id, or its position in the list (e.g. 3); an exact id match wins
        reference: String,
    },

    /// Copy a snippet's code to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Snippet id, or its position in the list (e.g. 3); an exact id match wins
        reference: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (base-url, timeout-secs)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
