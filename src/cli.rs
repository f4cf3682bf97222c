use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shortcut-runner")]
#[command(about = "Expose Apple Shortcuts operations as MCP tools over stdio", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// JSON config file (defaults to $SHORTCUT_RUNNER_CONFIG)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
    /// Engine executable (default: shortcuts)
    #[arg(long, global = true)]
    pub(crate) program: Option<String>,
    /// Shortcut to run (default: switch)
    #[arg(long, global = true)]
    pub(crate) shortcut: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Serve the tools over MCP on stdin/stdout (default).
    Serve,

    /// List the available tools and their parameters.
    Tools {
        /// Print the MCP tool definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a single tool call and print its result.
    Call {
        /// Tool name, e.g. sendMessage
        tool: String,
        /// Argument as key=value (repeatable)
        #[arg(long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,
        /// Arguments as a JSON object; --arg values take precedence
        #[arg(long)]
        args_json: Option<String>,
        /// Print the payload instead of running the shortcut
        #[arg(long)]
        dry_run: bool,
    },
}
