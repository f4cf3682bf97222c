// Module declarations
mod cli;
mod config;
mod error;
mod invoke;
mod mcp;
mod payload;
mod registry;
mod tool_args;
mod tool_exec;
mod util;

// Modules share one namespace through these re-exports.
#[allow(unused_imports)]
pub(crate) use cli::*;
#[allow(unused_imports)]
pub(crate) use config::*;
#[allow(unused_imports)]
pub(crate) use error::*;
#[allow(unused_imports)]
pub(crate) use invoke::*;
#[allow(unused_imports)]
pub(crate) use mcp::*;
#[allow(unused_imports)]
pub(crate) use payload::*;
#[allow(unused_imports)]
pub(crate) use registry::*;
#[allow(unused_imports)]
pub(crate) use tool_args::*;
#[allow(unused_imports)]
pub(crate) use tool_exec::*;
#[allow(unused_imports)]
pub(crate) use util::*;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = EngineOverrides {
        program: cli.program.clone(),
        shortcut: cli.shortcut.clone(),
    };
    let engine = load_engine_config(cli.config.as_deref(), &overrides)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_mcp_server(&engine),

        Command::Tools { json } => {
            if json {
                let defs = tool_definitions_json();
                println!("{}", serde_json::to_string_pretty(&defs)?);
                return Ok(());
            }
            for tool in TOOLS {
                let params = tool
                    .params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.kind.json_type()))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}({params})\n    {}", tool.name, tool.description);
            }
            Ok(())
        }

        Command::Call {
            tool,
            args,
            args_json,
            dry_run,
        } => {
            let arguments = parse_cli_arguments(&args, args_json.as_deref())?;
            if dry_run {
                let command = prepare_tool_call(&tool, &arguments)?;
                println!("{}", command.payload());
                return Ok(());
            }
            let outcome = execute_tool_outcome(&tool, &arguments, &engine)?;
            let failed = !outcome.is_ok();
            println!("{}", outcome.into_text());
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
