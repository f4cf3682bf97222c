use std::env;
use std::process::Command as ProcessCommand;

pub(crate) fn env_optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Split a shell-style command line ("sudo -u me") into words.
pub(crate) fn split_command_line(raw: &str) -> Result<Vec<String>, String> {
    let parts = shlex::split(raw).ok_or_else(|| format!("malformed command line: {raw}"))?;
    if parts.is_empty() {
        return Err("command line is empty".to_string());
    }
    Ok(parts)
}

/// Build the process for `program args...`, prefixed by `wrapper` when one is configured.
pub(crate) fn build_external_command(
    wrapper: &[String],
    program: &str,
    args: &[String],
) -> ProcessCommand {
    match wrapper.split_first() {
        Some((head, rest)) => {
            let mut c = ProcessCommand::new(head);
            c.args(rest).arg(program).args(args);
            c
        }
        None => {
            let mut c = ProcessCommand::new(program);
            c.args(args);
            c
        }
    }
}
