use std::fmt;
use std::io::{self, Write};
use std::process::{Output, Stdio};
use std::thread;

use tracing::{debug, warn};

use super::{EngineConfig, ShortcutCommand, build_external_command};

/// Marker that leads every failure once results are collapsed to text.
pub(crate) const ERROR_PREFIX: &str = "Error: ";

/// Reported when the engine succeeds without printing anything.
pub(crate) const EMPTY_SUCCESS: &str = "OK";

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InvocationResult {
    /// Trimmed stdout of a successful run, or [`EMPTY_SUCCESS`].
    Ok(String),
    /// Trimmed stderr of a failed run, without the prefix.
    Failed(String),
}

impl InvocationResult {
    pub(crate) fn from_streams(success: bool, stdout: &[u8], stderr: &[u8]) -> Self {
        if success {
            let out = String::from_utf8_lossy(stdout).trim().to_string();
            if out.is_empty() {
                InvocationResult::Ok(EMPTY_SUCCESS.to_string())
            } else {
                InvocationResult::Ok(out)
            }
        } else {
            InvocationResult::Failed(String::from_utf8_lossy(stderr).trim().to_string())
        }
    }

    pub(crate) fn from_output(output: &Output) -> Self {
        Self::from_streams(output.status.success(), &output.stdout, &output.stderr)
    }

    pub(crate) fn is_ok(&self) -> bool {
        matches!(self, InvocationResult::Ok(_))
    }

    /// Collapse into the single string handed back to the tool caller.
    pub(crate) fn into_text(self) -> String {
        match self {
            InvocationResult::Ok(text) => text,
            InvocationResult::Failed(text) => format!("{ERROR_PREFIX}{text}"),
        }
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationResult::Ok(text) => f.write_str(text),
            InvocationResult::Failed(text) => write!(f, "{ERROR_PREFIX}{text}"),
        }
    }
}

/// Run the engine once with `cmd`'s payload on stdin and wait for it to exit.
///
/// There is no timeout: a hung engine blocks the caller. Launch and wait
/// failures are reported as [`InvocationResult::Failed`] like any other
/// engine failure.
pub(crate) fn run_command(engine: &EngineConfig, cmd: &ShortcutCommand) -> InvocationResult {
    let payload = cmd.payload();
    let mut process = build_external_command(&engine.wrapper, &engine.program, &engine.args);
    process
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(
        engine = %engine.command_line(),
        function = cmd.function(),
        "invoking shortcut"
    );

    let mut child = match process.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!(program = %engine.program, error = %e, "failed to launch shortcut engine");
            return InvocationResult::Failed(format!("failed to launch {}: {e}", engine.program));
        }
    };

    // Feed stdin from its own thread so a chatty engine can't fill its
    // stdout pipe while we are still blocked writing the payload.
    let writer = child.stdin.take().map(|mut stdin| {
        thread::spawn(move || -> io::Result<()> {
            stdin.write_all(payload.as_bytes())?;
            stdin.flush()
            // `stdin` drops here, closing the pipe.
        })
    });

    let waited = child.wait_with_output();

    if let Some(handle) = writer {
        match handle.join() {
            Ok(Ok(())) => {}
            // The engine may exit before reading its input; its status still decides.
            Ok(Err(e)) => {
                warn!(function = cmd.function(), error = %e, "failed to write shortcut payload")
            }
            Err(_) => warn!(function = cmd.function(), "shortcut payload writer panicked"),
        }
    }

    match waited {
        Ok(output) => {
            let result = InvocationResult::from_output(&output);
            debug!(
                function = cmd.function(),
                status = %output.status,
                ok = result.is_ok(),
                "shortcut finished"
            );
            result
        }
        Err(e) => {
            warn!(program = %engine.program, error = %e, "failed to wait for shortcut engine");
            InvocationResult::Failed(format!("failed to wait for {}: {e}", engine.program))
        }
    }
}
