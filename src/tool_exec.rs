use tracing::{info, warn};

use super::{
    EngineConfig, InvocationResult, ShortcutCommand, ToolCallError, find_tool, run_command,
};

/// Look up `name` and shape `arguments` into its command without running anything.
pub(crate) fn prepare_tool_call(
    name: &str,
    arguments: &serde_json::Value,
) -> Result<ShortcutCommand, ToolCallError> {
    let tool = find_tool(name).ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;
    tool.command(arguments)
}

/// Run a tool call and keep the success/failure distinction.
pub(crate) fn execute_tool_outcome(
    name: &str,
    arguments: &serde_json::Value,
    engine: &EngineConfig,
) -> Result<InvocationResult, ToolCallError> {
    let command = prepare_tool_call(name, arguments)?;
    let outcome = run_command(engine, &command);
    match &outcome {
        InvocationResult::Ok(_) => info!(tool = name, "tool call succeeded"),
        InvocationResult::Failed(error) => warn!(tool = name, %error, "tool call failed"),
    }
    Ok(outcome)
}

/// Run a tool call and collapse its outcome to the string returned to the caller.
pub(crate) fn execute_tool(
    name: &str,
    arguments: &serde_json::Value,
    engine: &EngineConfig,
) -> Result<String, ToolCallError> {
    execute_tool_outcome(name, arguments, engine).map(InvocationResult::into_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prepare_builds_payload_for_known_tool() {
        let cmd = prepare_tool_call("sendMessage", &json!({ "name": "Alice", "message": "Hi" }))
            .unwrap();
        assert_eq!(cmd.payload(), "sendMessage\nAlice\nHi\n ");
    }

    #[test]
    fn unknown_tool_is_rejected_before_running() {
        let engine = EngineConfig::for_shortcut("/nonexistent/engine", "switch");
        let err = execute_tool("openPodBayDoors", &json!({}), &engine).unwrap_err();
        assert!(matches!(err, ToolCallError::UnknownTool(ref name) if name == "openPodBayDoors"));
    }

    #[test]
    fn invalid_arguments_are_rejected_before_running() {
        let engine = EngineConfig::for_shortcut("/nonexistent/engine", "switch");
        let err = execute_tool("listPastCalendarEvents", &json!({ "number": "a few", "unit": "days" }), &engine)
            .unwrap_err();
        assert!(matches!(err, ToolCallError::InvalidArguments(_)));
    }

    #[cfg(unix)]
    #[test]
    fn engine_outcomes_are_collapsed_to_text() {
        let sh = |script: &str| EngineConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            wrapper: Vec::new(),
        };

        let placed = execute_tool("phoneCall", &json!({ "name": "Bob" }), &sh("echo 'Call placed'"));
        assert_eq!(placed.unwrap(), "Call placed");

        let failed = execute_tool(
            "phoneCall",
            &json!({ "name": "Nobody" }),
            &sh("echo 'Contact not found' >&2; exit 1"),
        );
        assert_eq!(failed.unwrap(), "Error: Contact not found");

        let outcome = execute_tool_outcome("listAlarms", &json!({}), &sh("true")).unwrap();
        assert_eq!(outcome, InvocationResult::Ok("OK".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn numeric_argument_reaches_engine_as_digits() {
        let engine = EngineConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "sed -n 2p".to_string()],
            wrapper: Vec::new(),
        };
        let text = execute_tool(
            "listPastCalendarEvents",
            &json!({ "number": 7, "unit": "days" }),
            &engine,
        )
        .unwrap();
        assert_eq!(text, "7");
    }
}
