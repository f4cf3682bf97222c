use std::io::{self, BufRead, BufReader, Read, Write};

use tracing::{debug, info, warn};

use super::{EngineConfig, INVALID_PARAMS, execute_tool, tool_definitions_json};

pub(crate) const SERVER_NAME: &str = "ShortcutRunner";
pub(crate) const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const MAX_MESSAGE_BYTES: usize = 10 * 1024 * 1024;

/// How a message was framed on the wire; replies use the same framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Framing {
    /// One JSON document per line.
    Line,
    /// LSP-style `Content-Length` header block followed by the body.
    ContentLength,
}

#[derive(Debug)]
pub(crate) struct McpMessage {
    pub(crate) framing: Framing,
    pub(crate) body: Result<serde_json::Value, String>,
}

fn parse_content_length(line: &str) -> Option<usize> {
    line.split_once(':')
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
}

fn is_content_length_header(line: &[u8]) -> bool {
    String::from_utf8_lossy(line)
        .to_ascii_lowercase()
        .starts_with("content-length:")
}

/// Read the next message; `None` at end of input. Blank lines between messages are skipped.
///
/// Bytes that are not a JSON document (invalid UTF-8, oversized bodies) come back
/// as `body: Err(..)`; only a failing reader is an I/O error.
pub(crate) fn read_mcp_message(reader: &mut impl BufRead) -> io::Result<Option<McpMessage>> {
    let mut first_line = Vec::new();
    loop {
        first_line.clear();
        if reader.read_until(b'\n', &mut first_line)? == 0 {
            return Ok(None);
        }
        if !first_line.trim_ascii().is_empty() {
            break;
        }
    }

    if !is_content_length_header(&first_line) {
        let body = serde_json::from_slice(first_line.trim_ascii())
            .map_err(|e| format!("invalid json: {e}"));
        return Ok(Some(McpMessage {
            framing: Framing::Line,
            body,
        }));
    }

    let mut content_length =
        parse_content_length(&String::from_utf8_lossy(&first_line)).unwrap_or(0);

    // Read remaining headers
    loop {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.trim_ascii().is_empty() {
            break;
        }
        if is_content_length_header(&line) {
            content_length =
                parse_content_length(&String::from_utf8_lossy(&line)).unwrap_or(content_length);
        }
    }

    if content_length > MAX_MESSAGE_BYTES {
        io::copy(&mut reader.by_ref().take(content_length as u64), &mut io::sink())?;
        return Ok(Some(McpMessage {
            framing: Framing::ContentLength,
            body: Err(format!("message too large ({content_length} bytes)")),
        }));
    }
    let mut buffer = vec![0u8; content_length];
    reader.read_exact(&mut buffer)?;
    let body = serde_json::from_slice(&buffer).map_err(|e| format!("invalid json: {e}"));
    Ok(Some(McpMessage {
        framing: Framing::ContentLength,
        body,
    }))
}

pub(crate) fn write_mcp_response(
    writer: &mut impl Write,
    framing: Framing,
    value: &serde_json::Value,
) -> io::Result<()> {
    let payload = serde_json::to_vec(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{e}")))?;
    match framing {
        Framing::ContentLength => {
            write!(writer, "Content-Length: {}\r\n\r\n", payload.len())?;
            writer.write_all(&payload)?;
        }
        Framing::Line => {
            writer.write_all(&payload)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

fn error_response(id: serde_json::Value, code: i64, message: impl Into<String>) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message.into() }
    })
}

fn result_response(id: serde_json::Value, result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

/// What the server loop should do after a message.
#[derive(Debug, PartialEq)]
pub(crate) struct Dispatch {
    pub(crate) response: Option<serde_json::Value>,
    pub(crate) shutdown: bool,
}

impl Dispatch {
    fn reply(response: serde_json::Value) -> Self {
        Self {
            response: Some(response),
            shutdown: false,
        }
    }

    fn silent() -> Self {
        Self {
            response: None,
            shutdown: false,
        }
    }
}

/// Handle one decoded JSON-RPC message. Notifications (no `id`) never get a reply.
pub(crate) fn dispatch_message(msg: &serde_json::Value, engine: &EngineConfig) -> Dispatch {
    if !msg.is_object() {
        return Dispatch::reply(error_response(
            serde_json::Value::Null,
            INVALID_REQUEST,
            "request must be a JSON object",
        ));
    }

    // Only an absent id marks a notification; `"id": null` still gets a reply.
    let has_id = msg.get("id").is_some();
    let id = msg.get("id").cloned().unwrap_or(serde_json::Value::Null);
    let method = msg.get("method").and_then(|m| m.as_str()).unwrap_or("");
    let params = msg
        .get("params")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));

    if !has_id {
        debug!(method, "notification");
        return Dispatch::silent();
    }

    match method {
        "initialize" => {
            let protocol = params
                .get("protocolVersion")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_PROTOCOL_VERSION);
            Dispatch::reply(result_response(
                id,
                serde_json::json!({
                    "protocolVersion": protocol,
                    "capabilities": {
                        "tools": { "listChanged": false }
                    },
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ))
        }
        "ping" => Dispatch::reply(result_response(id, serde_json::json!({}))),
        "tools/list" => Dispatch::reply(result_response(
            id,
            serde_json::json!({ "tools": tool_definitions_json() }),
        )),
        "tools/call" => {
            let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let arguments = params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| serde_json::json!({}));
            match execute_tool(name, &arguments, engine) {
                Ok(text) => Dispatch::reply(result_response(
                    id,
                    serde_json::json!({
                        "content": [
                            { "type": "text", "text": text }
                        ],
                        "isError": false
                    }),
                )),
                Err(err) => {
                    warn!(tool = name, error = %err, "rejected tool call");
                    Dispatch::reply(error_response(id, INVALID_PARAMS, err.to_string()))
                }
            }
        }
        "shutdown" => Dispatch {
            response: Some(result_response(id, serde_json::Value::Null)),
            shutdown: true,
        },
        _ => Dispatch::reply(error_response(id, METHOD_NOT_FOUND, "method not found")),
    }
}

/// Serve MCP requests from `reader` until end of input or `shutdown`.
pub(crate) fn serve_mcp(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    engine: &EngineConfig,
) -> io::Result<()> {
    while let Some(message) = read_mcp_message(reader)? {
        let dispatch = match message.body {
            Ok(msg) => dispatch_message(&msg, engine),
            Err(err) => {
                warn!(error = %err, "unparseable message");
                Dispatch::reply(error_response(serde_json::Value::Null, PARSE_ERROR, err))
            }
        };
        if let Some(response) = &dispatch.response {
            write_mcp_response(writer, message.framing, response)?;
        }
        if dispatch.shutdown {
            info!("shutdown requested");
            break;
        }
    }
    Ok(())
}

pub(crate) fn run_mcp_server(engine: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(engine = %engine.command_line(), "serving MCP over stdio");
    let mut reader = BufReader::new(io::stdin());
    let mut writer = io::stdout();
    serve_mcp(&mut reader, &mut writer, engine)?;
    Ok(())
}
