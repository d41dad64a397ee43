//! JSON-RPC 2.0 message framing over stdio (spec.md §6 MCP surface).
//!
//! Frames use LSP-style headers: `Content-Length: N\r\n\r\n` followed by
//! exactly N bytes of UTF-8 JSON. No other headers are required or
//! produced.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Absent for notifications (`notifications/*`); such requests get no
    /// response written back.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Serialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(ResponseError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Standard JSON-RPC error codes used by this server.
pub mod error_code {
    pub const PARSE_ERROR: i64 = -32700;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Reads one `Content-Length`-framed message from `reader`. Returns `Ok(None)`
/// on clean EOF between messages.
pub async fn read_message<R>(reader: &mut BufReader<R>) -> std::io::Result<Option<Request>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        if let Some(value) = trimmed.strip_prefix("Content-Length:") {
            content_length = value.trim().parse().ok();
        }
    }

    let Some(len) = content_length else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "missing Content-Length header",
        ));
    };

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    let request = serde_json::from_slice(&body)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(Some(request))
}

/// Writes `response` to `writer` using the same `Content-Length` framing.
pub async fn write_message<W>(writer: &mut W, response: &Response) -> std::io::Result<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let body = serde_json::to_vec(response)?;
    writer
        .write_all(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes())
        .await?;
    writer.write_all(&body).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader as TokioBufReader;

    #[tokio::test]
    async fn reads_a_framed_request() {
        let body = br#"{"jsonrpc":"2.0","id":1,"method":"ping","params":{}}"#;
        let frame = format!("Content-Length: {}\r\n\r\n", body.len());
        let mut input = frame.into_bytes();
        input.extend_from_slice(body);

        let mut reader = TokioBufReader::new(&input[..]);
        let request = read_message(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.method, "ping");
        assert_eq!(request.id, Some(Value::from(1)));
    }

    #[tokio::test]
    async fn clean_eof_returns_none() {
        let mut reader = TokioBufReader::new(&b""[..]);
        assert!(read_message(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn round_trips_a_success_response() {
        let response = Response::success(Value::from(7), serde_json::json!({"ok": true}));
        let mut out = Vec::new();
        write_message(&mut out, &response).await.unwrap();

        let mut reader = TokioBufReader::new(&out[..]);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert!(line.starts_with("Content-Length:"));
    }
}
