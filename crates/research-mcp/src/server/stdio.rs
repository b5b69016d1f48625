//! Stdio transport for MCP protocol.
//!
//! Handles line-delimited JSON-RPC 2.0 over stdin/stdout. Logs go to stderr.

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::protocol::{JsonRpcRequest, JsonRpcResponse, ServerState, codes};

/// Handle MCP protocol over stdio until stdin closes.
pub async fn run_stdio(state: &ServerState) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(req) => req,
            Err(e) => {
                let error_response =
                    JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {}", e));
                write_response(&mut stdout, &error_response).await?;
                continue;
            }
        };

        if let Some(response) = state.handle_request(&request).await {
            write_response(&mut stdout, &response).await?;
        }
    }

    Ok(())
}

async fn write_response<W>(out: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)?;
    out.write_all(response_json.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_response_is_line_delimited() {
        let mut buf: Vec<u8> = Vec::new();
        let response = JsonRpcResponse::success(Some(serde_json::json!(1)), serde_json::json!({}));
        write_response(&mut buf, &response).await.unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);
        assert!(text.contains("\"jsonrpc\":\"2.0\""));
    }
}
