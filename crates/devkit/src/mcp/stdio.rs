use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting devkit MCP server on stdio...");
        eprintln!();
    }

    serve(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &global,
    )
    .await?;

    log::debug!("stdin closed, shutting down MCP server");

    Ok(())
}

/// Answer newline-delimited JSON-RPC messages from `reader` until it closes
pub async fn serve<R, W>(reader: R, mut writer: W, global: &crate::Global) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("Received: {trimmed}");
        }

        let Some(response) = super::handle_request(trimmed, global).await else {
            log::debug!("notification handled, no response");
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        if global.verbose {
            eprintln!("Sending: {response_json}");
        }

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn global() -> crate::Global {
        crate::Global {
            verbose: false,
            copy: false,
        }
    }

    async fn responses(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        serve(input.as_bytes(), &mut output, &global()).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_serve_answers_each_request_in_order() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"url","arguments":{"text":"a b"}}}"#,
            "\n",
        );

        let replies = responses(input).await;

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["id"], 1);
        assert_eq!(replies[0]["result"]["serverInfo"]["name"], "devkit");
        assert_eq!(replies[1]["id"], 2);

        let text = replies[1]["result"]["content"][0]["text"].as_str().unwrap();
        let output: Value = serde_json::from_str(text).unwrap();
        assert_eq!(output["output"], "a%20b");
    }

    #[tokio::test]
    async fn test_serve_keeps_going_after_parse_error() {
        let input = "{oops\n{\"jsonrpc\":\"2.0\",\"id\":\"p\",\"method\":\"ping\"}\n";

        let replies = responses(input).await;

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["error"]["code"], crate::mcp::PARSE_ERROR);
        assert_eq!(replies[1]["id"], "p");
        assert_eq!(replies[1]["result"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_serve_over_duplex() {
        let (mut client, server) = tokio::io::duplex(4096);
        let (reader, writer) = tokio::io::split(server);
        let global = global();

        let exchange = async move {
            client
                .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"tools/list\"}\n")
                .await
                .unwrap();

            let line = BufReader::new(&mut client)
                .lines()
                .next_line()
                .await
                .unwrap()
                .unwrap();
            serde_json::from_str::<Value>(&line).unwrap()
        };

        let (served, reply) = tokio::join!(serve(BufReader::new(reader), writer, &global), exchange);

        served.unwrap();
        assert_eq!(reply["id"], 9);
        assert_eq!(reply["result"]["tools"].as_array().unwrap().len(), 9);
    }
}
