use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Semaphore};

use crate::error::{Result, ServerError};
use crate::handler::McpHandler;

/// Requests handled concurrently before the reader stops pulling input.
const MAX_IN_FLIGHT: usize = 64;

/// Serve newline-delimited JSON-RPC on the process's stdin/stdout.
pub async fn run(handler: Arc<McpHandler>) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    serve(handler, stdin, tokio::io::stdout()).await?;
    Ok(())
}

/// Reads one message per line and answers each on its own blocking task.
///
/// Responses funnel through a single writer task so lines never interleave;
/// they may be written out of request order. At most [`MAX_IN_FLIGHT`]
/// requests are in progress at once. Returns the writer once input is
/// exhausted and every in-flight response has been flushed.
pub async fn serve<R, W>(handler: Arc<McpHandler>, mut reader: R, writer: W) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(MAX_IN_FLIGHT);
    let permits = Arc::new(Semaphore::new(MAX_IN_FLIGHT));

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<W, std::io::Error>(writer)
    });

    let mut buf = Vec::new();
    loop {
        buf.clear();
        // Raw bytes: a line that is not UTF-8 is answered, not fatal.
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let permit = Arc::clone(&permits)
            .acquire_owned()
            .await
            .map_err(|e| ServerError::Internal(format!("request limiter closed: {e}")))?;
        let line = std::mem::take(&mut buf);
        let handler = Arc::clone(&handler);
        let tx = tx.clone();
        // Entropy reads may block on the OS, keep them off the reactor.
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let Some(response) = handler.handle_bytes(&line) else {
                return;
            };
            match serde_json::to_string(&response) {
                Ok(encoded) => {
                    if tx.blocking_send(encoded).is_err() {
                        tracing::warn!("stdout writer closed, dropping response");
                    }
                }
                Err(e) => tracing::error!(error = %e, "failed to encode response"),
            }
        });
    }
    tracing::info!("stdin closed, draining responses");
    drop(tx);

    let writer = writer_task
        .await
        .map_err(|e| ServerError::Internal(format!("stdout writer task failed: {e}")))??;
    Ok(writer)
}
