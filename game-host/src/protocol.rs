use anyhow::Result;
use game_types::{UiCommand, UiMessage};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::session::GameSession;

/// Read one JSON `UiCommand` per line until EOF, forwarding every reply.
/// Lines that are not UTF-8 or not a command are answered with an `Error`
/// message and reading goes on.
pub async fn read_commands<R>(
    mut reader: R,
    session: &GameSession,
    out: &mpsc::UnboundedSender<UiMessage>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let text = match std::str::from_utf8(&buf) {
            Ok(text) => text,
            Err(e) => {
                debug!("Rejected input line that is not UTF-8: {}", e);
                let message = UiMessage::Error {
                    message: format!("Invalid command: {}", e),
                };
                if out.send(message).is_err() {
                    return Ok(());
                }
                continue;
            }
        };
        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        let messages = match serde_json::from_str::<UiCommand>(line) {
            Ok(command) => session.handle_command(command).await,
            Err(e) => {
                debug!("Rejected input line {:?}: {}", line, e);
                vec![UiMessage::Error {
                    message: format!("Invalid command: {}", e),
                }]
            }
        };

        for message in messages {
            if out.send(message).is_err() {
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Write each message as one JSON line until every sender is gone
pub async fn write_messages<W>(
    mut messages: mpsc::UnboundedReceiver<UiMessage>,
    mut writer: W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = messages.recv().await {
        let mut line = serde_json::to_string(&message)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
