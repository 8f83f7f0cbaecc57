//! JSON-lines command session.
//!
//! Each input line is a command object with an optional `id`, e.g.
//! `{"id": 1, "command": "tap", "x": 100, "y": 200}`. Commands take effect
//! in the order their lines arrive. Gestures then play concurrently, and
//! each reply is written as soon as its command finishes and carries the
//! request's `id`.

use std::sync::Arc;

use gesture_relay_engine::{CommandDispatcher, EngineError, Submission};
use gesture_relay_types::{Command, Response};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The line was not a well-formed command.
    Decode,
    InvalidArgument,
    Unsupported,
    Internal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyBody {
    Result(Response),
    Error { kind: ErrorKind, message: String },
}

/// One output line.
#[derive(Debug, Serialize)]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub body: ReplyBody,
}

impl Reply {
    fn error(id: Option<Value>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id,
            body: ReplyBody::Error {
                kind,
                message: message.into(),
            },
        }
    }

    fn result(id: Option<Value>, response: Response) -> Self {
        if !response.is_success() {
            debug!(?id, ?response, "command had no effect");
        }
        Self {
            id,
            body: ReplyBody::Result(response),
        }
    }

    fn failure(id: Option<Value>, error: &EngineError) -> Self {
        if error.is_invalid_input() {
            debug!(?id, %error, "command refused");
        } else {
            warn!(?id, %error, "command failed");
        }
        let kind = match error {
            EngineError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            EngineError::Unsupported => ErrorKind::Unsupported,
            EngineError::Config(_) | EngineError::Input(_) => ErrorKind::Internal,
        };
        Self::error(id, kind, error.to_string())
    }
}

/// Split a line into its request id and command.
fn decode(line: &str) -> (Option<Value>, Result<Command, serde_json::Error>) {
    let mut value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return (None, Err(e)),
    };
    let id = value.as_object_mut().and_then(|obj| obj.remove("id"));
    (id, serde_json::from_value(value))
}

pub struct Session {
    dispatcher: Arc<CommandDispatcher>,
}

impl Session {
    pub fn new(dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Serve commands from `input` until it ends and every command has
    /// replied.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut tasks: JoinSet<Reply> = JoinSet::new();
        let mut eof = false;

        loop {
            tokio::select! {
                line = lines.next_line(), if !eof => {
                    let Some(line) = line? else {
                        debug!(in_flight = tasks.len(), "input closed");
                        eof = true;
                        continue;
                    };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match decode(line) {
                        (id, Ok(command)) => match self.dispatcher.submit(command).await {
                            Ok(Submission::Ready(response)) => {
                                write_reply(&mut output, &Reply::result(id, response)).await?;
                            }
                            Ok(Submission::Pending(pending)) => {
                                tasks.spawn(async move { Reply::result(id, pending.finish().await) });
                            }
                            Err(e) => {
                                write_reply(&mut output, &Reply::failure(id, &e)).await?;
                            }
                        },
                        (id, Err(e)) => {
                            warn!(error = %e, "undecodable command");
                            let reply = Reply::error(id, ErrorKind::Decode, e.to_string());
                            write_reply(&mut output, &reply).await?;
                        }
                    }
                }
                Some(joined) = tasks.join_next() => {
                    let reply = joined.unwrap_or_else(|e| {
                        Reply::error(None, ErrorKind::Internal, format!("command task failed: {e}"))
                    });
                    write_reply(&mut output, &reply).await?;
                }
                else => break,
            }
        }
        Ok(())
    }
}

async fn write_reply<W: AsyncWrite + Unpin>(output: &mut W, reply: &Reply) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;
    Ok(())
}
