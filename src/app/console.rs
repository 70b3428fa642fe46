use crate::app::reply::render_reply;
use crate::core::dinner::DinnerEngine;
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;

pub const DINNER_COMMAND: &str = "/dinner";

/// One inbound `/dinner` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub user_id: i64,
}

impl Command {
    /// Parses `<user_id> /dinner`. Anything else is not a command for us.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let user_id = parts.next()?.parse().ok()?;
        if parts.next()? != DINNER_COMMAND || parts.next().is_some() {
            return None;
        }
        Some(Self { user_id })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DinnerReply {
    pub user_id: i64,
    pub text: String,
}

/// Line-oriented transport: each command runs as its own task, replies are
/// written in completion order.
pub struct ConsoleTransport {
    engine: DinnerEngine,
    conjunction: String,
}

impl ConsoleTransport {
    pub fn new(engine: DinnerEngine, conjunction: impl Into<String>) -> Self {
        Self {
            engine,
            conjunction: conjunction.into(),
        }
    }

    pub async fn handle(&self, command: Command) -> DinnerReply {
        answer(self.engine.clone(), self.conjunction.clone(), command).await
    }

    /// Serves until `reader` hits EOF and every in-flight request has been
    /// answered. Returns the number of replies written.
    ///
    /// An I/O error stops reading but in-flight requests still run to
    /// completion before the error is returned.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut tasks = JoinSet::new();
        let mut input_open = true;
        let mut io_error: Option<std::io::Error> = None;
        let mut replies = 0;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line {
                        Ok(Some(line)) => match Command::parse(&line) {
                            Some(command) => {
                                tasks.spawn(answer(self.engine.clone(), self.conjunction.clone(), command));
                            }
                            None => tracing::debug!("ignoring input line: {:?}", line),
                        },
                        Ok(None) => input_open = false,
                        Err(e) => {
                            tracing::error!(error = %e, in_flight = tasks.len(), "failed to read input");
                            input_open = false;
                            io_error.get_or_insert(e);
                        }
                    }
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    match joined {
                        Ok(reply) if io_error.is_none() => {
                            match write_reply(&mut writer, &reply).await {
                                Ok(()) => replies += 1,
                                Err(e) => {
                                    tracing::error!(error = %e, "failed to write reply");
                                    input_open = false;
                                    io_error = Some(e);
                                }
                            }
                        }
                        Ok(reply) => tracing::warn!(user_id = reply.user_id, "reply dropped after I/O error"),
                        Err(e) => tracing::error!(error = %e, "dinner task failed"),
                    }
                }
                else => break,
            }
        }

        match io_error {
            Some(e) => Err(e.into()),
            None => Ok(replies),
        }
    }
}

async fn write_reply<W: AsyncWrite + Unpin>(writer: &mut W, reply: &DinnerReply) -> std::io::Result<()> {
    let line = format!("{}: {}\n", reply.user_id, reply.text);
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await
}

async fn answer(engine: DinnerEngine, conjunction: String, command: Command) -> DinnerReply {
    let result = engine.recommend(command.user_id).await;
    if result.is_ok() {
        tracing::info!(user_id = command.user_id, "apply command '{}'", DINNER_COMMAND);
    }
    DinnerReply {
        user_id: command.user_id,
        text: render_reply(&result, &conjunction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryFoodCatalog, InMemoryRequestHistory};
    use crate::core::{Category, Dish, QuotaPolicy};
    use crate::utils::error::DinnerError;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncReadExt, BufReader, ReadBuf};

    struct BrokenInput;

    impl AsyncRead for BrokenInput {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdin closed",
            )))
        }
    }

    #[tokio::test]
    async fn test_read_error_waits_for_in_flight_requests() {
        let history = Arc::new(InMemoryRequestHistory::new(QuotaPolicy::default()));
        let catalog = Arc::new(InMemoryFoodCatalog::new(vec![
            Dish::new("Soup1", Category::Soup).unwrap(),
        ]));
        let transport = ConsoleTransport::new(DinnerEngine::new(catalog, history.clone()), " and ");

        let input = BufReader::new((&b"1 /dinner\n2 /dinner\n"[..]).chain(BrokenInput));
        let mut output = Vec::new();

        let result = transport.run(input, &mut output).await;

        assert!(matches!(result, Err(DinnerError::IoError(_))));
        assert_eq!(history.count_for(1).await, 1);
        assert_eq!(history.count_for(2).await, 1);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::parse("42 /dinner"), Some(Command { user_id: 42 }));
        assert_eq!(Command::parse("  -7   /dinner  "), Some(Command { user_id: -7 }));
        assert_eq!(Command::parse("42 /lunch"), None);
        assert_eq!(Command::parse("bob /dinner"), None);
        assert_eq!(Command::parse("42"), None);
        assert_eq!(Command::parse("42 /dinner now"), None);
        assert_eq!(Command::parse(""), None);
    }
}
