//! Terminal host: reads user messages from a line source and prints replies.

use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::handler::MessageHandler;
use crate::http::Fetch;
use crate::types::ChatMessage;

use super::{AgentEnvironment, run_turn};

const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// In-memory conversation history backed by a line reader and a writer.
pub struct ConsoleEnvironment<R, W> {
    history: Vec<ChatMessage>,
    pending_replies: Vec<String>,
    awaiting_input: bool,
    input: R,
    output: W,
}

impl<R, W> ConsoleEnvironment<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            history: Vec::new(),
            pending_replies: Vec::new(),
            awaiting_input: false,
            input,
            output,
        }
    }

    pub fn awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write queued replies to the output.
    pub async fn flush_replies(&mut self) -> Result<()> {
        for reply in self.pending_replies.drain(..) {
            self.output
                .write_all(format!("Agent: {reply}\n").as_bytes())
                .await?;
        }
        self.output.flush().await?;
        Ok(())
    }

    /// Prompt for and read the next non-blank line into the history.
    ///
    /// Returns `false` when the input is exhausted or the user asked to leave.
    pub async fn read_message(&mut self) -> Result<bool> {
        loop {
            self.output.write_all(b"You: ").await?;
            self.output.flush().await?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                debug!("Input closed");
                return Ok(false);
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if EXIT_COMMANDS.contains(&line.to_lowercase().as_str()) {
                debug!("User ended the session");
                return Ok(false);
            }

            self.awaiting_input = false;
            self.history.push(ChatMessage::user(line));
            return Ok(true);
        }
    }
}

impl<R, W> AgentEnvironment for ConsoleEnvironment<R, W> {
    fn list_messages(&self) -> &[ChatMessage] {
        &self.history
    }

    fn add_reply(&mut self, reply: &str) {
        self.history.push(ChatMessage::assistant(reply));
        self.pending_replies.push(reply.to_string());
    }

    fn request_user_input(&mut self) {
        self.awaiting_input = true;
    }
}

/// Drive turns until the user leaves or the input ends.
pub async fn run_session<R, W, F>(
    env: &mut ConsoleEnvironment<R, W>,
    handler: &MessageHandler<F>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Fetch,
{
    run_turn(env, handler).await;

    loop {
        env.flush_replies().await?;
        if !env.awaiting_input() || !env.read_message().await? {
            break;
        }
        run_turn(env, handler).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::WELCOME;
    use crate::handler::tests::quote_handler;
    use crate::handler::{FALLBACK, GREETING};
    use crate::http::testing::CannedFetch;

    async fn transcript(input: &'static [u8]) -> Result<String> {
        let handler = quote_handler(CannedFetch::respond(200, r#"[{"quote":"Q","author":"A"}]"#));
        let mut env = ConsoleEnvironment::new(input, Vec::<u8>::new());
        run_session(&mut env, &handler).await?;
        Ok(String::from_utf8_lossy(&env.into_output()).into_owned())
    }

    #[tokio::test]
    async fn session_welcomes_then_answers_each_line() -> Result<()> {
        let output = transcript(b"hello\n\nquote me\nnonsense\n").await?;
        let expected = format!(
            "Agent: {WELCOME}\nYou: Agent: {GREETING}\nYou: You: Agent: Breaking Bad Quote: \"Q\" - A\nYou: Agent: {FALLBACK}\nYou: "
        );
        assert_eq!(output, expected);
        Ok(())
    }

    #[tokio::test]
    async fn exit_command_ends_session() -> Result<()> {
        let output = transcript(b"QUIT\nhello\n").await?;
        assert_eq!(output, format!("Agent: {WELCOME}\nYou: "));
        Ok(())
    }

    #[tokio::test]
    async fn history_records_both_sides() -> Result<()> {
        let handler = quote_handler(CannedFetch::respond(200, "[]"));
        let mut env = ConsoleEnvironment::new(&b"hi\n"[..], Vec::<u8>::new());
        run_session(&mut env, &handler).await?;

        assert_eq!(
            env.list_messages(),
            &[
                ChatMessage::assistant(WELCOME),
                ChatMessage::user("hi"),
                ChatMessage::assistant(FALLBACK),
            ]
        );
        Ok(())
    }
}
