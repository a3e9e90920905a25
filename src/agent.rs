//! Wiring between the message handler and the host runtime that owns the conversation.

mod console;

use log::info;

use crate::handler::MessageHandler;
use crate::http::Fetch;
use crate::types::{ChatMessage, MessageRole};

pub use console::{ConsoleEnvironment, run_session};

/// Sent when the host has no user message for us yet.
pub const WELCOME: &str = "Hello! Send me a message to get started.";

/// Operations the host runtime exposes to the agent.
pub trait AgentEnvironment {
    /// The conversation so far, oldest first.
    fn list_messages(&self) -> &[ChatMessage];

    fn add_reply(&mut self, reply: &str);

    /// Ask the host to collect another message from the user.
    fn request_user_input(&mut self);
}

/// Run one agent turn: answer the most recent user message, then ask for more input.
pub async fn run_turn<E, F>(env: &mut E, handler: &MessageHandler<F>)
where
    E: AgentEnvironment,
    F: Fetch,
{
    let last_user_message = env
        .list_messages()
        .iter()
        .rev()
        .find(|message| message.role == MessageRole::User)
        .map(|message| message.content.clone());

    match last_user_message {
        Some(message) => {
            info!("Handling user message: {}", message);
            let reply = handler.handle(&message).await;
            info!("Replying: {}", reply);
            env.add_reply(&reply);
        }
        None => {
            info!("No user message yet, sending welcome");
            env.add_reply(WELCOME);
        }
    }

    env.request_user_input();
}
