use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid URL in {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    /// Returns a message suitable for printing to the person running the agent
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Config(_) | AgentError::EnvVar(_) | AgentError::InvalidUrl { .. } => {
                format!("The agent is misconfigured: {self}. Check your environment or .env file.")
            }
            AgentError::Reqwest(_) => {
                "Sorry, the agent could not set up its HTTP client.".to_string()
            }
            AgentError::Io(_) => {
                "Sorry, the console stopped responding. Please restart the agent.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
