//! Keyword classification of incoming messages.

use strum::{Display, EnumString, VariantNames};

const GREETING_KEYWORD: &str = "hello";
const QUOTE_KEYWORD: &str = "quote";
const WEATHER_PREFIX: &str = "weather";
const JOKE_KEYWORD: &str = "joke";

/// Which lookup commands the agent answers besides the greeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, VariantNames, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Variant {
    #[default]
    Quote,
    Weather,
    Joke,
    /// Every lookup, checked in the order quote, weather, joke.
    All,
}

impl Variant {
    fn answers_quote(self) -> bool {
        matches!(self, Variant::Quote | Variant::All)
    }

    fn answers_weather(self) -> bool {
        matches!(self, Variant::Weather | Variant::All)
    }

    fn answers_joke(self) -> bool {
        matches!(self, Variant::Joke | Variant::All)
    }
}

/// What a message asks the agent to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Greeting,
    Quote,
    /// `city` is everything after the first word, in its original casing.
    /// It is empty when the user did not name one.
    Weather { city: String },
    Joke,
    Unknown,
}

impl Command {
    /// Classify a message. The first matching rule wins and the greeting
    /// always takes priority.
    pub fn classify(message: &str, variant: Variant) -> Self {
        let lowered = message.to_lowercase();

        if lowered.contains(GREETING_KEYWORD) {
            return Command::Greeting;
        }
        if variant.answers_quote() && lowered.contains(QUOTE_KEYWORD) {
            return Command::Quote;
        }
        if variant.answers_weather() && lowered.starts_with(WEATHER_PREFIX) {
            let city = message.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
            return Command::Weather { city };
        }
        if variant.answers_joke() && lowered.contains(JOKE_KEYWORD) {
            return Command::Joke;
        }

        Command::Unknown
    }
}
