use serde::{Deserialize, Serialize};

/// How the interactive console treats submissions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleMode {
    /// Input is graded as correct or incorrect.
    #[default]
    Check,
    /// Free-form input, never graded.
    Chat,
}

impl ConsoleMode {
    /// Read the mode from the console's `data-mode` attribute.
    /// Anything other than `chat` means check mode.
    #[must_use]
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("chat") => ConsoleMode::Chat,
            _ => ConsoleMode::Check,
        }
    }

    #[must_use]
    pub fn as_attr(self) -> &'static str {
        match self {
            ConsoleMode::Check => "check",
            ConsoleMode::Chat => "chat",
        }
    }

    #[must_use]
    pub fn resting_label(self) -> &'static str {
        match self {
            ConsoleMode::Check => "Check Answer",
            ConsoleMode::Chat => "Send",
        }
    }

    #[must_use]
    pub fn in_flight_label(self) -> &'static str {
        match self {
            ConsoleMode::Check => "Checking...",
            ConsoleMode::Chat => "Sending...",
        }
    }

    #[must_use]
    pub fn empty_input_message(self) -> &'static str {
        match self {
            ConsoleMode::Check => "Please enter a command",
            ConsoleMode::Chat => "Please type a message",
        }
    }

    #[must_use]
    pub fn grades_answers(self) -> bool {
        matches!(self, ConsoleMode::Check)
    }
}

/// Trimmed command text, or `None` when nothing but whitespace was entered.
#[must_use]
pub fn normalize_command(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
