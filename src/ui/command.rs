//! Input line parsing

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, already trimmed and non-empty
    Send(String),
    New,
    Load(String),
    List,
    History,
    Help,
    Quit,
    /// Blank line
    Empty,
    /// Known command missing its argument
    MissingArgument(&'static str),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Send(trimmed.to_string());
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match (name, arg) {
            ("new", _) => Command::New,
            ("load", Some(id)) => Command::Load(id.to_string()),
            ("load", None) => Command::MissingArgument("/load <conversation-id>"),
            ("list", _) => Command::List,
            ("history", _) => Command::History,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", _) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type a message and press Enter to send it.
  /new          start a new conversation
  /load <id>    load a conversation by id
  /list         show your conversations
  /history      reprint the current transcript
  /help         show this help
  /quit         exit";
