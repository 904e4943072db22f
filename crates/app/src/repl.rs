use std::path::PathBuf;

pub const HELP: &str = "commands: /upload <path>, /history, /save [path], /help, /quit";

#[derive(Debug, PartialEq, Eq)]
pub enum ChatInput {
    Empty,
    Question(String),
    Upload(PathBuf),
    History,
    Save(Option<PathBuf>),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_chat_input(line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }

    let Some(command) = line.strip_prefix('/') else {
        return ChatInput::Question(line.to_string());
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match (name, argument) {
        ("quit" | "exit", _) => ChatInput::Quit,
        ("history", _) => ChatInput::History,
        ("help", _) => ChatInput::Help,
        ("save", "") => ChatInput::Save(None),
        ("save", path) => ChatInput::Save(Some(PathBuf::from(path))),
        ("upload", "") => ChatInput::Unknown(line.to_string()),
        ("upload", path) => ChatInput::Upload(PathBuf::from(path)),
        _ => ChatInput::Unknown(line.to_string()),
    }
}
