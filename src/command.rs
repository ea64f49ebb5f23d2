use crate::store::Action;
use crate::types::{Language, SortMode, UnknownOption};

/// One line typed into the terminal client.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Action),
    ListLanguages,
    ListSortModes,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Option(#[from] UnknownOption),
    #[error("unknown command ':{0}' (try :help)")]
    Unknown(String),
    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "\
Type a keyword and press enter to search.
  :lang <code>   choose the news language (:langs lists them)
  :sort <mode>   relevancy, popularity or publishedAt
  :retry         repeat the last search
  :quit          exit";

/// Lines starting with `:` are commands, anything else replaces the keyword.
/// `::` escapes a keyword that itself starts with a colon.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = line.strip_prefix("::") {
        return Ok(Command::Dispatch(Action::SetKeyword(format!(":{}", escaped))));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Dispatch(Action::SetKeyword(line.to_string())));
    };

    let mut parts = rest.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match name {
        "lang" | "language" => {
            let code = arg.ok_or(CommandError::MissingArgument("lang"))?;
            Ok(Command::Dispatch(Action::SetLanguage(code.parse::<Language>()?)))
        }
        "sort" | "sortBy" => {
            let mode = arg.ok_or(CommandError::MissingArgument("sort"))?;
            Ok(Command::Dispatch(Action::SetSortBy(mode.parse::<SortMode>()?)))
        }
        "retry" => Ok(Command::Dispatch(Action::Retry)),
        "langs" => Ok(Command::ListLanguages),
        "sorts" => Ok(Command::ListSortModes),
        "help" => Ok(Command::Help),
        "quit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

pub fn language_list() -> String {
    Language::ALL
        .iter()
        .map(|lang| format!("  {}  {}", lang.code(), lang.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sort_mode_list() -> String {
    SortMode::ALL
        .iter()
        .map(|mode| format!("  {:<12} {}", mode.as_str(), mode.label()))
        .collect::<Vec<_>>()
        .join("\n")
}
