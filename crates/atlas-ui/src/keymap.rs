//! Line-oriented key mapping.
//!
//! Each line typed at the prompt maps to one UI action:
//!
//! | line              | action                          |
//! |-------------------|---------------------------------|
//! | (empty)           | Enter - search                  |
//! | `/search`         | search                          |
//! | `/select <name>`  | pick a suggestion by name       |
//! | `/pick <n>`       | pick the n-th listed suggestion |
//! | `/reset`          | restore the full list           |
//! | `/clear`          | clear the query                 |
//! | `/help`, `/quit`  | help, exit                      |
//! | `//text`          | literal input `/text`           |
//! | anything else     | the new query text              |
//!
//! Enter and `/search` produce the same command.

use atlas_engine::Command;

/// What a line asks the frontend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Forward a command to the backend.
    Dispatch(Command),

    /// Pick a suggestion by its 1-based position in the rendered list.
    Pick(usize),

    /// Print usage.
    Help,

    /// Exit.
    Quit,

    /// Malformed or unknown slash command.
    Invalid(String),
}

/// Usage text for `/help`.
pub const HELP: &str = "\
Type to filter countries by name. Suggestions update as you type.
  <enter>          search with the current text
  /search          same as <enter>
  /select <name>   show only the named country
  /pick <n>        show only the n-th suggestion
  /reset           cancel the search and reload all countries
  /clear           clear the search text
  /help            show this help
  /quit            exit";

/// Map one input line to an action.
pub fn parse_line(line: &str) -> UiAction {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.is_empty() {
        return UiAction::Dispatch(Command::SearchCommit);
    }

    if let Some(literal) = line.strip_prefix("//") {
        return UiAction::Dispatch(Command::Input(format!("/{}", literal)));
    }

    let Some(rest) = line.strip_prefix('/') else {
        return UiAction::Dispatch(Command::Input(line.to_string()));
    };

    let (name, arg) = match rest.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "search" => UiAction::Dispatch(Command::SearchCommit),
        "reset" | "cancel" => UiAction::Dispatch(Command::Reset),
        "clear" => UiAction::Dispatch(Command::Input(String::new())),
        "select" if !arg.is_empty() => {
            UiAction::Dispatch(Command::SelectSuggestion(arg.to_string()))
        }
        "select" => UiAction::Invalid("usage: /select <name>".to_string()),
        "pick" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => UiAction::Pick(n),
            _ => UiAction::Invalid("usage: /pick <n>".to_string()),
        },
        "help" | "?" => UiAction::Help,
        "quit" | "exit" | "q" => UiAction::Quit,
        other => UiAction::Invalid(format!("unknown command: /{}", other)),
    }
}
