//! Shell Commands
//!
//! One line of input maps to one user intent.

use todo_sync_lib::ItemId;

pub const HELP: &str = "\
Commands:
  name <text>    set the name of the new item
  desc <text>    set its description
  add            create the item from the form
  delete <id>    delete an item by id
  show           redraw the lists
  help           this text
  signout        end the session (also: quit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetName(String),
    SetDescription(String),
    Add,
    Delete(ItemId),
    Show,
    Help,
    SignOut,
    /// Blank line
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    MissingId,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Unknown(word) => write!(f, "Unknown command '{}', try 'help'", word),
            ParseError::MissingId => write!(f, "Usage: delete <id>"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Intent {
    /// Text arguments keep their inner spacing; only the separator after the
    /// command word is dropped. `name` with no text clears the field.
    pub fn parse(line: &str) -> Result<Intent, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Intent::Nothing),
            "name" => Ok(Intent::SetName(rest.to_string())),
            "desc" | "description" => Ok(Intent::SetDescription(rest.to_string())),
            "add" => Ok(Intent::Add),
            "delete" | "del" => match rest.trim() {
                "" => Err(ParseError::MissingId),
                id => Ok(Intent::Delete(ItemId::new(id))),
            },
            "show" => Ok(Intent::Show),
            "help" | "?" => Ok(Intent::Help),
            "signout" | "quit" | "exit" => Ok(Intent::SignOut),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_fields() {
        assert_eq!(Intent::parse("name Buy milk"), Ok(Intent::SetName("Buy milk".to_string())));
        assert_eq!(
            Intent::parse("desc  two  spaces\n"),
            Ok(Intent::SetDescription(" two  spaces".to_string()))
        );
        assert_eq!(Intent::parse("name"), Ok(Intent::SetName(String::new())));
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(Intent::parse("add"), Ok(Intent::Add));
        assert_eq!(Intent::parse("  ADD "), Ok(Intent::Add));
        assert_eq!(Intent::parse("delete 42"), Ok(Intent::Delete(ItemId::new("42"))));
        assert_eq!(Intent::parse("show"), Ok(Intent::Show));
        assert_eq!(Intent::parse("quit"), Ok(Intent::SignOut));
        assert_eq!(Intent::parse("signout"), Ok(Intent::SignOut));
        assert_eq!(Intent::parse("   "), Ok(Intent::Nothing));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Intent::parse("delete"), Err(ParseError::MissingId));
        assert_eq!(
            Intent::parse("frobnicate x"),
            Err(ParseError::Unknown("frobnicate".to_string()))
        );
    }
}
