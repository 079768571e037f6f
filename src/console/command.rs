//! Operator command parsing.

use std::str::FromStr;

use thiserror::Error;

/// Text printed by `help`.
pub const HELP: &str = "\
commands:
  add <host> <port>   add a backend
  del <row>           delete the backend shown in row <row>
  del <host> <port>   delete a backend by address
  refresh             restart polling and resynchronize now
  hide | show         pause / resume polling while the view is hidden
  list                print the current table
  status              show polling state
  help                this text
  quit                exit";

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { host: String, port: String },
    DeleteRow(usize),
    Delete { host: String, port: String },
    Refresh,
    Hide,
    Show,
    List,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        let command = match (name.to_ascii_lowercase().as_str(), args) {
            ("add", [host, port]) => Command::Add {
                host: host.to_string(),
                port: port.to_string(),
            },
            ("add", _) => return Err(CommandError::Usage("add <host> <port>")),
            ("del" | "delete" | "rm", [row]) => match row.parse::<usize>() {
                Ok(row) => Command::DeleteRow(row),
                Err(_) => return Err(CommandError::Usage("del <row> | del <host> <port>")),
            },
            ("del" | "delete" | "rm", [host, port]) => Command::Delete {
                host: host.to_string(),
                port: port.to_string(),
            },
            ("del" | "delete" | "rm", _) => return Err(CommandError::Usage("del <row> | del <host> <port>")),
            ("refresh" | "r", []) => Command::Refresh,
            ("hide", []) => Command::Hide,
            ("show", []) => Command::Show,
            ("list" | "ls", []) => Command::List,
            ("status", []) => Command::Status,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_delete_forms() {
        assert_eq!(
            "add 10.0.0.2 9090".parse::<Command>(),
            Ok(Command::Add {
                host: "10.0.0.2".into(),
                port: "9090".into()
            })
        );
        assert_eq!("del 3".parse::<Command>(), Ok(Command::DeleteRow(3)));
        assert_eq!(
            "  DEL   10.0.0.1  8080 ".parse::<Command>(),
            Ok(Command::Delete {
                host: "10.0.0.1".into(),
                port: "8080".into()
            })
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!("refresh".parse::<Command>(), Ok(Command::Refresh));
        assert_eq!("hide".parse::<Command>(), Ok(Command::Hide));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("add onlyhost".parse::<Command>(), Err(CommandError::Usage("add <host> <port>")));
        assert!(matches!("del first".parse::<Command>(), Err(CommandError::Usage(_))));
        assert_eq!("launch".parse::<Command>(), Err(CommandError::Unknown("launch".into())));
    }
}
