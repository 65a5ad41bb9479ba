//! Shell command parsing
//!
//! Turns a raw input line into a [`Command`]. Every command has the short
//! alias the original shell shipped with; unknown input is reported back
//! rather than silently ignored.

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show command help
    Help,
    /// Add a note to the current file
    Add(String),
    /// List the notes in the current file
    List,
    /// List the note files in the notes directory
    Files,
    /// Delete one note by its 1-based display number
    Delete(String),
    /// Delete every note in the current file
    DeleteAll,
    /// Switch to another note file (created if missing)
    Use(String),
    /// Encrypt the current file under a new password
    SetPassword(Option<String>),
    /// Provide the session password (prompted if omitted)
    Unlock(Option<String>),
    /// Clear the session password
    Lock,
    /// Delete a note file entirely
    DeleteFile(String),
    /// Leave the shell
    Exit,
    /// Blank input line
    Empty,
    /// Anything else
    Unknown(String),
}

/// Parse one input line into a command
pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "help" => Command::Help,
        "add" | "an" => Command::Add(rest.to_string()),
        "list" | "ln" => Command::List,
        "files" | "lf" => Command::Files,
        "delete" | "dn" => Command::Delete(rest.to_string()),
        "delete-all" | "da" => Command::DeleteAll,
        "use" | "sn" => Command::Use(rest.to_string()),
        "set-password" | "sp" => Command::SetPassword(optional_arg(rest)),
        "unlock" | "gp" => Command::Unlock(optional_arg(rest)),
        "lock" => Command::Lock,
        "delete-file" | "df" => Command::DeleteFile(rest.to_string()),
        "exit" | "quit" => Command::Exit,
        other => Command::Unknown(other.to_string()),
    }
}

fn optional_arg(rest: &str) -> Option<String> {
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_keeps_note_text() {
        assert_eq!(parse("add buy milk"), Command::Add("buy milk".into()));
        assert_eq!(parse("an   call mom  "), Command::Add("call mom".into()));
    }

    #[test]
    fn test_parse_add_without_text() {
        assert_eq!(parse("add"), Command::Add(String::new()));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(parse("ln"), Command::List);
        assert_eq!(parse("lf"), Command::Files);
        assert_eq!(parse("da"), Command::DeleteAll);
        assert_eq!(parse("dn 3"), Command::Delete("3".into()));
        assert_eq!(parse("sn work"), Command::Use("work".into()));
        assert_eq!(parse("df old"), Command::DeleteFile("old".into()));
        assert_eq!(parse("gp pw"), Command::Unlock(Some("pw".into())));
    }

    #[test]
    fn test_parse_password_commands_optional_arg() {
        assert_eq!(parse("set-password"), Command::SetPassword(None));
        assert_eq!(parse("set-password s3cr3t"), Command::SetPassword(Some("s3cr3t".into())));
        assert_eq!(parse("unlock"), Command::Unlock(None));
        assert_eq!(parse("lock"), Command::Lock);
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(parse("   "), Command::Empty);
        assert_eq!(parse("frobnicate now"), Command::Unknown("frobnicate".into()));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("exit"), Command::Exit);
        assert_eq!(parse("quit"), Command::Exit);
    }
}
