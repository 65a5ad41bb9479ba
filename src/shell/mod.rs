//! Interactive shell
//!
//! The caller layer around the note store: reads commands line by line,
//! dispatches them against the selected note file, and renders results. All
//! password and encryption rules are enforced by the store and session
//! modules; this layer only decides what to print.

pub mod command;

pub use command::{parse, Command};

use std::io::{BufRead, Write};

use crate::config::{NotesPaths, DEFAULT_NOTES_FILE};
use crate::crypto::FileRepresentation;
use crate::error::{NoteError, NoteResult};
use crate::session::{
    set_new_password, set_session_password, verify_password, PasswordStatus, Session,
};
use crate::store::{LoadOutcome, NoteStore};

/// Interactive shell state: notes directory, selected file, session
pub struct Shell {
    paths: NotesPaths,
    selected: String,
    session: Session,
}

impl Shell {
    /// Create a shell over a notes directory
    ///
    /// Ensures the directory and the default note file exist.
    pub fn new(paths: NotesPaths) -> NoteResult<Self> {
        paths.ensure_directory()?;
        let shell = Self {
            paths,
            selected: DEFAULT_NOTES_FILE.to_string(),
            session: Session::new(),
        };
        shell.current_store().ensure_exists()?;
        Ok(shell)
    }

    /// Get the name of the selected note file
    pub fn selected_file(&self) -> &str {
        &self.selected
    }

    /// Get a store bound to the selected note file
    pub fn current_store(&self) -> NoteStore {
        NoteStore::new(self.paths.note_file(&self.selected))
    }

    /// Switch to another note file, creating it if missing
    ///
    /// The session password is left untouched; it may belong to the file the
    /// user is switching to.
    pub fn switch_file(&mut self, name: &str) -> NoteResult<()> {
        self.selected = name.to_string();
        self.current_store().ensure_exists()
    }

    /// Remove a note file, switching back to the default if it was selected
    ///
    /// Password verification and confirmation happen in the dispatch layer;
    /// this only performs the removal and the fallback switch.
    pub fn remove_file(&mut self, name: &str) -> NoteResult<bool> {
        let path = self.paths.note_file(name);
        std::fs::remove_file(&path)
            .map_err(|e| NoteError::Io(format!("Failed to delete {}: {}", path.display(), e)))?;

        if self.selected == name {
            self.switch_file(DEFAULT_NOTES_FILE)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Run the command loop until exit or end of input
    pub fn run(&mut self, input: &mut impl BufRead) -> NoteResult<()> {
        println!("Welcome to the AJI note shell!");
        self.print_help();

        loop {
            print!("aji-notes({})> ", self.selected);
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            let read = input.read_line(&mut line)?;
            if read == 0 {
                break;
            }

            match parse(&line) {
                Command::Exit => break,
                cmd => self.dispatch(cmd, input),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn dispatch(&mut self, cmd: Command, input: &mut impl BufRead) {
        match cmd {
            Command::Help => self.print_help(),
            Command::Add(text) => self.cmd_add(&text),
            Command::List => self.cmd_list(),
            Command::Files => self.cmd_files(),
            Command::Delete(arg) => self.cmd_delete(&arg),
            Command::DeleteAll => self.cmd_delete_all(),
            Command::Use(name) => self.cmd_use(&name),
            Command::SetPassword(pw) => self.cmd_set_password(pw),
            Command::Unlock(pw) => self.cmd_unlock(pw),
            Command::Lock => {
                self.session.clear_password();
                println!("Session password cleared.");
            }
            Command::DeleteFile(name) => self.cmd_delete_file(&name, input),
            Command::Unknown(word) => {
                println!("Unknown command: {}. Type 'help' for the command list.", word);
            }
            Command::Empty | Command::Exit => {}
        }
    }

    fn cmd_add(&self, text: &str) {
        let note = text.trim();
        if note.is_empty() {
            println!("Please provide a note to add. Usage: add <note text>");
            return;
        }
        match self.current_store().append(note, &self.session) {
            Ok(()) => println!("Note added: {}", note),
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_list(&self) {
        match self.current_store().load(&self.session) {
            Ok(LoadOutcome::Locked) => {
                println!(
                    "File {} is encrypted. Run 'unlock' to provide the password for this session.",
                    self.selected
                );
            }
            Ok(LoadOutcome::Notes(notes)) if notes.is_empty() => println!("No notes."),
            Ok(LoadOutcome::Notes(notes)) => {
                println!("Your notes:");
                for (index, note) in notes.iter().enumerate() {
                    println!("{}: {}", index + 1, note);
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_files(&self) {
        let names = match self.paths.list_note_files() {
            Ok(names) => names,
            Err(e) => {
                println!("Failed to list files: {}", e);
                return;
            }
        };
        if names.is_empty() {
            println!("No note files found in {}", self.paths.notes_dir().display());
            return;
        }

        println!("Note files in {}:", self.paths.notes_dir().display());
        for name in names {
            let store = NoteStore::new(self.paths.note_file(&name));
            let enc_mark = match store.is_encrypted() {
                Ok(true) => "[enc]",
                _ => "     ",
            };
            let sel_mark = if name == self.selected { "*" } else { " " };
            println!("{} {} {}", sel_mark, enc_mark, name);
        }
    }

    fn cmd_delete(&self, arg: &str) {
        // Display numbers are 1-based; anything below 1 is out of range
        let index = match arg.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(index) => index,
            None => {
                println!("Please provide a valid note number. Usage: delete <number>");
                return;
            }
        };
        match self.current_store().delete_at(index, &self.session) {
            Ok(Some(note)) => println!("Deleted note: {}", note),
            Ok(None) => println!("Invalid note number."),
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_delete_all(&self) {
        // Goes through save so an encrypted file is re-sealed empty, never
        // truncated to plaintext
        match self.current_store().save(&[], &self.session) {
            Ok(()) => println!("All notes have been deleted."),
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_use(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            println!("Please provide a valid file name. Usage: use <filename>");
            return;
        }
        match self.switch_file(name) {
            Ok(()) => println!("Notes file set to: {}", name),
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_set_password(&mut self, arg: Option<String>) {
        let Some(password) = prompt_password_if_missing(arg, "New password: ") else {
            println!("No password provided.");
            return;
        };
        match set_new_password(&self.current_store(), &mut self.session, &password) {
            Ok(count) => {
                println!("Password set and {} encrypted ({} notes).", self.selected, count);
            }
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_unlock(&mut self, arg: Option<String>) {
        let Some(password) = prompt_password_if_missing(arg, "Password: ") else {
            println!("No password provided.");
            return;
        };
        match set_session_password(&self.current_store(), &mut self.session, &password) {
            Ok(PasswordStatus::Accepted) => println!("Password set for this session."),
            Ok(PasswordStatus::AcceptedWithWarning) => {
                println!("Password set for this session.");
                println!("Warning: password did not decrypt the current file.");
            }
            Err(e) => println!("{}", e),
        }
    }

    fn cmd_delete_file(&mut self, name: &str, input: &mut impl BufRead) {
        let name = name.trim();
        if name.is_empty() {
            println!("Provide a filename. Usage: delete-file <filename>");
            return;
        }

        let store = NoteStore::new(self.paths.note_file(name));
        if !store.exists() {
            println!("File not found: {}", name);
            return;
        }

        // An encrypted file demands its password before it can be removed
        match store.representation() {
            Ok(FileRepresentation::Encrypted(envelope)) => {
                let supplied = match rpassword::prompt_password("Password for file: ") {
                    Ok(pw) => pw,
                    Err(_) => {
                        println!("Failed to read password. Aborting.");
                        return;
                    }
                };
                if !verify_password(&envelope, supplied.trim()) {
                    println!("Incorrect password. Aborting delete.");
                    return;
                }
            }
            Ok(FileRepresentation::Plaintext(_)) => {}
            Err(e) => {
                println!("{}", e);
                return;
            }
        }

        print!("Delete \"{}\"? Type \"yes\" to confirm: ", name);
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if input.read_line(&mut answer).is_err() {
            println!("Aborted.");
            return;
        }
        if answer.trim().to_lowercase() != "yes" {
            println!("Aborted.");
            return;
        }

        match self.remove_file(name) {
            Ok(switched) => {
                println!("Deleted {}", name);
                if switched {
                    println!("Switched to {}", DEFAULT_NOTES_FILE);
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    fn print_help(&self) {
        println!("AJI note shell - commands:");
        println!("add <text>            Add a new note (alias: an)");
        println!("list                  List all notes (alias: ln)");
        println!("files                 List all note files (alias: lf)");
        println!("delete <number>       Delete a note by its number (alias: dn)");
        println!("delete-all            Delete all notes (alias: da)");
        println!("delete-file <file>    Delete a note file (alias: df)");
        println!("use <file>            Switch notes file, created if missing (alias: sn)");
        println!("set-password [pw]     Encrypt the current file under a new password (alias: sp)");
        println!("unlock [pw]           Provide the session password (alias: gp)");
        println!("lock                  Clear the in-memory session password");
        println!("help                  Show this help");
        println!("exit                  Leave the shell");
    }
}

/// Use the supplied password, or prompt with hidden input when absent
///
/// Returns `None` when no password could be obtained.
fn prompt_password_if_missing(arg: Option<String>, prompt: &str) -> Option<String> {
    let password = match arg {
        Some(pw) => pw,
        None => rpassword::prompt_password(prompt).ok()?,
    };
    let password = password.trim().to_string();
    if password.is_empty() {
        None
    } else {
        Some(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shell_in(dir: &TempDir) -> Shell {
        Shell::new(NotesPaths::with_notes_dir(dir.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_new_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let shell = shell_in(&dir);
        assert_eq!(shell.selected_file(), DEFAULT_NOTES_FILE);
        assert!(dir.path().join(DEFAULT_NOTES_FILE).is_file());
    }

    #[test]
    fn test_switch_file_creates_and_keeps_session() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);
        shell.session.set_password("kept");

        shell.switch_file("work").unwrap();
        assert_eq!(shell.selected_file(), "work");
        assert!(dir.path().join("work").is_file());
        assert_eq!(shell.session.password(), Some("kept"));
    }

    #[test]
    fn test_remove_selected_file_switches_to_default() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);
        shell.switch_file("scratch").unwrap();

        let switched = shell.remove_file("scratch").unwrap();
        assert!(switched);
        assert_eq!(shell.selected_file(), DEFAULT_NOTES_FILE);
        assert!(!dir.path().join("scratch").exists());
    }

    #[test]
    fn test_remove_other_file_keeps_selection() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);
        shell.switch_file("keep-me").unwrap();
        std::fs::write(dir.path().join("other"), "x\n").unwrap();

        let switched = shell.remove_file("other").unwrap();
        assert!(!switched);
        assert_eq!(shell.selected_file(), "keep-me");
    }

    #[test]
    fn test_remove_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_in(&dir);
        assert!(shell.remove_file("nope").is_err());
    }
}
