use anyhow::Result;
use clap::Parser;

use aji_notes::config::NotesPaths;
use aji_notes::shell::Shell;

#[derive(Parser)]
#[command(
    name = "aji-notes",
    version,
    about = "Terminal note store with per-file password encryption",
    long_about = "aji-notes keeps plain text notes in simple files and can \
                  protect individual files with a password. Encrypted files \
                  are sealed as AES-256-CBC envelopes and unlocked with a \
                  session password for the lifetime of the shell."
)]
struct Cli {
    /// Notes directory (defaults to ~/.aji-notes)
    #[arg(long, env = "AJI_NOTES_DIR")]
    dir: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.dir {
        Some(dir) => NotesPaths::with_notes_dir(dir),
        None => NotesPaths::new()?,
    };

    let mut shell = Shell::new(paths)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    shell.run(&mut input)?;

    Ok(())
}
