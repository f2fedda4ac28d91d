//! Interactive play session over stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use log::info;

use eb_engine::{GameSession, SessionConfig};

/// Run an interactive session against the content in `dir`.
pub fn run(dir: &Path, start: &str, seed: u64) -> Result<(), String> {
    let content = super::open_store(dir)?;
    info!("loaded content from {} (seed {seed})", dir.display());
    let mut session = GameSession::open(
        content,
        SessionConfig {
            start_location: start.to_string(),
            seed,
        },
    )
    .map_err(|e| e.to_string())?;

    println!("{}", "=".repeat(60));
    println!("{}", "Welcome to Everbrook!".bold());
    println!("A small world of market squares, quiet woods and odd folk.");
    println!("Type 'help' for a list of commands.");
    println!("{}", "=".repeat(60));
    println!();
    println!("{}", session.state_view().message);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\n> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match stdin.lock().read_line(&mut line) {
            // End of input. An open conversation ends first; the next pass
            // through ends the session itself.
            Ok(0) => match session.interrupt() {
                Some(notice) => println!("{notice}"),
                None => {
                    println!("\nFarewell.");
                    break;
                }
            },
            Ok(_) => {
                let response = session.submit(line.trim_end());
                if !response.message.is_empty() {
                    println!("{}", response.message);
                }
                if response.game_over {
                    break;
                }
            }
            // An interrupted read ends only the innermost loop: the
            // conversation if one is open, never the session.
            Err(e) if e.kind() == io::ErrorKind::Interrupted => match session.interrupt() {
                Some(notice) => println!("{notice}"),
                None => println!("\nUse 'quit' to leave the game."),
            },
            Err(e) => return Err(e.to_string()),
        }
    }

    session.close();
    Ok(())
}
