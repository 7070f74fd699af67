//! Console commands read from stdin.
//!
//! Lines are read on a dedicated thread, since blocking stdin reads would
//! otherwise hold up runtime shutdown, and forwarded over a channel.

use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::lifecycle::startup::App;

/// A recognised console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stop,
    Reload,
    Status,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let input = line.trim().to_lowercase();
        let command = match input.as_str() {
            "" => return None,
            "stop" | "end" => Command::Stop,
            "reload" => Command::Reload,
            "status" => Command::Status,
            _ => Command::Unknown(input),
        };
        Some(command)
    }
}

/// Start the stdin reader thread.
pub fn spawn_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Console input closed: {}", e);
                        break;
                    }
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!("Console unavailable: {}", e);
    }
    rx
}

/// Execute console lines until shutdown or end of input.
pub async fn run(app: Arc<App>, mut lines: mpsc::UnboundedReceiver<String>) {
    loop {
        tokio::select! {
            _ = app.shutdown.wait() => break,
            line = lines.recv() => match line {
                Some(line) => {
                    if let Some(command) = Command::parse(&line) {
                        execute(&app, command);
                    }
                }
                None => break,
            },
        }
    }
}

/// Execute a single command.
pub fn execute(app: &App, command: Command) {
    tracing::info!(command = ?command, "Command executed");
    match command {
        Command::Stop => app.shutdown.trigger(),
        Command::Reload => {
            // Failures are logged by the config handle; the old config stays live.
            let _ = app.reload();
        }
        Command::Status => app.status(),
        Command::Unknown(_) => {
            tracing::info!("Unknown command. available commands: [end/stop, reload, status]");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("stop"), Some(Command::Stop));
        assert_eq!(Command::parse("  END \n"), Some(Command::Stop));
        assert_eq!(Command::parse("Reload"), Some(Command::Reload));
        assert_eq!(Command::parse("status"), Some(Command::Status));
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse("help"), Some(Command::Unknown("help".into())));
    }
}
