//! Notification delivery boundary
//!
//! The core only ever produces a `(title, body)` pair; how it reaches the
//! user is behind the `Notifier` trait. Delivery is fire-and-forget: at
//! most one call per non-empty payload per tick, and a failed delivery is
//! reported but never propagated.

use console::style;

use crate::core::Config;

/// A notification ready for delivery. Title and body are plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

/// Prints the notification to stdout. The default delivery channel.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        println!("{} {}", style("🔔").yellow(), style(title).bold());
        println!("   {}", body);
    }
}

/// Runs an external program (e.g. `notify-send`) with the title and body
/// appended as the final two arguments. The command string may carry its
/// own leading arguments.
pub struct CommandNotifier {
    command: String,
}

impl CommandNotifier {
    pub fn new(command: String) -> Self {
        Self { command }
    }
}

impl Notifier for CommandNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            eprintln!("{} empty notify_command, nothing delivered", style("!").yellow());
            return;
        };

        let status = std::process::Command::new(cmd)
            .args(args)
            .arg(title)
            .arg(body)
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => eprintln!(
                "{} notify command exited with {}",
                style("!").yellow(),
                status
            ),
            Err(e) => eprintln!(
                "{} failed to run notify command '{}': {}",
                style("!").yellow(),
                self.command,
                e
            ),
        }
    }
}

/// Records notifications instead of delivering them. Used by tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub sent: Vec<NotificationPayload>,
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.sent.push(NotificationPayload {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

/// Pick the delivery channel from config: an external command when one is
/// configured, the console otherwise.
pub fn from_config(config: &Config) -> Box<dyn Notifier> {
    match &config.notify_command {
        Some(command) if !command.trim().is_empty() => {
            Box::new(CommandNotifier::new(command.clone()))
        }
        _ => Box::new(ConsoleNotifier),
    }
}
