use colored::Colorize;
use dialoguer::Input;
use tracing::warn;

/// Blocking user notification. Returns once the user has acknowledged it.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Prints the alert on stderr and waits for Enter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("\n{} {}", "!".red().bold(), message.red().bold());

        let ack = Input::<String>::new()
            .with_prompt("Press Enter to continue")
            .allow_empty(true)
            .report(false)
            .interact_text();

        if let Err(e) = ack {
            warn!("Could not wait for alert acknowledgement: {}", e);
        }
    }
}
