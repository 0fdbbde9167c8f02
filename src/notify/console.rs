use std::io::{self, BufRead, Write};

use super::{Notifier, PromptResponse};

/// Terminal rendition: toasts on stdout/stderr, the banner as an
/// `[u]pdate / [i]gnore` prompt on stdin. Anything unreadable or
/// unrecognized counts as ignore.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn success(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn prompt_update(&self, plugin_name: &str) -> PromptResponse {
        print!("update available for {plugin_name}. [u]pdate / [i]gnore? ");
        if io::stdout().flush().is_err() {
            return PromptResponse::Dismissed;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return PromptResponse::Dismissed;
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "u" | "update" | "y" | "yes" => PromptResponse::Accepted,
            _ => PromptResponse::Dismissed,
        }
    }
}
