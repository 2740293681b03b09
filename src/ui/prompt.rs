//! Confirmation for destructive actions (delete one, delete all, reset).

use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};

pub trait Prompt {
    /// Ask a yes/no question; anything but an explicit yes is a no.
    fn confirm(&self, message: &str) -> bool;
}

/// Interactive `[y/N]` prompt on stdin.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        warning(message);
        print!("Confirm [y/N]: ");
        let _ = io::stdout().flush();

        let mut s = String::new();
        if io::stdin().lock().read_line(&mut s).is_ok() {
            is_yes(&s)
        } else {
            false
        }
    }
}

/// Fixed answer, for `--yes` and for tests.
pub struct AutoAnswer(pub bool);

impl Prompt for AutoAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}
