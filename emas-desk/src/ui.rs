//! Operator feedback: toasts and blocking confirmations

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Destructive,
}

/// Transient notification shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Success,
            title: "Berhasil!".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            title: "Error!".to_string(),
            description: description.into(),
        }
    }
}

/// UI seam used by the print flows
pub trait OperatorUi: Send + Sync {
    fn toast(&self, toast: Toast);

    /// Blocking yes/no question
    fn confirm(&self, message: &str) -> bool;
}

/// Terminal implementation
#[derive(Debug, Clone, Default)]
pub struct ConsoleUi {
    auto_confirm: bool,
}

impl ConsoleUi {
    pub fn new(auto_confirm: bool) -> Self {
        Self { auto_confirm }
    }
}

impl OperatorUi for ConsoleUi {
    fn toast(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Success => info!(title = %toast.title, "{}", toast.description),
            ToastVariant::Destructive => warn!(title = %toast.title, "{}", toast.description),
        }
        println!("{} {}", toast.title, toast.description);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.auto_confirm {
            println!("{} [y/N] y", message);
            return true;
        }

        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "ya")
}
