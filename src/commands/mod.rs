pub mod audit;
pub mod build;
pub mod check;
pub mod index;
pub mod list;
pub mod reconcile;
pub mod resolve;
pub mod status;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    /// Record `text` as an issue under `--strict`, as a detail otherwise.
    pub fn finding(&mut self, strict: bool, text: impl Into<String>) {
        if strict {
            self.issue(text);
        } else {
            self.detail(text);
        }
    }
}
