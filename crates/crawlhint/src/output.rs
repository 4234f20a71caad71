//! Colored terminal output utilities.

use console::{Style, Term};
use crawlhint_notify::{NotifyError, Submission};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a stage header (cyan bold), preceded by a blank line.
    pub(crate) fn section(&self, title: &str) {
        let _ = self.term.write_line("");
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(format!("[{title}]")).to_string());
    }

    /// Print one line per HTTP call.
    pub(crate) fn submission(&self, submission: &Submission) {
        match &submission.result {
            Ok(status) => self.success(&format!("  OK  {} ({status})", submission.target)),
            Err(NotifyError::HttpResponse { status, body }) => {
                self.error(&format!("  ERR {} ({status}: {body})", submission.target));
            }
            Err(err) => self.error(&format!("  ERR {} ({err})", submission.target)),
        }
    }
}
