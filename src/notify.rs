#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Fire-and-forget message sink for the user (toasts in the UI).
pub trait Notifier {
    fn notify(&self, severity: Severity, text: &str);

    fn success(&self, text: &str) {
        self.notify(Severity::Success, text)
    }

    fn error(&self, text: &str) {
        self.notify(Severity::Error, text)
    }
}
