//! Reporting seam between the workflow and whatever presents it.

/// Kind of a progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A workflow step is starting.
    Step,
    Success,
    Error,
    /// Advice, recovery attempts, and raw git output.
    Info,
}

/// Receives human-readable progress from a sync run.
pub trait Reporter {
    fn report(&mut self, category: Category, message: &str);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _category: Category, _message: &str) {}
}

/// Keeps every message in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub messages: Vec<(Category, String)>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of one category, in emission order.
    pub fn of(&self, category: Category) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// True if any message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.messages.iter().any(|(_, m)| m.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, category: Category, message: &str) {
        self.messages.push((category, message.to_owned()));
    }
}
