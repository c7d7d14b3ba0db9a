//! Notice rendering for the terminal

use glue_logger as logger;
use glue_resolver::{DiagnosticSink, Notice};

/// Prints every notice through the logger and counts them
#[derive(Debug, Default)]
pub struct ConsoleSink {
    count: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl DiagnosticSink for ConsoleSink {
    fn notice(&mut self, notice: Notice) {
        self.count += 1;
        let message = match &notice.related {
            Some(related) => format!("{}\n  --> {}", notice.message, related),
            None => notice.message,
        };
        logger::note(&message);
    }
}
