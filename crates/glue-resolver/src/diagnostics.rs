//! Non-fatal notices produced during a resolution pass
//!
//! The builder never reports entry failures through a global channel. Callers
//! hand it a [`DiagnosticSink`]; a `Vec<Notice>` collects notices, and
//! [`TracingSink`] forwards them to `tracing`.

use crate::symbols::ResolvedSymbol;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// What a notice points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Related {
    /// A symbol that was found in the host table
    Symbol(ResolvedSymbol),
    /// A raw manifest identifier or type name that could not be resolved
    Identifier(Arc<str>),
}

impl fmt::Display for Related {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Related::Symbol(symbol) => write!(f, "{symbol}"),
            Related::Identifier(identifier) => f.write_str(identifier),
        }
    }
}

/// One diagnostic message, tied to the symbol or identifier it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Related>,
}

impl Notice {
    pub fn note(message: impl Into<String>, related: Option<Related>) -> Self {
        Notice {
            message: message.into(),
            related,
        }
    }

    /// The related symbol, if the notice points at one
    pub fn symbol(&self) -> Option<&ResolvedSymbol> {
        match &self.related {
            Some(Related::Symbol(symbol)) => Some(symbol),
            _ => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "note: {}", self.message)?;
        if let Some(related) = &self.related {
            write!(f, " ({related})")?;
        }
        Ok(())
    }
}

/// Receiver for notices raised during a pass
pub trait DiagnosticSink {
    fn notice(&mut self, notice: Notice);
}

impl DiagnosticSink for Vec<Notice> {
    fn notice(&mut self, notice: Notice) {
        self.push(notice);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn notice(&mut self, notice: Notice) {
        (**self).notice(notice);
    }
}

/// Sink that logs every notice through `tracing` and counts them
#[derive(Debug, Default)]
pub struct TracingSink {
    count: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl DiagnosticSink for TracingSink {
    fn notice(&mut self, notice: Notice) {
        self.count += 1;
        let related = notice
            .related
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        info!(related = %related, "{}", notice.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Notice> = Vec::new();
        sink.notice(Notice::note("first", None));
        sink.notice(Notice::note("second", Some(Related::Identifier("a.B".into()))));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].message, "first");
        assert_eq!(sink[1].to_string(), "note: second (a.B)");
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn contents(&self) -> String {
            self.0
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        }
    }

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut bytes) = self.0.lock() {
                bytes.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedOutput {
        type Writer = CapturedOutput;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_tracing_sink_logs_message_and_related() {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(output.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let mut sink = TracingSink::new();
        tracing::subscriber::with_default(subscriber, || {
            sink.notice(Notice::note("first", None));
            sink.notice(Notice::note(
                "Failed to find type \"com.x.Gone\"",
                Some(Related::Identifier("com.x.Gone".into())),
            ));
        });

        assert_eq!(sink.count(), 2);
        let logged = output.contents();
        assert!(logged.contains("INFO"), "unexpected output: {logged}");
        assert!(logged.contains("first"));
        assert!(logged.contains("Failed to find type \"com.x.Gone\""));
        assert!(logged.contains("related=com.x.Gone"), "unexpected output: {logged}");
    }
}
