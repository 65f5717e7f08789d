// src/services/diagnostics.rs
use tracing::error;

/// Operator-facing events raised while relaying a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Upstream answered, but not with a success status.
    UpstreamStatus { status: u16, body: String },
    /// Upstream could not be reached, timed out, or sent an unreadable body.
    UpstreamFailure { error: String },
}

pub trait DiagnosticSink: Send + Sync {
    fn record(&self, event: &Diagnostic);
}

/// Routes diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &Diagnostic) {
        match event {
            Diagnostic::UpstreamStatus { status, body } => {
                error!(status, body = %body, "upstream completion error");
            }
            Diagnostic::UpstreamFailure { error } => {
                error!(error = %error, "chat relay error");
            }
        }
    }
}
