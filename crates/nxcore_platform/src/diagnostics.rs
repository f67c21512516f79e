//! Diagnostics for degraded or rejected calls
//!
//! Backends never fail an unsupported call; they return a fixed default and
//! report a [`Diagnostic`] to the injected [`DiagnosticSink`].

use std::fmt;

/// A warning-level event raised by a backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic<'a> {
    /// The operation is not available on this device and was ignored
    Unsupported {
        /// Name of the ignored operation
        operation: &'static str,
    },
    /// A URL was rejected before being handed to the system
    SuspiciousUrl {
        /// The rejected URL
        url: &'a str,
    },
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unsupported { operation } => {
                write!(f, "{operation}() not supported on this platform")
            }
            Diagnostic::SuspiciousUrl { url } => {
                write!(f, "provided URL could be potentially malicious: {url}")
            }
        }
    }
}

/// Receiver for backend diagnostics
pub trait DiagnosticSink: Send + Sync {
    /// Deliver one diagnostic
    fn report(&self, diagnostic: &Diagnostic<'_>);
}

/// Default sink: forwards every diagnostic as a `warn!` event
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::Unsupported { operation } => {
                tracing::warn!(operation, "operation not supported on this platform");
            }
            Diagnostic::SuspiciousUrl { url } => {
                tracing::warn!(url, "rejected potentially malicious URL");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_operation() {
        let d = Diagnostic::Unsupported {
            operation: "toggle_fullscreen",
        };
        assert_eq!(
            d.to_string(),
            "toggle_fullscreen() not supported on this platform"
        );
    }

    #[test]
    fn test_display_flags_url() {
        let d = Diagnostic::SuspiciousUrl { url: "http://x'.com" };
        assert_eq!(
            d.to_string(),
            "provided URL could be potentially malicious: http://x'.com"
        );
    }
}
