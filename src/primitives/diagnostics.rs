//! Diagnostic reporting collaborator.
//!
//! ## Purpose
//!
//! This module defines the seam through which human-readable diagnostics
//! leave the crate. The core has no I/O of its own; when a caller wants
//! textual error reports, it supplies a [`DiagnosticSink`] and the engine
//! hands it the numeric error code plus a rendered message.
//!
//! ## Design notes
//!
//! * **Never affects control flow**: `report` has no return value and cannot
//!   abort the caller. Errors are still returned through `Result` regardless
//!   of what the sink does.
//! * **no_std**: the trait itself is object-safe and allocation-free; only
//!   the stderr implementation requires `std`.

// ============================================================================
// DiagnosticSink
// ============================================================================

/// Receiver for textual diagnostics.
///
/// Implementations accept a nonzero error code and a free-text message.
/// Reporting is purely informational; control flow is unaffected.
pub trait DiagnosticSink {
    /// Report a diagnostic message for the given error code.
    fn report(&mut self, code: u32, message: &str);
}

/// A sink that discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl DiagnosticSink for SilentDiagnostics {
    #[inline]
    fn report(&mut self, _code: u32, _message: &str) {}
}

/// A sink that writes diagnostics to standard error.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnostics;

#[cfg(feature = "std")]
impl DiagnosticSink for StderrDiagnostics {
    fn report(&mut self, code: u32, message: &str) {
        eprintln!("natspline error {}: {}", code, message);
    }
}

/// A sink that records reports in memory, mainly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    /// Reported (code, message) pairs, in order.
    pub reports: Records,
}

#[cfg(not(feature = "std"))]
type Records = alloc::vec::Vec<(u32, alloc::string::String)>;
#[cfg(feature = "std")]
type Records = Vec<(u32, String)>;

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&mut self, code: u32, message: &str) {
        #[cfg(not(feature = "std"))]
        use alloc::string::ToString;
        self.reports.push((code, message.to_string()));
    }
}
