//! Diagnostics collection for lenient scanning.
//!
//! A scan is best-effort by design: malformed method bodies, unresolvable
//! tokens and call sites that do not follow the stereotyped shapes are all
//! expected, and none of them should abort the scan. Instead, every such
//! event is recorded here as a developer diagnostic. The host decides what
//! to do with them — a CLI front end might turn "N unparsed call sites" into
//! a user-visible warning, the core never does.
//!
//! The container is backed by `boxcar::Vec`, a lock-free append-only vector,
//! so diagnostics can be recorded through a shared reference without any
//! synchronization in the single-pass scan loop.
//!
//! # Usage
//!
//! ```rust
//! use locscan::metadata::diagnostics::{Diagnostics, DiagnosticCategory};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.warning(
//!     DiagnosticCategory::CallSite,
//!     "App.MainForm::InitializeComponent: non-literal id argument, call site skipped",
//! );
//!
//! assert_eq!(diagnostics.warning_count(), 1);
//! for entry in diagnostics.iter() {
//!     println!("[{}] {}: {}", entry.severity, entry.category, entry.message);
//! }
//! ```

use std::fmt;

use strum::Display;

/// Severity level of a diagnostic entry.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    Info,

    /// A call site or accumulator entry was skipped; the scan result is
    /// merely incomplete, not wrong.
    Warning,

    /// A whole method could not be scanned (malformed instruction stream or
    /// a metadata failure while inspecting the method itself).
    Error,
}

/// Which stage of the scan produced the diagnostic.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Instruction decoding of a method body.
    Decode,
    /// Call-site matching and argument reconstruction.
    CallSite,
    /// Extender-pattern matching.
    Extender,
    /// Metadata token resolution.
    Resolution,
    /// Type/method enumeration and finalization.
    Scan,
}

/// A single diagnostic entry.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How severe the event was.
    pub severity: DiagnosticSeverity,
    /// Which scan stage reported it.
    pub category: DiagnosticCategory,
    /// Human-readable description, including the affected type/method scope.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)
    }
}

/// Append-only container for scan diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Diagnostics {
            entries: boxcar::Vec::new(),
        }
    }

    /// Records an informational entry.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Info, category, message);
    }

    /// Records a warning entry.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Warning, category, message);
    }

    /// Records an error entry.
    pub fn error(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Error, category, message);
    }

    fn push(
        &self,
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            category,
            message: message.into(),
        });
    }

    /// Iterates over all recorded entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.count()
    }

    /// Returns `true` if no diagnostics were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of error-severity entries.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.iter()
            .filter(|entry| entry.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Number of warning-severity entries.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.iter()
            .filter(|entry| entry.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Returns `true` if any error-severity entry was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
