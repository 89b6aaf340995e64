#![doc(html_no_source)]
#![deny(missing_docs)]

//! # locscan
//!
//! A build-time scanner that locates, in compiled .NET method bodies, every
//! call site that passes a literal, translatable piece of text to a known
//! localization API — without executing the program. The recovered literals
//! become [`scanner::LocalizingRecord`]s (id, source text, comment, tooltip,
//! shortcut label) ready to be merged into a translation-memory catalog.
//!
//! ## How it works
//!
//! The pipeline is a one-way data flow:
//!
//! ```text
//! byte buffer -> instruction sequence -> matched call sites -> records
//! ```
//!
//! - [`disassembler`] turns a method body's raw bytes into a typed CIL
//!   instruction sequence (two-tier opcode table, exact operand widths).
//! - [`scanner`] walks that sequence twice: the call-site matcher recovers
//!   the literal arguments of configured localization entry points by a
//!   backward stack walk, and the extender-pattern matcher folds
//!   designer-generated property-setter calls into per-field records.
//! - Token resolution (string/method/field) is an injected capability behind
//!   [`metadata::resolver::MetadataResolver`], so the core never depends on
//!   how an assembly is actually loaded.
//!
//! The scanner is deliberately a heuristic, not a data-flow analysis: it
//! assumes localization call sites follow a small number of stereotyped
//! code-generation shapes, and skips (with a diagnostic) anything else.
//!
//! ## Quick start
//!
//! ```rust
//! use locscan::prelude::*;
//!
//! // Method body: ldstr <id>, ldstr <text>, call Catalog::GetString(2), ret
//! let body = vec![
//!     0x72, 0x01, 0x00, 0x00, 0x70, // ldstr 0x70000001
//!     0x72, 0x02, 0x00, 0x00, 0x70, // ldstr 0x70000002
//!     0x28, 0x01, 0x00, 0x00, 0x0A, // call  0x0A000001
//!     0x2A,                         // ret
//! ];
//!
//! let resolver = MapResolver::new()
//!     .with_string(0x70000001, "Form.Title")
//!     .with_string(0x70000002, "Hello")
//!     .with_method(0x0A000001, MethodDesc::new("Localization.Catalog", "GetString", 2));
//!
//! let mut ty = ScanType::new("App", "MainForm");
//! ty.methods.push(ScanMethod::regular("InitializeComponent", body));
//!
//! let scanner = Scanner::new(ScanOptions::default());
//! let records = scanner.scan(&resolver, &[ty], None);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].id.as_deref(), Some("Form.Title"));
//! assert_eq!(records[0].text.as_deref(), Some("Hello"));
//! ```
//!
//! ## Modules
//!
//! - [`prelude`] - convenient re-exports of the commonly used types
//! - [`file`] - bounds-checked cursor parser over raw bytes
//! - [`disassembler`] - CIL instruction decoding
//! - [`metadata`] - tokens, the resolver boundary, diagnostics collection
//! - [`scanner`] - matchers, record model and the scan orchestrator

#[macro_use]
mod error;

pub mod disassembler;
pub mod file;
pub mod metadata;
pub mod prelude;
pub mod scanner;

pub use error::Error;
pub use file::parser::Parser;

/// The result type used throughout locscan.
pub type Result<T> = std::result::Result<T, Error>;
