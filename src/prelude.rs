//! Common re-exports for working with locscan.
//!
//! Pulls the types most scans need into one import:
//!
//! ```rust
//! use locscan::prelude::*;
//!
//! let scanner = Scanner::new(ScanOptions::default());
//! let resolver = MapResolver::new();
//! let records = scanner.scan(&resolver, &[], None);
//! assert!(records.is_empty());
//! ```

pub use crate::{
    disassembler::{decode_body, decode_instruction, Immediate, Instruction, Operand},
    metadata::{
        diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
        resolver::{FieldDesc, MapResolver, MetadataResolver, MethodDesc},
        token::Token,
    },
    scanner::{
        ArgumentOrder, EntryPoint, LocalizingRecord, MethodKind, NoLocalizableStrings, OsFlags,
        Priority, ScanMethod, ScanOptions, ScanType, Scanner, UpdateFields,
    },
    Error, Result,
};
