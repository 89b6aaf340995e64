//! Localizable-string scanning over decoded method bodies.
//!
//! The module splits into a host-supplied input model, two matchers and an
//! orchestrator:
//!
//! - [`model`] - [`ScanType`]/[`ScanMethod`] trees the host builds from its
//!   assembly loader, including the suppression attribute
//! - [`entrypoints`] - which localization APIs the call-site matcher looks
//!   for, and the semantic order of their arguments
//! - [`record`] - the [`LocalizingRecord`] output model with priorities and
//!   update-field bits
//! - [`callsite`] / [`extender`] (internal) - the two matching passes
//! - [`orchestrator`] - [`Scanner`], which ties filtering, decoding, both
//!   matchers and finalization together
//!
//! # Usage
//!
//! ```rust
//! use locscan::prelude::*;
//!
//! let body = vec![
//!     0x72, 0x01, 0x00, 0x00, 0x70, // ldstr "Form.Title"
//!     0x72, 0x02, 0x00, 0x00, 0x70, // ldstr "Hello"
//!     0x28, 0x01, 0x00, 0x00, 0x0A, // call GetString(id, text)
//!     0x2A,                         // ret
//! ];
//! let resolver = MapResolver::new()
//!     .with_string(0x70000001, "Form.Title")
//!     .with_string(0x70000002, "Hello")
//!     .with_method(0x0A000001, MethodDesc::new("Localization.Catalog", "GetString", 2));
//!
//! let mut ty = ScanType::new("App", "MainForm");
//! ty.methods.push(ScanMethod::regular("InitializeComponent", body));
//!
//! let records = Scanner::new(ScanOptions::default()).scan(&resolver, &[ty], None);
//! assert_eq!(records.len(), 1);
//! ```

mod callsite;
mod extender;

pub mod entrypoints;
pub mod model;
pub mod orchestrator;
pub mod record;

pub use entrypoints::{default_entry_points, ArgumentOrder, EntryPoint};
pub use extender::{INLINE_PREFIX, INLINE_SEPARATOR};
pub use model::{MethodKind, NoLocalizableStrings, OsFlags, ScanMethod, ScanType};
pub use orchestrator::{ScanOptions, Scanner};
pub use record::{
    LocalizingRecord, Priority, RecordKey, UpdateFields, DISCARD_MEMBER, SELF_MEMBER,
};
