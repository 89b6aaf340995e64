//! Metadata tokens, the injected resolver boundary, and diagnostics.
//!
//! The scanner core deliberately implements no metadata parsing of its own.
//! [`token::Token`] is the symbolic reference as it appears in instruction
//! operands; [`resolver::MetadataResolver`] is the host-supplied capability
//! that turns tokens into strings, methods and fields; and
//! [`diagnostics::Diagnostics`] collects the developer-facing record of
//! everything a lenient scan had to skip.

pub mod diagnostics;
pub mod resolver;
/// Metadata tokens as they appear in instruction operands.
pub mod token;
