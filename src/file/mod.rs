//! Low-level byte access for method-body buffers.
//!
//! This module provides the primitives the decoder is built on: the
//! [`crate::file::io::ByteRead`] trait for bounds-checked little-endian reads
//! and the cursor-based [`crate::file::parser::Parser`].

pub mod io;
pub mod parser;

pub use parser::Parser;
