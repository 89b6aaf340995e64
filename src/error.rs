use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type covering every failure this library can return.
///
/// Most errors here are developer diagnostics in disguise: a malformed method
/// body or an unresolvable token aborts the scan of a single method, never the
/// whole scan. The orchestrator catches these, records them in
/// [`crate::metadata::diagnostics::Diagnostics`], and moves on.
///
/// # Examples
///
/// ```rust
/// use locscan::{Error, Parser};
/// use locscan::disassembler::decode_instruction;
///
/// let mut parser = Parser::new(&[0xFF]); // reserved opcode
/// match decode_instruction(&mut parser) {
///     Err(Error::Malformed { message, .. }) => {
///         eprintln!("bad method body: {message}");
///     }
///     other => panic!("expected a malformed-stream error, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The instruction stream or another input buffer is damaged.
    ///
    /// Includes the source location where the malformation was detected,
    /// since "invalid opcode" alone is rarely enough to debug a scan.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while reading a buffer.
    ///
    /// Operand decoding consumes exactly the byte count the opcode declares;
    /// if the buffer ends mid-operand this error is raised rather than
    /// advancing with a guessed offset.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Provided input was empty where actual method-body bytes were expected.
    #[error("Provided input was empty")]
    Empty,

    /// A metadata token could not be resolved to a string, method or field.
    ///
    /// Whether this aborts anything depends on context: failing to resolve a
    /// call the matcher was merely probing is silently ignored, failing to
    /// resolve the literal of a matched entry point skips that call site.
    #[error("Failed to resolve metadata token - {0}")]
    UnresolvedToken(Token),
}
