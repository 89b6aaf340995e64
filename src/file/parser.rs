//! Cursor-based byte stream parser for CIL method bodies.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a
//! bounds-checked cursor over a byte slice. It is the single access path the
//! instruction decoder uses to consume method-body bytes, which is what keeps
//! the decoder's central invariant cheap to uphold: the position advances
//! monotonically and every read is validated against the buffer length, so a
//! well-formed buffer can never be under- or over-read.
//!
//! # Usage
//!
//! ```rust
//! use locscan::Parser;
//!
//! let data = [0x01, 0x02, 0x03, 0x04];
//! let mut parser = Parser::new(&data);
//!
//! let value = parser.read_le::<u16>()?;
//! assert_eq!(value, 0x0201);
//! assert_eq!(parser.pos(), 2);
//! # Ok::<(), locscan::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, ByteRead},
    Result,
};

/// A bounds-checked cursor over a byte slice.
///
/// The parser maintains an internal position and refuses any operation that
/// would move it past the end of the data. Decoding the same buffer with two
/// fresh parsers yields identical results; the parser holds no state beyond
/// the position.
///
/// # Examples
///
/// ```rust
/// use locscan::Parser;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut parser = Parser::new(&data);
///
/// let first = parser.read_le::<u32>()?;
/// assert_eq!(first, 0x04030201);
///
/// parser.seek(6)?;
/// let last = parser.read_le::<u16>()?;
/// assert_eq!(last, 0x0807);
/// # Ok::<(), locscan::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locscan::Parser;
    /// let data = [0x01];
    /// let mut parser = Parser::new(&data);
    /// assert!(parser.has_more_data());
    ///
    /// let _ = parser.read_le::<u8>()?;
    /// assert!(!parser.has_more_data());
    /// # Ok::<(), locscan::Error>(())
    /// ```
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the position is beyond the
    /// data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(crate::Error::OutOfBounds);
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by `step` would
    /// exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if self.position + step > self.data.len() {
            return Err(crate::Error::OutOfBounds);
        }

        self.position += step;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the position is at or beyond
    /// the data length.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(crate::Error::OutOfBounds);
        }
        Ok(self.data[self.position])
    }

    /// Read a value of type `T` in little-endian format, advancing the
    /// position by the value's width.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the
    /// data length. The position is unchanged on failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locscan::Parser;
    /// let data = [0x2A, 0x00, 0x00, 0x00];
    /// let mut parser = Parser::new(&data);
    /// assert_eq!(parser.read_le::<i32>()?, 42);
    /// # Ok::<(), locscan::Error>(())
    /// ```
    pub fn read_le<T: ByteRead>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.read_le::<u8>().unwrap(), 0x01);
        assert_eq!(parser.read_le::<u16>().unwrap(), 0x0302);
        assert_eq!(parser.pos(), 3);
        assert!(parser.has_more_data());
    }

    #[test]
    fn seek_and_peek() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);

        parser.seek(2).unwrap();
        assert_eq!(parser.peek_byte().unwrap(), 0x03);
        assert_eq!(parser.pos(), 2, "peek must not advance");
    }

    #[test]
    fn seek_out_of_bounds() {
        let data = [0x01, 0x02];
        let mut parser = Parser::new(&data);
        assert!(parser.seek(2).is_err());
    }

    #[test]
    fn read_past_end_fails_without_advancing() {
        let data = [0x01, 0x02];
        let mut parser = Parser::new(&data);
        assert!(parser.read_le::<u32>().is_err());
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn advance_by_bounds() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);
        parser.advance_by(3).unwrap();
        assert!(!parser.has_more_data());
        assert!(parser.advance_by(1).is_err());
    }

    #[test]
    fn empty_buffer() {
        let parser = Parser::new(&[]);
        assert!(parser.is_empty());
        assert!(!parser.has_more_data());
        assert!(parser.peek_byte().is_err());
    }
}
