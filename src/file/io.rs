//! Bounds-checked primitive reads from byte slices.
//!
//! CIL operands are always little-endian (ECMA-335 II.24.1). The
//! [`ByteRead`] trait gives the [`crate::file::parser::Parser`] one generic
//! `read_le` entry point for every primitive width the instruction set uses.

use crate::Result;

/// Types that can be read from a little-endian byte slice of fixed width.
///
/// Implemented for the primitive integer and floating point types that occur
/// as CIL instruction operands.
pub trait ByteRead: Sized {
    /// Size of the encoded value in bytes.
    const SIZE: usize;

    /// Decode a value from the start of `data`.
    ///
    /// Callers guarantee `data.len() >= Self::SIZE`.
    fn from_le_slice(data: &[u8]) -> Self;
}

macro_rules! impl_byte_read {
    ($($ty:ty),*) => {
        $(
            impl ByteRead for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_le_slice(data: &[u8]) -> Self {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    bytes.copy_from_slice(&data[..std::mem::size_of::<$ty>()]);
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_byte_read!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Read a `T` at `*pos` in `data`, advancing `*pos` by the value's width.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `T::SIZE` bytes remain.
pub fn read_le_at<T: ByteRead>(data: &[u8], pos: &mut usize) -> Result<T> {
    let end = pos
        .checked_add(T::SIZE)
        .ok_or(crate::Error::OutOfBounds)?;
    if end > data.len() {
        return Err(crate::Error::OutOfBounds);
    }

    let value = T::from_le_slice(&data[*pos..end]);
    *pos = end;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_le_at_advances_position() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut pos = 0;

        let value: u16 = read_le_at(&data, &mut pos).unwrap();
        assert_eq!(value, 0x0201);
        assert_eq!(pos, 2);

        let value: u16 = read_le_at(&data, &mut pos).unwrap();
        assert_eq!(value, 0x0403);
        assert_eq!(pos, 4);
    }

    #[test]
    fn read_le_at_signed() {
        let data = [0xFF];
        let mut pos = 0;
        let value: i8 = read_le_at(&data, &mut pos).unwrap();
        assert_eq!(value, -1);
    }

    #[test]
    fn read_le_at_out_of_bounds() {
        let data = [0x01, 0x02];
        let mut pos = 1;
        let result: Result<u32> = read_le_at(&data, &mut pos);
        assert!(result.is_err());
        assert_eq!(pos, 1, "position must not advance on failure");
    }

    #[test]
    fn read_le_at_float() {
        let data = 1.5f64.to_le_bytes();
        let mut pos = 0;
        let value: f64 = read_le_at(&data, &mut pos).unwrap();
        assert_eq!(value, 1.5);
    }
}
