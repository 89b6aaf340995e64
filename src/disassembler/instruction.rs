//! Decoded CIL instruction representation and operand types.
//!
//! The central type is [`Instruction`], produced by
//! [`crate::disassembler::decode_instruction`]. Supporting enums give
//! type-safe access to operands: [`OperandType`] describes the declared shape
//! an opcode expects in the static tables, [`Immediate`] and [`Operand`] hold
//! the decoded values.

use crate::metadata::token::Token;

/// Declared operand shape of a CIL opcode.
///
/// Each opcode in the two-tier instruction tables declares exactly one shape;
/// the decoder consumes exactly the byte count that shape implies. `Switch`
/// is the single variable-length shape (a `u32` case count followed by that
/// many `i32` jump deltas).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    /// No operand present
    None,
    /// Signed 8-bit integer
    Int8,
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 16-bit integer (index into locals/arguments)
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// Metadata token reference
    Token,
    /// Variable-length switch jump table
    Switch,
}

impl OperandType {
    /// Returns the encoded size in bytes, or `None` for the variable-length
    /// `Switch` shape.
    #[must_use]
    pub const fn size(&self) -> Option<usize> {
        match self {
            OperandType::None => Some(0),
            OperandType::Int8 | OperandType::UInt8 => Some(1),
            OperandType::Int16 | OperandType::UInt16 => Some(2),
            OperandType::Int32 | OperandType::UInt32 | OperandType::Float32 | OperandType::Token => {
                Some(4)
            }
            OperandType::Int64 | OperandType::Float64 => Some(8),
            OperandType::Switch => None,
        }
    }
}

/// An immediate value embedded directly in the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immediate {
    /// Signed 8-bit immediate value
    Int8(i8),
    /// Unsigned 8-bit immediate value
    UInt8(u8),
    /// Signed 16-bit immediate value
    Int16(i16),
    /// Unsigned 16-bit immediate value
    UInt16(u16),
    /// Signed 32-bit immediate value
    Int32(i32),
    /// Unsigned 32-bit immediate value
    UInt32(u32),
    /// Signed 64-bit immediate value
    Int64(i64),
    /// 32-bit floating point immediate value
    Float32(f32),
    /// 64-bit floating point immediate value
    Float64(f64),
}

impl Immediate {
    /// Returns the value as an `i32` if it is an integral immediate that fits.
    ///
    /// Used by the matchers to read small-integer loads (`ldc.i4.s`,
    /// `ldc.i4`) such as the numeric argument of a priority setter.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Immediate::Int8(v) => Some(i32::from(*v)),
            Immediate::UInt8(v) => Some(i32::from(*v)),
            Immediate::Int16(v) => Some(i32::from(*v)),
            Immediate::UInt16(v) => Some(i32::from(*v)),
            Immediate::Int32(v) => Some(*v),
            Immediate::Int64(v) => i32::try_from(*v).ok(),
            Immediate::UInt32(_) | Immediate::Float32(_) | Immediate::Float64(_) => None,
        }
    }
}

/// A decoded instruction operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand present
    None,
    /// Immediate value (constant embedded in the instruction)
    Immediate(Immediate),
    /// Metadata token reference
    Token(Token),
    /// Switch table with signed branch deltas
    Switch(Vec<i32>),
}

impl Operand {
    /// Returns the metadata token if this operand is a token reference.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        match self {
            Operand::Token(token) => Some(*token),
            _ => None,
        }
    }
}

/// A single decoded CIL instruction.
///
/// Instructions are addressed by their byte offset within the method body;
/// `size` covers the opcode byte(s) plus the operand, so
/// `offset + size` is the offset of the next instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Byte offset of the first opcode byte within the decoded buffer
    pub offset: usize,
    /// Total encoded size in bytes (opcode + operand)
    pub size: usize,
    /// `0xFE` for two-byte opcodes, `0` otherwise
    pub prefix: u8,
    /// The opcode byte (second byte for `0xFE`-prefixed instructions)
    pub opcode: u8,
    /// Instruction mnemonic from the static tables
    pub mnemonic: &'static str,
    /// Decoded operand
    pub operand: Operand,
}

impl Instruction {
    /// Returns `true` if this is the single-byte opcode `op` (no prefix).
    #[must_use]
    pub fn is_primary(&self, op: u8) -> bool {
        self.prefix == 0 && self.opcode == op
    }

    /// Returns `true` if this instruction transfers control to another
    /// method (`call`, `callvirt` or `calli`).
    #[must_use]
    pub fn is_call_family(&self) -> bool {
        use crate::disassembler::opcodes::{CALL, CALLI, CALLVIRT};
        self.prefix == 0 && (self.opcode == CALL || self.opcode == CALLVIRT || self.opcode == CALLI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_type_sizes() {
        assert_eq!(OperandType::None.size(), Some(0));
        assert_eq!(OperandType::Int8.size(), Some(1));
        assert_eq!(OperandType::Int16.size(), Some(2));
        assert_eq!(OperandType::Int32.size(), Some(4));
        assert_eq!(OperandType::Token.size(), Some(4));
        assert_eq!(OperandType::Int64.size(), Some(8));
        assert_eq!(OperandType::Float64.size(), Some(8));
        assert_eq!(OperandType::Switch.size(), None);
    }

    #[test]
    fn immediate_as_i32() {
        assert_eq!(Immediate::Int8(-1).as_i32(), Some(-1));
        assert_eq!(Immediate::Int32(42).as_i32(), Some(42));
        assert_eq!(Immediate::Int64(i64::MAX).as_i32(), None);
        assert_eq!(Immediate::Float32(1.0).as_i32(), None);
    }

    #[test]
    fn operand_token_accessor() {
        let operand = Operand::Token(Token::new(0x70000001));
        assert_eq!(operand.token(), Some(Token::new(0x70000001)));
        assert_eq!(Operand::None.token(), None);
    }
}
