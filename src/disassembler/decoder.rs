//! CIL instruction decoding.
//!
//! This module turns a method body's raw byte buffer into an ordered sequence
//! of typed [`Instruction`]s. It has no knowledge of call targets or
//! metadata; it is pure byte-level parsing over the static opcode tables.
//!
//! Decoding is deterministic and restartable: decoding the same buffer twice
//! yields identical sequences, and for a well-formed buffer the final cursor
//! position equals the buffer length. A malformed stream (reserved opcode,
//! truncated operand) is a fatal error for that buffer — the decoder never
//! advances with a guessed offset.
//!
//! # Example: Decoding a Single Instruction
//!
//! ```rust
//! use locscan::{Parser, disassembler::decode_instruction};
//! let code = [0x2A]; // ret
//! let mut parser = Parser::new(&code);
//! let instr = decode_instruction(&mut parser)?;
//! assert_eq!(instr.mnemonic, "ret");
//! # Ok::<(), locscan::Error>(())
//! ```
//!
//! # Example: Decoding a Stream of Instructions
//!
//! ```rust
//! use locscan::{Parser, disassembler::decode_stream};
//! let code = [0x00, 0x2A]; // nop, ret
//! let mut parser = Parser::new(&code);
//! let instrs = decode_stream(&mut parser)?;
//! assert_eq!(instrs.len(), 2);
//! # Ok::<(), locscan::Error>(())
//! ```

use crate::{
    disassembler::{
        instruction::{Immediate, Instruction, Operand, OperandType},
        instructions::{INSTRUCTIONS, INSTRUCTIONS_FE},
        opcodes::FE_PREFIX,
    },
    file::parser::Parser,
    Result,
};

/// Decodes a single CIL instruction from the current parser position.
///
/// Handles both single-byte and `0xFE`-prefixed opcodes, consuming exactly
/// the operand byte count the opcode's table entry declares. The `switch`
/// operand is variable-length: a `u32` case count followed by that many
/// signed 32-bit jump deltas, returned as one array-valued operand.
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] for reserved or unknown opcodes, and
/// [`crate::Error::OutOfBounds`] when the buffer ends mid-operand. In both
/// cases the stream is unusable from this point on; callers abort the
/// enclosing method body.
///
/// # Examples
///
/// ```rust
/// use locscan::{Parser, disassembler::{decode_instruction, Operand}};
///
/// // ldstr followed by a user-string token
/// let code = [0x72, 0x01, 0x00, 0x00, 0x70];
/// let mut parser = Parser::new(&code);
///
/// let instruction = decode_instruction(&mut parser)?;
/// assert_eq!(instruction.mnemonic, "ldstr");
/// assert_eq!(instruction.size, 5);
/// if let Operand::Token(token) = &instruction.operand {
///     assert_eq!(token.value(), 0x70000001);
/// }
/// # Ok::<(), locscan::Error>(())
/// ```
pub fn decode_instruction(parser: &mut Parser) -> Result<Instruction> {
    let offset = parser.pos();
    let first_byte = parser.read_le::<u8>()?;

    let (spec, prefix, opcode) = match first_byte {
        FE_PREFIX => {
            let second_byte = parser.read_le::<u8>()?;

            match INSTRUCTIONS_FE.get(second_byte as usize) {
                Some(spec) => (spec, FE_PREFIX, second_byte),
                None => {
                    return Err(malformed_error!("Invalid opcode: FE {:02X}", second_byte));
                }
            }
        }
        _ => match INSTRUCTIONS.get(first_byte as usize) {
            Some(spec) => (spec, 0, first_byte),
            None => return Err(malformed_error!("Invalid opcode: {:02X}", first_byte)),
        },
    };

    if spec.mnemonic.is_empty() {
        return Err(malformed_error!(
            "Reserved opcode: {:02X} {:02X}",
            prefix,
            opcode
        ));
    }

    let operand = match spec.operand {
        OperandType::None => Operand::None,
        OperandType::Int8 => Operand::Immediate(Immediate::Int8(parser.read_le::<i8>()?)),
        OperandType::UInt8 => Operand::Immediate(Immediate::UInt8(parser.read_le::<u8>()?)),
        OperandType::Int16 => Operand::Immediate(Immediate::Int16(parser.read_le::<i16>()?)),
        OperandType::UInt16 => Operand::Immediate(Immediate::UInt16(parser.read_le::<u16>()?)),
        OperandType::Int32 => Operand::Immediate(Immediate::Int32(parser.read_le::<i32>()?)),
        OperandType::UInt32 => Operand::Immediate(Immediate::UInt32(parser.read_le::<u32>()?)),
        OperandType::Int64 => Operand::Immediate(Immediate::Int64(parser.read_le::<i64>()?)),
        OperandType::Float32 => Operand::Immediate(Immediate::Float32(parser.read_le::<f32>()?)),
        OperandType::Float64 => Operand::Immediate(Immediate::Float64(parser.read_le::<f64>()?)),
        OperandType::Token => Operand::Token(crate::metadata::token::Token::new(
            parser.read_le::<u32>()?,
        )),
        OperandType::Switch => {
            let case_count = parser.read_le::<u32>()?;

            let mut targets = Vec::with_capacity(case_count as usize);
            for _ in 0..case_count {
                targets.push(parser.read_le::<i32>()?);
            }

            Operand::Switch(targets)
        }
    };

    Ok(Instruction {
        offset,
        size: parser.pos() - offset,
        prefix,
        opcode,
        mnemonic: spec.mnemonic,
        operand,
    })
}

/// Decodes a continuous stream of CIL instructions until the buffer ends.
///
/// # Errors
///
/// Propagates the first decode failure; on error the already-decoded prefix
/// of the stream is discarded, since any recovery offset would be a guess.
pub fn decode_stream(parser: &mut Parser) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();

    while parser.has_more_data() {
        instructions.push(decode_instruction(parser)?);
    }

    Ok(instructions)
}

/// Decodes a whole method body buffer into an instruction sequence.
///
/// Convenience wrapper over [`decode_stream`] for callers that hold the raw
/// bytes rather than a positioned [`Parser`].
///
/// # Errors
///
/// Returns [`crate::Error::Empty`] for an empty buffer, otherwise the same
/// failures as [`decode_stream`].
pub fn decode_body(data: &[u8]) -> Result<Vec<Instruction>> {
    if data.is_empty() {
        return Err(crate::Error::Empty);
    }

    let mut parser = Parser::new(data);
    decode_stream(&mut parser)
}

/// Lazy iterator over the instructions of a byte buffer.
///
/// Yields `Result<Instruction>`; after the first decode failure the iterator
/// fuses, because subsequent offsets would be meaningless. Creating a new
/// iterator over the same buffer restarts decoding from the beginning.
///
/// # Examples
///
/// ```rust
/// use locscan::disassembler::InstructionIter;
///
/// let code = [0x00, 0x14, 0x2A]; // nop, ldnull, ret
/// let mnemonics: Vec<_> = InstructionIter::new(&code)
///     .map(|r| r.map(|i| i.mnemonic))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(mnemonics, ["nop", "ldnull", "ret"]);
/// # Ok::<(), locscan::Error>(())
/// ```
pub struct InstructionIter<'a> {
    parser: Parser<'a>,
    failed: bool,
}

impl<'a> InstructionIter<'a> {
    /// Create an iterator positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        InstructionIter {
            parser: Parser::new(data),
            failed: false,
        }
    }
}

impl Iterator for InstructionIter<'_> {
    type Item = Result<Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.parser.has_more_data() {
            return None;
        }

        let result = decode_instruction(&mut self.parser);
        if result.is_err() {
            self.failed = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::Immediate;

    #[test]
    fn decode_instruction_basic() {
        // ldloc.s 0x10
        let mut parser = Parser::new(&[0x11, 0x10]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.offset, 0);
        assert_eq!(result.size, 2);
        assert_eq!(result.opcode, 0x11);
        assert_eq!(result.prefix, 0);
        assert_eq!(result.mnemonic, "ldloc.s");
        match &result.operand {
            Operand::Immediate(Immediate::Int8(val)) => assert_eq!(*val, 0x10),
            _ => panic!("Expected Operand::Immediate(Immediate::Int8)"),
        }
    }

    #[test]
    fn decode_instruction_two_byte() {
        // ceq (0xFE, 0x01)
        let mut parser = Parser::new(&[0xFE, 0x01]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.opcode, 0x01);
        assert_eq!(result.prefix, 0xFE);
        assert_eq!(result.mnemonic, "ceq");
        assert_eq!(result.size, 2);
    }

    #[test]
    fn decode_instruction_int16_operand() {
        // ldarg -1 (0xFE 0x09)
        let mut parser = Parser::new(&[0xFE, 0x09, 0xFF, 0xFF]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.mnemonic, "ldarg");
        match &result.operand {
            Operand::Immediate(Immediate::Int16(val)) => assert_eq!(*val, -1),
            _ => panic!("Expected Operand::Immediate(Immediate::Int16)"),
        }
    }

    #[test]
    fn decode_instruction_token() {
        // ldtoken 0x02000001
        let mut parser = Parser::new(&[0xD0, 0x01, 0x00, 0x00, 0x02]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.mnemonic, "ldtoken");
        match &result.operand {
            Operand::Token(token) => assert_eq!(token.value(), 0x02000001),
            _ => panic!("Expected Operand::Token"),
        }
    }

    #[test]
    fn decode_instruction_switch() {
        let mut parser = Parser::new(&[
            0x45, 0x02, 0x00, 0x00, 0x00, // switch, 2 cases
            0x0A, 0x00, 0x00, 0x00, // case 0: +10
            0xEC, 0xFF, 0xFF, 0xFF, // case 1: -20
        ]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.mnemonic, "switch");
        assert_eq!(result.size, 13);
        match &result.operand {
            Operand::Switch(targets) => assert_eq!(targets, &[10, -20]),
            _ => panic!("Expected Operand::Switch"),
        }
    }

    #[test]
    fn decode_instruction_i8_constant() {
        let mut parser = Parser::new(&[0x21, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);

        let result = decode_instruction(&mut parser).unwrap();

        assert_eq!(result.mnemonic, "ldc.i8");
        match &result.operand {
            Operand::Immediate(Immediate::Int64(val)) => assert_eq!(*val, -1),
            _ => panic!("Expected Operand::Immediate(Immediate::Int64)"),
        }
    }

    #[test]
    fn decode_instruction_invalid_opcode() {
        let mut parser = Parser::new(&[0xFF, 0xFF]);
        assert!(decode_instruction(&mut parser).is_err());
    }

    #[test]
    fn decode_invalid_fe_instruction() {
        let mut parser = Parser::new(&[0xFE, 0xFF]);
        assert!(decode_instruction(&mut parser).is_err());
    }

    #[test]
    fn decode_truncated_operand() {
        // ldc.i4 with only 2 of 4 operand bytes
        let mut parser = Parser::new(&[0x20, 0x01, 0x02]);
        assert!(decode_instruction(&mut parser).is_err());
    }

    #[test]
    fn decode_stream_consumes_whole_buffer() {
        let code = [
            0x00, // nop
            0x72, 0x01, 0x00, 0x00, 0x70, // ldstr
            0x28, 0x01, 0x00, 0x00, 0x0A, // call
            0x2A, // ret
        ];

        let mut parser = Parser::new(&code);
        let result = decode_stream(&mut parser).unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(parser.pos(), code.len());
        assert_eq!(result[1].offset, 1);
        assert_eq!(result[2].offset, 6);
    }

    #[test]
    fn decode_stream_deterministic() {
        let code = [0x00, 0x16, 0x11, 0x05, 0x2A]; // nop, ldc.i4.0, ldloc.s 5, ret

        let first = decode_body(&code).unwrap();
        let second = decode_body(&code).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn decode_body_empty() {
        assert!(matches!(decode_body(&[]), Err(crate::Error::Empty)));
    }

    #[test]
    fn iter_fuses_after_error() {
        let code = [0x00, 0xFF, 0x2A]; // nop, reserved, ret

        let mut iter = InstructionIter::new(&code);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none(), "iterator must fuse after a failure");
    }

    #[test]
    fn iter_restartable() {
        let code = [0x00, 0x2A];

        let first: Vec<_> = InstructionIter::new(&code).collect::<Result<_>>().unwrap();
        let second: Vec<_> = InstructionIter::new(&code).collect::<Result<_>>().unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
