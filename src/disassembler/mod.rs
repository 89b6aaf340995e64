//! CIL instruction decoding engine.
//!
//! Turns a method body's raw byte buffer into an ordered, restartable
//! sequence of typed instructions. The decoder knows nothing about call
//! targets or metadata resolution; it only applies the two-tier opcode
//! tables and their declared operand shapes.
//!
//! # Key Types
//! - [`Instruction`] - a decoded CIL instruction
//! - [`Operand`] / [`Immediate`] - decoded operand values
//! - [`OperandType`] - declared operand shapes in the static tables
//!
//! # Main Functions
//! - [`decode_instruction`] - decode a single instruction
//! - [`decode_stream`] / [`decode_body`] - decode a whole buffer
//! - [`InstructionIter`] - lazy iteration over a buffer

mod decoder;
mod instruction;
mod instructions;
pub mod opcodes;

pub use decoder::{decode_body, decode_instruction, decode_stream, InstructionIter};
pub use instruction::{Immediate, Instruction, Operand, OperandType};
pub use instructions::{OpSpec, INSTRUCTIONS, INSTRUCTIONS_FE};
