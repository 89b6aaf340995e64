//! Byte constants for the CIL opcodes the scanner inspects (ECMA-335).
//!
//! Only the opcodes the matchers pattern-match on are named here; the full
//! two-tier instruction set lives in the decode tables of
//! [`crate::disassembler::instructions`]. Single-byte opcodes carry their
//! mnemonic name; the shared escape byte for the secondary table is
//! [`FE_PREFIX`].

/// Escape byte selecting the secondary opcode table.
pub const FE_PREFIX: u8 = 0xFE;

/// `ldarg.0` - load the `this` reference (in instance methods).
pub const LDARG_0: u8 = 0x02;

/// `ldnull` - push a null reference.
pub const LDNULL: u8 = 0x14;

/// `ldc.i4.m1` - push the constant -1.
pub const LDC_I4_M1: u8 = 0x15;
/// `ldc.i4.0` - push the constant 0; `ldc.i4.1` .. `ldc.i4.8` follow
/// contiguously, so `opcode - LDC_I4_0` recovers the constant.
pub const LDC_I4_0: u8 = 0x16;
/// `ldc.i4.8` - push the constant 8 (last of the shorthand loaders).
pub const LDC_I4_8: u8 = 0x1E;
/// `ldc.i4.s` - push a signed 8-bit constant.
pub const LDC_I4_S: u8 = 0x1F;
/// `ldc.i4` - push a signed 32-bit constant.
pub const LDC_I4: u8 = 0x20;

/// `call` - call a method given by a metadata token.
pub const CALL: u8 = 0x28;
/// `calli` - indirect call through a signature token.
pub const CALLI: u8 = 0x29;
/// `callvirt` - virtual call given by a metadata token.
pub const CALLVIRT: u8 = 0x6F;

/// `ldstr` - load a string literal from the user-string heap.
pub const LDSTR: u8 = 0x72;
/// `newobj` - allocate and construct an object.
pub const NEWOBJ: u8 = 0x73;

/// `ldfld` - load an instance field.
pub const LDFLD: u8 = 0x7B;
/// `ldsfld` - load a static field.
pub const LDSFLD: u8 = 0x7E;
