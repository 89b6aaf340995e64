//! Static CIL opcode tables (ECMA-335 III).
//!
//! The instruction set is a two-tier, 256-entry-per-tier table: one byte
//! selects an entry in [`INSTRUCTIONS`], unless it equals the reserved escape
//! value `0xFE`, in which case the following byte selects an entry in
//! [`INSTRUCTIONS_FE`]. Each entry declares the mnemonic and the exact
//! operand shape the decoder must consume.
//!
//! Entries with an empty mnemonic are reserved encodings; decoding one is a
//! fatal error for the enclosing method body, since every later offset would
//! be meaningless.

use crate::disassembler::instruction::OperandType;
use crate::disassembler::instruction::OperandType::None as NoOperand;
use crate::disassembler::instruction::OperandType::{
    Float32, Float64, Int16, Int32, Int64, Int8, Switch, Token,
};

/// Decode metadata for one opcode: mnemonic plus declared operand shape.
#[derive(Debug, Clone, Copy)]
pub struct OpSpec {
    /// Instruction mnemonic; empty for reserved encodings.
    pub mnemonic: &'static str,
    /// Declared operand shape; decoding consumes exactly this many bytes.
    pub operand: OperandType,
}

const fn op(mnemonic: &'static str, operand: OperandType) -> OpSpec {
    OpSpec { mnemonic, operand }
}

const RESERVED: OpSpec = op("", NoOperand);

/// Primary opcode table, indexed by the first instruction byte.
pub static INSTRUCTIONS: [OpSpec; 256] = [
    op("nop", NoOperand),           // 0x00
    op("break", NoOperand),         // 0x01
    op("ldarg.0", NoOperand),       // 0x02
    op("ldarg.1", NoOperand),       // 0x03
    op("ldarg.2", NoOperand),       // 0x04
    op("ldarg.3", NoOperand),       // 0x05
    op("ldloc.0", NoOperand),       // 0x06
    op("ldloc.1", NoOperand),       // 0x07
    op("ldloc.2", NoOperand),       // 0x08
    op("ldloc.3", NoOperand),       // 0x09
    op("stloc.0", NoOperand),       // 0x0A
    op("stloc.1", NoOperand),       // 0x0B
    op("stloc.2", NoOperand),       // 0x0C
    op("stloc.3", NoOperand),       // 0x0D
    op("ldarg.s", Int8),            // 0x0E
    op("ldarga.s", Int8),           // 0x0F
    op("starg.s", Int8),            // 0x10
    op("ldloc.s", Int8),            // 0x11
    op("ldloca.s", Int8),           // 0x12
    op("stloc.s", Int8),            // 0x13
    op("ldnull", NoOperand),        // 0x14
    op("ldc.i4.m1", NoOperand),     // 0x15
    op("ldc.i4.0", NoOperand),      // 0x16
    op("ldc.i4.1", NoOperand),      // 0x17
    op("ldc.i4.2", NoOperand),      // 0x18
    op("ldc.i4.3", NoOperand),      // 0x19
    op("ldc.i4.4", NoOperand),      // 0x1A
    op("ldc.i4.5", NoOperand),      // 0x1B
    op("ldc.i4.6", NoOperand),      // 0x1C
    op("ldc.i4.7", NoOperand),      // 0x1D
    op("ldc.i4.8", NoOperand),      // 0x1E
    op("ldc.i4.s", Int8),           // 0x1F
    op("ldc.i4", Int32),            // 0x20
    op("ldc.i8", Int64),            // 0x21
    op("ldc.r4", Float32),          // 0x22
    op("ldc.r8", Float64),          // 0x23
    RESERVED,                       // 0x24
    op("dup", NoOperand),           // 0x25
    op("pop", NoOperand),           // 0x26
    op("jmp", Token),               // 0x27
    op("call", Token),              // 0x28
    op("calli", Token),             // 0x29
    op("ret", NoOperand),           // 0x2A
    op("br.s", Int8),               // 0x2B
    op("brfalse.s", Int8),          // 0x2C
    op("brtrue.s", Int8),           // 0x2D
    op("beq.s", Int8),              // 0x2E
    op("bge.s", Int8),              // 0x2F
    op("bgt.s", Int8),              // 0x30
    op("ble.s", Int8),              // 0x31
    op("blt.s", Int8),              // 0x32
    op("bne.un.s", Int8),           // 0x33
    op("bge.un.s", Int8),           // 0x34
    op("bgt.un.s", Int8),           // 0x35
    op("ble.un.s", Int8),           // 0x36
    op("blt.un.s", Int8),           // 0x37
    op("br", Int32),                // 0x38
    op("brfalse", Int32),           // 0x39
    op("brtrue", Int32),            // 0x3A
    op("beq", Int32),               // 0x3B
    op("bge", Int32),               // 0x3C
    op("bgt", Int32),               // 0x3D
    op("ble", Int32),               // 0x3E
    op("blt", Int32),               // 0x3F
    op("bne.un", Int32),            // 0x40
    op("bge.un", Int32),            // 0x41
    op("bgt.un", Int32),            // 0x42
    op("ble.un", Int32),            // 0x43
    op("blt.un", Int32),            // 0x44
    op("switch", Switch),           // 0x45
    op("ldind.i1", NoOperand),      // 0x46
    op("ldind.u1", NoOperand),      // 0x47
    op("ldind.i2", NoOperand),      // 0x48
    op("ldind.u2", NoOperand),      // 0x49
    op("ldind.i4", NoOperand),      // 0x4A
    op("ldind.u4", NoOperand),      // 0x4B
    op("ldind.i8", NoOperand),      // 0x4C
    op("ldind.i", NoOperand),       // 0x4D
    op("ldind.r4", NoOperand),      // 0x4E
    op("ldind.r8", NoOperand),      // 0x4F
    op("ldind.ref", NoOperand),     // 0x50
    op("stind.ref", NoOperand),     // 0x51
    op("stind.i1", NoOperand),      // 0x52
    op("stind.i2", NoOperand),      // 0x53
    op("stind.i4", NoOperand),      // 0x54
    op("stind.i8", NoOperand),      // 0x55
    op("stind.r4", NoOperand),      // 0x56
    op("stind.r8", NoOperand),      // 0x57
    op("add", NoOperand),           // 0x58
    op("sub", NoOperand),           // 0x59
    op("mul", NoOperand),           // 0x5A
    op("div", NoOperand),           // 0x5B
    op("div.un", NoOperand),        // 0x5C
    op("rem", NoOperand),           // 0x5D
    op("rem.un", NoOperand),        // 0x5E
    op("and", NoOperand),           // 0x5F
    op("or", NoOperand),            // 0x60
    op("xor", NoOperand),           // 0x61
    op("shl", NoOperand),           // 0x62
    op("shr", NoOperand),           // 0x63
    op("shr.un", NoOperand),        // 0x64
    op("neg", NoOperand),           // 0x65
    op("not", NoOperand),           // 0x66
    op("conv.i1", NoOperand),       // 0x67
    op("conv.i2", NoOperand),       // 0x68
    op("conv.i4", NoOperand),       // 0x69
    op("conv.i8", NoOperand),       // 0x6A
    op("conv.r4", NoOperand),       // 0x6B
    op("conv.r8", NoOperand),       // 0x6C
    op("conv.u4", NoOperand),       // 0x6D
    op("conv.u8", NoOperand),       // 0x6E
    op("callvirt", Token),          // 0x6F
    op("cpobj", Token),             // 0x70
    op("ldobj", Token),             // 0x71
    op("ldstr", Token),             // 0x72
    op("newobj", Token),            // 0x73
    op("castclass", Token),         // 0x74
    op("isinst", Token),            // 0x75
    op("conv.r.un", NoOperand),     // 0x76
    RESERVED,                       // 0x77
    RESERVED,                       // 0x78
    op("unbox", Token),             // 0x79
    op("throw", NoOperand),         // 0x7A
    op("ldfld", Token),             // 0x7B
    op("ldflda", Token),            // 0x7C
    op("stfld", Token),             // 0x7D
    op("ldsfld", Token),            // 0x7E
    op("ldsflda", Token),           // 0x7F
    op("stsfld", Token),            // 0x80
    op("stobj", Token),             // 0x81
    op("conv.ovf.i1.un", NoOperand), // 0x82
    op("conv.ovf.i2.un", NoOperand), // 0x83
    op("conv.ovf.i4.un", NoOperand), // 0x84
    op("conv.ovf.i8.un", NoOperand), // 0x85
    op("conv.ovf.u1.un", NoOperand), // 0x86
    op("conv.ovf.u2.un", NoOperand), // 0x87
    op("conv.ovf.u4.un", NoOperand), // 0x88
    op("conv.ovf.u8.un", NoOperand), // 0x89
    op("conv.ovf.i.un", NoOperand), // 0x8A
    op("conv.ovf.u.un", NoOperand), // 0x8B
    op("box", Token),               // 0x8C
    op("newarr", Token),            // 0x8D
    op("ldlen", NoOperand),         // 0x8E
    op("ldelema", Token),           // 0x8F
    op("ldelem.i1", NoOperand),     // 0x90
    op("ldelem.u1", NoOperand),     // 0x91
    op("ldelem.i2", NoOperand),     // 0x92
    op("ldelem.u2", NoOperand),     // 0x93
    op("ldelem.i4", NoOperand),     // 0x94
    op("ldelem.u4", NoOperand),     // 0x95
    op("ldelem.i8", NoOperand),     // 0x96
    op("ldelem.i", NoOperand),      // 0x97
    op("ldelem.r4", NoOperand),     // 0x98
    op("ldelem.r8", NoOperand),     // 0x99
    op("ldelem.ref", NoOperand),    // 0x9A
    op("stelem.i", NoOperand),      // 0x9B
    op("stelem.i1", NoOperand),     // 0x9C
    op("stelem.i2", NoOperand),     // 0x9D
    op("stelem.i4", NoOperand),     // 0x9E
    op("stelem.i8", NoOperand),     // 0x9F
    op("stelem.r4", NoOperand),     // 0xA0
    op("stelem.r8", NoOperand),     // 0xA1
    op("stelem.ref", NoOperand),    // 0xA2
    op("ldelem", Token),            // 0xA3
    op("stelem", Token),            // 0xA4
    op("unbox.any", Token),         // 0xA5
    RESERVED,                       // 0xA6
    RESERVED,                       // 0xA7
    RESERVED,                       // 0xA8
    RESERVED,                       // 0xA9
    RESERVED,                       // 0xAA
    RESERVED,                       // 0xAB
    RESERVED,                       // 0xAC
    RESERVED,                       // 0xAD
    RESERVED,                       // 0xAE
    RESERVED,                       // 0xAF
    RESERVED,                       // 0xB0
    RESERVED,                       // 0xB1
    RESERVED,                       // 0xB2
    op("conv.ovf.i1", NoOperand),   // 0xB3
    op("conv.ovf.u1", NoOperand),   // 0xB4
    op("conv.ovf.i2", NoOperand),   // 0xB5
    op("conv.ovf.u2", NoOperand),   // 0xB6
    op("conv.ovf.i4", NoOperand),   // 0xB7
    op("conv.ovf.u4", NoOperand),   // 0xB8
    op("conv.ovf.i8", NoOperand),   // 0xB9
    op("conv.ovf.u8", NoOperand),   // 0xBA
    RESERVED,                       // 0xBB
    RESERVED,                       // 0xBC
    RESERVED,                       // 0xBD
    RESERVED,                       // 0xBE
    RESERVED,                       // 0xBF
    RESERVED,                       // 0xC0
    RESERVED,                       // 0xC1
    op("refanyval", Token),         // 0xC2
    op("ckfinite", NoOperand),      // 0xC3
    RESERVED,                       // 0xC4
    RESERVED,                       // 0xC5
    op("mkrefany", Token),          // 0xC6
    RESERVED,                       // 0xC7
    RESERVED,                       // 0xC8
    RESERVED,                       // 0xC9
    RESERVED,                       // 0xCA
    RESERVED,                       // 0xCB
    RESERVED,                       // 0xCC
    RESERVED,                       // 0xCD
    RESERVED,                       // 0xCE
    RESERVED,                       // 0xCF
    op("ldtoken", Token),           // 0xD0
    op("conv.u2", NoOperand),       // 0xD1
    op("conv.u1", NoOperand),       // 0xD2
    op("conv.i", NoOperand),        // 0xD3
    op("conv.ovf.i", NoOperand),    // 0xD4
    op("conv.ovf.u", NoOperand),    // 0xD5
    op("add.ovf", NoOperand),       // 0xD6
    op("add.ovf.un", NoOperand),    // 0xD7
    op("mul.ovf", NoOperand),       // 0xD8
    op("mul.ovf.un", NoOperand),    // 0xD9
    op("sub.ovf", NoOperand),       // 0xDA
    op("sub.ovf.un", NoOperand),    // 0xDB
    op("endfinally", NoOperand),    // 0xDC
    op("leave", Int32),             // 0xDD
    op("leave.s", Int8),            // 0xDE
    op("stind.i", NoOperand),       // 0xDF
    op("conv.u", NoOperand),        // 0xE0
    RESERVED,                       // 0xE1
    RESERVED,                       // 0xE2
    RESERVED,                       // 0xE3
    RESERVED,                       // 0xE4
    RESERVED,                       // 0xE5
    RESERVED,                       // 0xE6
    RESERVED,                       // 0xE7
    RESERVED,                       // 0xE8
    RESERVED,                       // 0xE9
    RESERVED,                       // 0xEA
    RESERVED,                       // 0xEB
    RESERVED,                       // 0xEC
    RESERVED,                       // 0xED
    RESERVED,                       // 0xEE
    RESERVED,                       // 0xEF
    RESERVED,                       // 0xF0
    RESERVED,                       // 0xF1
    RESERVED,                       // 0xF2
    RESERVED,                       // 0xF3
    RESERVED,                       // 0xF4
    RESERVED,                       // 0xF5
    RESERVED,                       // 0xF6
    RESERVED,                       // 0xF7
    RESERVED,                       // 0xF8
    RESERVED,                       // 0xF9
    RESERVED,                       // 0xFA
    RESERVED,                       // 0xFB
    RESERVED,                       // 0xFC
    RESERVED,                       // 0xFD
    RESERVED,                       // 0xFE (escape byte, handled before lookup)
    RESERVED,                       // 0xFF
];

/// Secondary opcode table, indexed by the byte following the `0xFE` escape.
pub static INSTRUCTIONS_FE: [OpSpec; 31] = [
    op("arglist", NoOperand),       // 0xFE 0x00
    op("ceq", NoOperand),           // 0xFE 0x01
    op("cgt", NoOperand),           // 0xFE 0x02
    op("cgt.un", NoOperand),        // 0xFE 0x03
    op("clt", NoOperand),           // 0xFE 0x04
    op("clt.un", NoOperand),        // 0xFE 0x05
    op("ldftn", Token),             // 0xFE 0x06
    op("ldvirtftn", Token),         // 0xFE 0x07
    RESERVED,                       // 0xFE 0x08
    op("ldarg", Int16),             // 0xFE 0x09
    op("ldarga", Int16),            // 0xFE 0x0A
    op("starg", Int16),             // 0xFE 0x0B
    op("ldloc", Int16),             // 0xFE 0x0C
    op("ldloca", Int16),            // 0xFE 0x0D
    op("stloc", Int16),             // 0xFE 0x0E
    op("localloc", NoOperand),      // 0xFE 0x0F
    RESERVED,                       // 0xFE 0x10
    op("endfilter", NoOperand),     // 0xFE 0x11
    op("unaligned.", Int8),         // 0xFE 0x12
    op("volatile.", NoOperand),     // 0xFE 0x13
    op("tail.", NoOperand),         // 0xFE 0x14
    op("initobj", Token),           // 0xFE 0x15
    op("constrained.", Token),      // 0xFE 0x16
    op("cpblk", NoOperand),         // 0xFE 0x17
    op("initblk", NoOperand),       // 0xFE 0x18
    op("no.", Int8),                // 0xFE 0x19
    op("rethrow", NoOperand),       // 0xFE 0x1A
    RESERVED,                       // 0xFE 0x1B
    op("sizeof", Token),            // 0xFE 0x1C
    op("refanytype", NoOperand),    // 0xFE 0x1D
    op("readonly.", NoOperand),     // 0xFE 0x1E
];
