//! The Intel 8051 (MCS-51) ISA
//!
//! Every first byte is an opcode, so decoding indexes [`INSTRUCTION_SET`]
//! directly. Instructions are one to three bytes wide; multi-byte
//! immediates and addresses are stored big-endian.

use crate::decoded::{label, relative_offset, Instruction, Radix, RenderOptions};
use crate::isa::{self, InstructionSet, Opcode as OpcodeBytes, Operands};

/// Operand kinds of the 8051
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `Rn`, register number in the low three opcode bits
    Register,
    /// `@Ri`, register number in the lowest opcode bit
    IndirectRegister,
    /// The accumulator
    A,
    /// The `AB` register pair
    AB,
    /// The carry flag
    C,
    /// The data pointer
    Dptr,
    /// `@DPTR`
    IndirectDptr,
    /// `@A+DPTR`
    IndirectADptr,
    /// `@A+PC`
    IndirectAPc,
    /// Direct internal RAM address
    Direct,
    /// Source address of `mov direct, direct`, always the second byte
    DirectSource,
    /// Destination address of `mov direct, direct`, always the third byte
    DirectDestination,
    /// Bit address
    Bit,
    /// Complemented bit address
    NotBit,
    /// 8-bit immediate
    Immediate,
    /// 16-bit immediate
    Immediate16,
    /// 11-bit absolute address within the current 2K page
    Addr11,
    /// 16-bit absolute address
    Addr16,
    /// Signed 8-bit offset from the next instruction
    Relative,
    /// Undecodable byte, taken from the opcode byte itself
    RawByte,
}

/// An 8051 instruction encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// First byte of the encoding
    pub opcode: u8,
    /// Mnemonic
    pub mnemonic: &'static str,
    /// Width in bytes
    pub width: usize,
    /// Operands in assembly order
    pub operands: &'static [Operand],
}

impl isa::Descriptor for Opcode {
    fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    fn width(&self) -> usize {
        self.width
    }

    fn operand_count(&self) -> usize {
        self.operands.len()
    }
}

/// Raw data byte, used when an instruction is cut short.
pub static RAW_BYTE: Opcode = Opcode {
    opcode: 0,
    mnemonic: ".db",
    width: 1,
    operands: &[Operand::RawByte],
};

macro_rules! op {
    ($code:literal, $mnemonic:literal, $width:literal $(, $operand:ident)*) => {
        Opcode {
            opcode: $code,
            mnemonic: $mnemonic,
            width: $width,
            operands: &[$(Operand::$operand),*],
        }
    };
}

/// All 256 opcodes, indexed by their first byte.
#[rustfmt::skip]
pub static INSTRUCTION_SET: [Opcode; 256] = [
    op!(0x00, "nop", 1),
    op!(0x01, "ajmp", 2, Addr11),
    op!(0x02, "ljmp", 3, Addr16),
    op!(0x03, "rr", 1, A),
    op!(0x04, "inc", 1, A),
    op!(0x05, "inc", 2, Direct),
    op!(0x06, "inc", 1, IndirectRegister),
    op!(0x07, "inc", 1, IndirectRegister),
    op!(0x08, "inc", 1, Register),
    op!(0x09, "inc", 1, Register),
    op!(0x0a, "inc", 1, Register),
    op!(0x0b, "inc", 1, Register),
    op!(0x0c, "inc", 1, Register),
    op!(0x0d, "inc", 1, Register),
    op!(0x0e, "inc", 1, Register),
    op!(0x0f, "inc", 1, Register),

    op!(0x10, "jbc", 3, Bit, Relative),
    op!(0x11, "acall", 2, Addr11),
    op!(0x12, "lcall", 3, Addr16),
    op!(0x13, "rrc", 1, A),
    op!(0x14, "dec", 1, A),
    op!(0x15, "dec", 2, Direct),
    op!(0x16, "dec", 1, IndirectRegister),
    op!(0x17, "dec", 1, IndirectRegister),
    op!(0x18, "dec", 1, Register),
    op!(0x19, "dec", 1, Register),
    op!(0x1a, "dec", 1, Register),
    op!(0x1b, "dec", 1, Register),
    op!(0x1c, "dec", 1, Register),
    op!(0x1d, "dec", 1, Register),
    op!(0x1e, "dec", 1, Register),
    op!(0x1f, "dec", 1, Register),

    op!(0x20, "jb", 3, Bit, Relative),
    op!(0x21, "ajmp", 2, Addr11),
    op!(0x22, "ret", 1),
    op!(0x23, "rl", 1, A),
    op!(0x24, "add", 2, A, Immediate),
    op!(0x25, "add", 2, A, Direct),
    op!(0x26, "add", 1, A, IndirectRegister),
    op!(0x27, "add", 1, A, IndirectRegister),
    op!(0x28, "add", 1, A, Register),
    op!(0x29, "add", 1, A, Register),
    op!(0x2a, "add", 1, A, Register),
    op!(0x2b, "add", 1, A, Register),
    op!(0x2c, "add", 1, A, Register),
    op!(0x2d, "add", 1, A, Register),
    op!(0x2e, "add", 1, A, Register),
    op!(0x2f, "add", 1, A, Register),

    op!(0x30, "jnb", 3, Bit, Relative),
    op!(0x31, "acall", 2, Addr11),
    op!(0x32, "reti", 1),
    op!(0x33, "rlc", 1, A),
    op!(0x34, "addc", 2, A, Immediate),
    op!(0x35, "addc", 2, A, Direct),
    op!(0x36, "addc", 1, A, IndirectRegister),
    op!(0x37, "addc", 1, A, IndirectRegister),
    op!(0x38, "addc", 1, A, Register),
    op!(0x39, "addc", 1, A, Register),
    op!(0x3a, "addc", 1, A, Register),
    op!(0x3b, "addc", 1, A, Register),
    op!(0x3c, "addc", 1, A, Register),
    op!(0x3d, "addc", 1, A, Register),
    op!(0x3e, "addc", 1, A, Register),
    op!(0x3f, "addc", 1, A, Register),

    op!(0x40, "jc", 2, Relative),
    op!(0x41, "ajmp", 2, Addr11),
    op!(0x42, "orl", 2, Direct, A),
    op!(0x43, "orl", 3, Direct, Immediate),
    op!(0x44, "orl", 2, A, Immediate),
    op!(0x45, "orl", 2, A, Direct),
    op!(0x46, "orl", 1, A, IndirectRegister),
    op!(0x47, "orl", 1, A, IndirectRegister),
    op!(0x48, "orl", 1, A, Register),
    op!(0x49, "orl", 1, A, Register),
    op!(0x4a, "orl", 1, A, Register),
    op!(0x4b, "orl", 1, A, Register),
    op!(0x4c, "orl", 1, A, Register),
    op!(0x4d, "orl", 1, A, Register),
    op!(0x4e, "orl", 1, A, Register),
    op!(0x4f, "orl", 1, A, Register),

    op!(0x50, "jnc", 2, Relative),
    op!(0x51, "acall", 2, Addr11),
    op!(0x52, "anl", 2, Direct, A),
    op!(0x53, "anl", 3, Direct, Immediate),
    op!(0x54, "anl", 2, A, Immediate),
    op!(0x55, "anl", 2, A, Direct),
    op!(0x56, "anl", 1, A, IndirectRegister),
    op!(0x57, "anl", 1, A, IndirectRegister),
    op!(0x58, "anl", 1, A, Register),
    op!(0x59, "anl", 1, A, Register),
    op!(0x5a, "anl", 1, A, Register),
    op!(0x5b, "anl", 1, A, Register),
    op!(0x5c, "anl", 1, A, Register),
    op!(0x5d, "anl", 1, A, Register),
    op!(0x5e, "anl", 1, A, Register),
    op!(0x5f, "anl", 1, A, Register),

    op!(0x60, "jz", 2, Relative),
    op!(0x61, "ajmp", 2, Addr11),
    op!(0x62, "xrl", 2, Direct, A),
    op!(0x63, "xrl", 3, Direct, Immediate),
    op!(0x64, "xrl", 2, A, Immediate),
    op!(0x65, "xrl", 2, A, Direct),
    op!(0x66, "xrl", 1, A, IndirectRegister),
    op!(0x67, "xrl", 1, A, IndirectRegister),
    op!(0x68, "xrl", 1, A, Register),
    op!(0x69, "xrl", 1, A, Register),
    op!(0x6a, "xrl", 1, A, Register),
    op!(0x6b, "xrl", 1, A, Register),
    op!(0x6c, "xrl", 1, A, Register),
    op!(0x6d, "xrl", 1, A, Register),
    op!(0x6e, "xrl", 1, A, Register),
    op!(0x6f, "xrl", 1, A, Register),

    op!(0x70, "jnz", 2, Relative),
    op!(0x71, "acall", 2, Addr11),
    op!(0x72, "orl", 2, C, Bit),
    op!(0x73, "jmp", 1, IndirectADptr),
    op!(0x74, "mov", 2, A, Immediate),
    op!(0x75, "mov", 3, Direct, Immediate),
    op!(0x76, "mov", 2, IndirectRegister, Immediate),
    op!(0x77, "mov", 2, IndirectRegister, Immediate),
    op!(0x78, "mov", 2, Register, Immediate),
    op!(0x79, "mov", 2, Register, Immediate),
    op!(0x7a, "mov", 2, Register, Immediate),
    op!(0x7b, "mov", 2, Register, Immediate),
    op!(0x7c, "mov", 2, Register, Immediate),
    op!(0x7d, "mov", 2, Register, Immediate),
    op!(0x7e, "mov", 2, Register, Immediate),
    op!(0x7f, "mov", 2, Register, Immediate),

    op!(0x80, "sjmp", 2, Relative),
    op!(0x81, "ajmp", 2, Addr11),
    op!(0x82, "anl", 2, C, Bit),
    op!(0x83, "movc", 1, A, IndirectAPc),
    op!(0x84, "div", 1, AB),
    op!(0x85, "mov", 3, DirectDestination, DirectSource),
    op!(0x86, "mov", 2, Direct, IndirectRegister),
    op!(0x87, "mov", 2, Direct, IndirectRegister),
    op!(0x88, "mov", 2, Direct, Register),
    op!(0x89, "mov", 2, Direct, Register),
    op!(0x8a, "mov", 2, Direct, Register),
    op!(0x8b, "mov", 2, Direct, Register),
    op!(0x8c, "mov", 2, Direct, Register),
    op!(0x8d, "mov", 2, Direct, Register),
    op!(0x8e, "mov", 2, Direct, Register),
    op!(0x8f, "mov", 2, Direct, Register),

    op!(0x90, "mov", 3, Dptr, Immediate16),
    op!(0x91, "acall", 2, Addr11),
    op!(0x92, "mov", 2, Bit, C),
    op!(0x93, "movc", 1, A, IndirectADptr),
    op!(0x94, "subb", 2, A, Immediate),
    op!(0x95, "subb", 2, A, Direct),
    op!(0x96, "subb", 1, A, IndirectRegister),
    op!(0x97, "subb", 1, A, IndirectRegister),
    op!(0x98, "subb", 1, A, Register),
    op!(0x99, "subb", 1, A, Register),
    op!(0x9a, "subb", 1, A, Register),
    op!(0x9b, "subb", 1, A, Register),
    op!(0x9c, "subb", 1, A, Register),
    op!(0x9d, "subb", 1, A, Register),
    op!(0x9e, "subb", 1, A, Register),
    op!(0x9f, "subb", 1, A, Register),

    op!(0xa0, "orl", 2, C, NotBit),
    op!(0xa1, "ajmp", 2, Addr11),
    op!(0xa2, "mov", 2, C, Bit),
    op!(0xa3, "inc", 1, Dptr),
    op!(0xa4, "mul", 1, AB),
    // reserved
    op!(0xa5, ".db", 1, RawByte),
    op!(0xa6, "mov", 2, IndirectRegister, Direct),
    op!(0xa7, "mov", 2, IndirectRegister, Direct),
    op!(0xa8, "mov", 2, Register, Direct),
    op!(0xa9, "mov", 2, Register, Direct),
    op!(0xaa, "mov", 2, Register, Direct),
    op!(0xab, "mov", 2, Register, Direct),
    op!(0xac, "mov", 2, Register, Direct),
    op!(0xad, "mov", 2, Register, Direct),
    op!(0xae, "mov", 2, Register, Direct),
    op!(0xaf, "mov", 2, Register, Direct),

    op!(0xb0, "anl", 2, C, NotBit),
    op!(0xb1, "acall", 2, Addr11),
    op!(0xb2, "cpl", 2, Bit),
    op!(0xb3, "cpl", 1, C),
    op!(0xb4, "cjne", 3, A, Immediate, Relative),
    op!(0xb5, "cjne", 3, A, Direct, Relative),
    op!(0xb6, "cjne", 3, IndirectRegister, Immediate, Relative),
    op!(0xb7, "cjne", 3, IndirectRegister, Immediate, Relative),
    op!(0xb8, "cjne", 3, Register, Immediate, Relative),
    op!(0xb9, "cjne", 3, Register, Immediate, Relative),
    op!(0xba, "cjne", 3, Register, Immediate, Relative),
    op!(0xbb, "cjne", 3, Register, Immediate, Relative),
    op!(0xbc, "cjne", 3, Register, Immediate, Relative),
    op!(0xbd, "cjne", 3, Register, Immediate, Relative),
    op!(0xbe, "cjne", 3, Register, Immediate, Relative),
    op!(0xbf, "cjne", 3, Register, Immediate, Relative),

    op!(0xc0, "push", 2, Direct),
    op!(0xc1, "ajmp", 2, Addr11),
    op!(0xc2, "clr", 2, Bit),
    op!(0xc3, "clr", 1, C),
    op!(0xc4, "swap", 1, A),
    op!(0xc5, "xch", 2, A, Direct),
    op!(0xc6, "xch", 1, A, IndirectRegister),
    op!(0xc7, "xch", 1, A, IndirectRegister),
    op!(0xc8, "xch", 1, A, Register),
    op!(0xc9, "xch", 1, A, Register),
    op!(0xca, "xch", 1, A, Register),
    op!(0xcb, "xch", 1, A, Register),
    op!(0xcc, "xch", 1, A, Register),
    op!(0xcd, "xch", 1, A, Register),
    op!(0xce, "xch", 1, A, Register),
    op!(0xcf, "xch", 1, A, Register),

    op!(0xd0, "pop", 2, Direct),
    op!(0xd1, "acall", 2, Addr11),
    op!(0xd2, "setb", 2, Bit),
    op!(0xd3, "setb", 1, C),
    op!(0xd4, "da", 1, A),
    op!(0xd5, "djnz", 3, Direct, Relative),
    op!(0xd6, "xchd", 1, A, IndirectRegister),
    op!(0xd7, "xchd", 1, A, IndirectRegister),
    op!(0xd8, "djnz", 2, Register, Relative),
    op!(0xd9, "djnz", 2, Register, Relative),
    op!(0xda, "djnz", 2, Register, Relative),
    op!(0xdb, "djnz", 2, Register, Relative),
    op!(0xdc, "djnz", 2, Register, Relative),
    op!(0xdd, "djnz", 2, Register, Relative),
    op!(0xde, "djnz", 2, Register, Relative),
    op!(0xdf, "djnz", 2, Register, Relative),

    op!(0xe0, "movx", 1, A, IndirectDptr),
    op!(0xe1, "ajmp", 2, Addr11),
    op!(0xe2, "movx", 1, A, IndirectRegister),
    op!(0xe3, "movx", 1, A, IndirectRegister),
    op!(0xe4, "clr", 1, A),
    op!(0xe5, "mov", 2, A, Direct),
    op!(0xe6, "mov", 1, A, IndirectRegister),
    op!(0xe7, "mov", 1, A, IndirectRegister),
    op!(0xe8, "mov", 1, A, Register),
    op!(0xe9, "mov", 1, A, Register),
    op!(0xea, "mov", 1, A, Register),
    op!(0xeb, "mov", 1, A, Register),
    op!(0xec, "mov", 1, A, Register),
    op!(0xed, "mov", 1, A, Register),
    op!(0xee, "mov", 1, A, Register),
    op!(0xef, "mov", 1, A, Register),

    op!(0xf0, "movx", 1, IndirectDptr, A),
    op!(0xf1, "acall", 2, Addr11),
    op!(0xf2, "movx", 1, IndirectRegister, A),
    op!(0xf3, "movx", 1, IndirectRegister, A),
    op!(0xf4, "cpl", 1, A),
    op!(0xf5, "mov", 2, Direct, A),
    op!(0xf6, "mov", 1, IndirectRegister, A),
    op!(0xf7, "mov", 1, IndirectRegister, A),
    op!(0xf8, "mov", 1, Register, A),
    op!(0xf9, "mov", 1, Register, A),
    op!(0xfa, "mov", 1, Register, A),
    op!(0xfb, "mov", 1, Register, A),
    op!(0xfc, "mov", 1, Register, A),
    op!(0xfd, "mov", 1, Register, A),
    op!(0xfe, "mov", 1, Register, A),
    op!(0xff, "mov", 1, Register, A),
];

/// The 8051 instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mcs51;

impl InstructionSet for Mcs51 {
    type Descriptor = Opcode;

    const NAME: &'static str = "8051";
    const MAX_WIDTH: usize = 3;
    const UNIT: usize = 1;
    const ORIGIN_DIRECTIVE: &'static str = ".org";
    const END_DIRECTIVE: &'static str = "end";

    fn lookup(bytes: &[u8]) -> Option<&'static Opcode> {
        bytes
            .first()
            .map(|&opcode| &INSTRUCTION_SET[usize::from(opcode)])
    }

    fn fallback(_available: usize) -> &'static Opcode {
        &RAW_BYTE
    }

    fn decode_operands(descriptor: &Opcode, opcode: &OpcodeBytes) -> Operands {
        let mut operands = Operands::default();
        // Position of the next operand byte.
        let mut cursor = 1;
        let mut next = || {
            let byte = opcode[cursor.min(opcode.len() - 1)];
            cursor += 1;
            byte
        };

        for (value, operand) in operands.iter_mut().zip(descriptor.operands) {
            *value = match operand {
                Operand::Register => i32::from(opcode[0] & 0x07),
                Operand::IndirectRegister => i32::from(opcode[0] & 0x01),
                Operand::DirectSource => i32::from(opcode[1]),
                Operand::DirectDestination => i32::from(opcode[2]),
                Operand::RawByte => i32::from(opcode[0]),
                Operand::Direct | Operand::Bit | Operand::NotBit | Operand::Immediate => {
                    i32::from(next())
                }
                Operand::Immediate16 | Operand::Addr16 => {
                    i32::from(u16::from_be_bytes([next(), next()]))
                }
                Operand::Addr11 => (i32::from(opcode[0] & 0xe0) << 3) | i32::from(next()),
                Operand::Relative => i32::from(next() as i8),
                Operand::A
                | Operand::AB
                | Operand::C
                | Operand::Dptr
                | Operand::IndirectDptr
                | Operand::IndirectADptr
                | Operand::IndirectAPc => 0,
            };
        }
        operands
    }

    fn render_operand(
        instruction: &Instruction<Self>,
        index: usize,
        options: RenderOptions,
    ) -> Option<String> {
        let operand = *instruction.descriptor().operands.get(index)?;
        let value = *instruction.operands().get(index)?;
        Some(match operand {
            Operand::Register => format!("R{value}"),
            Operand::IndirectRegister => format!("@R{value}"),
            Operand::A => "A".to_owned(),
            Operand::AB => "AB".to_owned(),
            Operand::C => "C".to_owned(),
            Operand::Dptr => "DPTR".to_owned(),
            Operand::IndirectDptr => "@DPTR".to_owned(),
            Operand::IndirectADptr => "@A+DPTR".to_owned(),
            Operand::IndirectAPc => "@A+PC".to_owned(),
            Operand::Direct
            | Operand::DirectSource
            | Operand::DirectDestination
            | Operand::Bit
            | Operand::RawByte => format!("0{value:02x}h"),
            Operand::NotBit => format!("/0{value:02x}h"),
            Operand::Immediate => match options.radix {
                Radix::Hex => format!("#0{value:02x}h"),
                Radix::Binary => format!("#{value:08b}b"),
                Radix::Decimal => format!("#{value}"),
            },
            Operand::Immediate16 => format!("#0{value:04x}h"),
            Operand::Addr11 | Operand::Addr16 if options.assembly => label(value as u32),
            Operand::Addr11 | Operand::Addr16 => format!("0{value:04x}h"),
            Operand::Relative if options.assembly => label(instruction.relative_target(value)),
            Operand::Relative => relative_offset(value),
        })
    }

    fn is_relative(descriptor: &Opcode, index: usize) -> bool {
        descriptor.operands.get(index) == Some(&Operand::Relative)
    }

    fn format_address(address: u32) -> String {
        format!("0{address:04x}h")
    }

    fn format_destination(address: u32) -> String {
        format!("0{address:x}h")
    }
}
