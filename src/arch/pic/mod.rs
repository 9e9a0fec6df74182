//! The Microchip PIC ISAs
//!
//! Four families share one operand model and differ only in their tables:
//! [`Baseline`] (12-bit words), [`Midrange`] and [`Enhanced`] (14-bit words)
//! and [`Pic18`] (16-bit words, some instructions two words long). Words are
//! stored little-endian, two bytes per program address step.
//!
//! Encodings are found by a masked scan over the family table in order; a
//! raw data word catches everything else.

use crate::decoded::{label, relative_offset, Instruction, Radix, RenderOptions};
use crate::isa::{bits_from_mask, Field, Opcode, Operands, WordDescriptor};

macro_rules! inst {
    ($mnemonic:literal, $width:literal, $bits:literal, $dont_care:literal $(, $operand:ident = $mask:literal)*) => {
        $crate::isa::WordDescriptor {
            mnemonic: $mnemonic,
            width: $width,
            bits: $bits,
            dont_care: $dont_care,
            operands: &[$($crate::isa::Field { kind: $crate::arch::pic::Operand::$operand, mask: $mask }),*],
        }
    };
}

macro_rules! implementation {
    ($(#[doc = $doc:expr])* $isa:ident, $name:literal, $max_width:literal) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $isa;

        impl $crate::isa::InstructionSet for $isa {
            type Descriptor = $crate::arch::pic::Descriptor;

            const NAME: &'static str = $name;
            const MAX_WIDTH: usize = $max_width;
            const UNIT: usize = 2;
            const ORIGIN_DIRECTIVE: &'static str = "org";
            const END_DIRECTIVE: &'static str = "end";

            fn lookup(bytes: &[u8]) -> Option<&'static Self::Descriptor> {
                let word = u16::from_le_bytes([*bytes.first()?, *bytes.get(1)?]);
                $crate::isa::masked_scan(&INSTRUCTION_SET, &$crate::arch::pic::RAW_WORD, word)
            }

            fn fallback(available: usize) -> &'static Self::Descriptor {
                $crate::arch::pic::fallback(available)
            }

            fn decode_operands(
                descriptor: &Self::Descriptor,
                opcode: &$crate::isa::Opcode,
            ) -> $crate::isa::Operands {
                $crate::arch::pic::decode_operands(descriptor, opcode)
            }

            fn render_operand(
                instruction: &$crate::decoded::Instruction<Self>,
                index: usize,
                options: $crate::decoded::RenderOptions,
            ) -> Option<String> {
                $crate::arch::pic::render_operand(instruction, index, options)
            }

            fn is_relative(descriptor: &Self::Descriptor, index: usize) -> bool {
                $crate::arch::pic::is_relative(descriptor, index)
            }

            fn branch_base(_width: usize) -> u32 {
                2
            }

            fn format_address(address: u32) -> String {
                format!("0x{address:04x}")
            }

            fn format_destination(address: u32) -> String {
                format!("0x{address:04x}")
            }
        }
    };
}

mod baseline;
mod enhanced;
mod midrange;
mod pic18;

pub use baseline::{Baseline, INSTRUCTION_SET as BASELINE};
pub use enhanced::{Enhanced, INSTRUCTION_SET as ENHANCED};
pub use midrange::{Midrange, INSTRUCTION_SET as MIDRANGE};
pub use pic18::{Pic18, INSTRUCTION_SET as PIC18};

/// Operand kinds of the PIC families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// File register address
    Register,
    /// Destination select, `W` (0) or `F` (1)
    Destination,
    /// RAM access select, shown only when it selects the banked RAM
    Access,
    /// Bit number
    Bit,
    /// Unsigned literal
    Literal,
    /// Signed literal
    SignedLiteral,
    /// 12-bit literal of `lfsr`, high nibble in the first word
    LongLiteral,
    /// Data memory address
    DataAddress,
    /// 12-bit destination address of `movff` in the second word
    LongDataAddress,
    /// Program word address, shown as a byte address
    ProgramAddress,
    /// 20-bit program word address of `goto`/`call`, shown as a byte address
    LongProgramAddress,
    /// Signed word offset from the next instruction
    RelativeAddress,
    /// `FSRn` index
    Fsr,
    /// `FSRn` used for indirect access, shown together with its modifier
    Indirect,
    /// Pre/post increment/decrement mode of an indirect access
    IncrementMode,
    /// Fast call/return select, shown only when set
    Fast,
    /// Undecodable word
    RawWord,
    /// Undecodable byte
    RawByte,
}

/// A PIC instruction encoding
pub type Descriptor = WordDescriptor<Operand>;

/// Raw data word, matches anything.
pub static RAW_WORD: Descriptor = WordDescriptor {
    mnemonic: "dw",
    width: 2,
    bits: 0,
    dont_care: 0xffff,
    operands: &[Field {
        kind: Operand::RawWord,
        mask: 0xffff,
    }],
};

/// Raw data byte, for a lone trailing byte.
pub static RAW_BYTE: Descriptor = WordDescriptor {
    mnemonic: "db",
    width: 1,
    bits: 0,
    dont_care: 0xffff,
    operands: &[Field {
        kind: Operand::RawByte,
        mask: 0x00ff,
    }],
};

fn fallback(available: usize) -> &'static Descriptor {
    if available >= 2 {
        &RAW_WORD
    } else {
        &RAW_BYTE
    }
}

/// Two's complement value of a field whose mask is right-aligned.
fn signed(bits: i32, mask: u16) -> i32 {
    let mask = i32::from(mask);
    let msb = (mask + 1) >> 1;
    if bits & msb != 0 {
        -((!bits + 1) & mask)
    } else {
        bits
    }
}

fn decode_operands(descriptor: &Descriptor, opcode: &Opcode) -> Operands {
    let word = u16::from_le_bytes([opcode[0], opcode[1]]);
    let mut operands = Operands::default();

    for (value, field) in operands.iter_mut().zip(descriptor.operands) {
        let bits = i32::from(bits_from_mask(word, field.mask));
        *value = match field.kind {
            Operand::ProgramAddress => bits * 2,
            Operand::LongProgramAddress => {
                ((i32::from(opcode[3] & 0x0f) << 16) | (i32::from(opcode[2]) << 8) | bits) * 2
            }
            Operand::LongLiteral => (bits << 8) | i32::from(opcode[2]),
            Operand::LongDataAddress => (i32::from(opcode[3] & 0x0f) << 8) | i32::from(opcode[2]),
            Operand::SignedLiteral => signed(bits, field.mask),
            Operand::RelativeAddress => signed(bits, field.mask) * 2,
            Operand::RawByte => i32::from(opcode[0]),
            Operand::Register
            | Operand::Destination
            | Operand::Access
            | Operand::Bit
            | Operand::Literal
            | Operand::DataAddress
            | Operand::Fsr
            | Operand::Indirect
            | Operand::IncrementMode
            | Operand::Fast
            | Operand::RawWord => bits,
        };
    }
    operands
}

fn render_operand<A>(
    instruction: &Instruction<A>,
    index: usize,
    options: RenderOptions,
) -> Option<String>
where
    A: crate::isa::InstructionSet<Descriptor = Descriptor>,
{
    let fields = instruction.descriptor().operands;
    let kind = fields.get(index)?.kind;
    let value = *instruction.operands().get(index)?;
    let modifier = fields
        .get(index + 1)
        .map(|field| (field.kind, instruction.operands()[index + 1]));
    let follows_indirect = index
        .checked_sub(1)
        .and_then(|previous| fields.get(previous))
        .map_or(false, |field| field.kind == Operand::Indirect);

    match kind {
        Operand::Register => Some(format!("{value:x}h")),
        Operand::Destination => Some(if value == 0 { "W" } else { "F" }.to_owned()),
        Operand::Access | Operand::Fast => (value == 1).then(|| "1".to_owned()),
        Operand::Bit => Some(format!("{value}")),
        Operand::Literal | Operand::LongLiteral => Some(match options.radix {
            Radix::Hex => format!("0x{value:02x}"),
            Radix::Binary => format!("b'{value:08b}'"),
            Radix::Decimal => format!("{value}"),
        }),
        Operand::SignedLiteral | Operand::IncrementMode if follows_indirect => None,
        Operand::SignedLiteral => Some(format!("{value}")),
        Operand::IncrementMode => None,
        Operand::DataAddress | Operand::LongDataAddress => Some(format!("0x{value:04x}")),
        Operand::ProgramAddress | Operand::LongProgramAddress if options.assembly => {
            Some(label(value as u32))
        }
        Operand::ProgramAddress | Operand::LongProgramAddress => Some(format!("0x{value:04x}")),
        Operand::RelativeAddress if options.assembly => {
            Some(label(instruction.relative_target(value)))
        }
        Operand::RelativeAddress => Some(relative_offset(value)),
        Operand::Fsr => Some(format!("FSR{value}")),
        Operand::Indirect => Some(match modifier {
            Some((Operand::IncrementMode, 0)) => format!("++FSR{value}"),
            Some((Operand::IncrementMode, 1)) => format!("--FSR{value}"),
            Some((Operand::IncrementMode, 2)) => format!("FSR{value}++"),
            Some((Operand::IncrementMode, _)) => format!("FSR{value}--"),
            Some((Operand::SignedLiteral, offset)) => format!("{offset}[FSR{value}]"),
            _ => format!("INDF{value}"),
        }),
        Operand::RawWord => Some(format!("0x{value:04x}")),
        Operand::RawByte => Some(format!("0x{value:02x}")),
    }
}

fn is_relative(descriptor: &Descriptor, index: usize) -> bool {
    descriptor
        .operands
        .get(index)
        .map_or(false, |field| field.kind == Operand::RelativeAddress)
}
