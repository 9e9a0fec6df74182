//! The Atmel AVR8 ISA
//!
//! Instructions are one or two little-endian 16-bit words. The encodings
//! are described by masks in [`INSTRUCTION_SET`]; at first use every
//! possible first word is matched once and the result kept in a direct
//! index, so decoding is a single table access.
//!
//! Program addresses are byte addresses (twice the word address the
//! processor uses); data space addresses are left as they are.

use lazy_static::lazy_static;

use crate::decoded::{label, relative_offset, Instruction, Radix, RenderOptions};
use crate::isa::{
    bits_from_mask, masked_scan, Field, InstructionSet, Opcode, Operands, WordDescriptor,
};

/// Operand kinds of the AVR8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `R0`..`R31`
    Register,
    /// `R16`..`R31`, encoded relative to `R16`
    RegisterHigh,
    /// Even register of a pair, encoded as half its number
    RegisterPair,
    /// `R24`..`R30` pair of `adiw`/`sbiw`
    RegisterPairHigh,
    /// I/O space address
    Io,
    /// Bit number
    Bit,
    /// DES round
    DesRound,
    /// 8-bit immediate
    Data,
    /// 16-bit data space address in the second word
    DataAddress,
    /// 22-bit program address spread over both words
    LongAbsoluteAddress,
    /// Signed 7-bit word offset of conditional branches
    BranchAddress,
    /// Signed 12-bit word offset of `rjmp`/`rcall`
    RelativeAddress,
    /// `X`
    X,
    /// `X+`
    XPostIncrement,
    /// `-X`
    XPreDecrement,
    /// `Y`
    Y,
    /// `Y+`
    YPostIncrement,
    /// `-Y`
    YPreDecrement,
    /// `Y+q`
    YDisplacement,
    /// `Z`
    Z,
    /// `Z+`
    ZPostIncrement,
    /// `-Z`
    ZPreDecrement,
    /// `Z+q`
    ZDisplacement,
    /// Undecodable word
    RawWord,
    /// Undecodable byte
    RawByte,
}

/// An AVR8 instruction encoding
pub type Descriptor = WordDescriptor<Operand>;

macro_rules! inst {
    ($mnemonic:literal, $width:literal, $bits:literal $(, $operand:ident = $mask:literal)*) => {
        WordDescriptor {
            mnemonic: $mnemonic,
            width: $width,
            bits: $bits,
            dont_care: 0,
            operands: &[$(Field { kind: Operand::$operand, mask: $mask }),*],
        }
    };
}

/// Raw data word, matches anything.
pub static RAW_WORD: Descriptor = WordDescriptor {
    mnemonic: ".dw",
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
    mnemonic: ".db",
    width: 1,
    bits: 0,
    dont_care: 0xffff,
    operands: &[Field {
        kind: Operand::RawByte,
        mask: 0x00ff,
    }],
};

/// AVR8 encodings; where two overlap the more specific one comes first.
#[rustfmt::skip]
pub static INSTRUCTION_SET: [Descriptor; 130] = [
    inst!("nop", 2, 0x0000),

    // Status flag aliases of bset/bclr.
    inst!("sec", 2, 0x9408),
    inst!("sez", 2, 0x9418),
    inst!("sen", 2, 0x9428),
    inst!("sev", 2, 0x9438),
    inst!("ses", 2, 0x9448),
    inst!("seh", 2, 0x9458),
    inst!("set", 2, 0x9468),
    inst!("sei", 2, 0x9478),
    inst!("clc", 2, 0x9488),
    inst!("clz", 2, 0x9498),
    inst!("cln", 2, 0x94a8),
    inst!("clv", 2, 0x94b8),
    inst!("cls", 2, 0x94c8),
    inst!("clh", 2, 0x94d8),
    inst!("clt", 2, 0x94e8),
    inst!("cli", 2, 0x94f8),

    inst!("ijmp", 2, 0x9409),
    inst!("eijmp", 2, 0x9419),
    inst!("ret", 2, 0x9508),
    inst!("icall", 2, 0x9509),
    inst!("reti", 2, 0x9518),
    inst!("eicall", 2, 0x9519),
    inst!("sleep", 2, 0x9588),
    inst!("break", 2, 0x9598),
    inst!("wdr", 2, 0x95a8),
    inst!("lpm", 2, 0x95c8),
    inst!("elpm", 2, 0x95d8),
    inst!("spm", 2, 0x95e8),
    inst!("spm", 2, 0x95f8, ZPostIncrement = 0x0000),

    inst!("adc", 2, 0x1c00, Register = 0x01f0, Register = 0x020f),
    inst!("add", 2, 0x0c00, Register = 0x01f0, Register = 0x020f),
    inst!("and", 2, 0x2000, Register = 0x01f0, Register = 0x020f),
    inst!("cp", 2, 0x1400, Register = 0x01f0, Register = 0x020f),
    inst!("cpc", 2, 0x0400, Register = 0x01f0, Register = 0x020f),
    inst!("cpse", 2, 0x1000, Register = 0x01f0, Register = 0x020f),
    inst!("eor", 2, 0x2400, Register = 0x01f0, Register = 0x020f),
    inst!("mov", 2, 0x2c00, Register = 0x01f0, Register = 0x020f),
    inst!("mul", 2, 0x9c00, Register = 0x01f0, Register = 0x020f),
    inst!("or", 2, 0x2800, Register = 0x01f0, Register = 0x020f),
    inst!("sbc", 2, 0x0800, Register = 0x01f0, Register = 0x020f),
    inst!("sub", 2, 0x1800, Register = 0x01f0, Register = 0x020f),

    inst!("movw", 2, 0x0100, RegisterPair = 0x00f0, RegisterPair = 0x000f),
    inst!("muls", 2, 0x0200, RegisterHigh = 0x00f0, RegisterHigh = 0x000f),
    inst!("mulsu", 2, 0x0300, RegisterHigh = 0x0070, RegisterHigh = 0x0007),
    inst!("fmul", 2, 0x0308, RegisterHigh = 0x0070, RegisterHigh = 0x0007),
    inst!("fmuls", 2, 0x0380, RegisterHigh = 0x0070, RegisterHigh = 0x0007),
    inst!("fmulsu", 2, 0x0388, RegisterHigh = 0x0070, RegisterHigh = 0x0007),

    inst!("ser", 2, 0xef0f, RegisterHigh = 0x00f0),
    inst!("ldi", 2, 0xe000, RegisterHigh = 0x00f0, Data = 0x0f0f),
    inst!("cpi", 2, 0x3000, RegisterHigh = 0x00f0, Data = 0x0f0f),
    inst!("sbci", 2, 0x4000, RegisterHigh = 0x00f0, Data = 0x0f0f),
    inst!("subi", 2, 0x5000, RegisterHigh = 0x00f0, Data = 0x0f0f),
    inst!("ori", 2, 0x6000, RegisterHigh = 0x00f0, Data = 0x0f0f),
    inst!("andi", 2, 0x7000, RegisterHigh = 0x00f0, Data = 0x0f0f),

    inst!("adiw", 2, 0x9600, RegisterPairHigh = 0x0030, Data = 0x00cf),
    inst!("sbiw", 2, 0x9700, RegisterPairHigh = 0x0030, Data = 0x00cf),

    inst!("com", 2, 0x9400, Register = 0x01f0),
    inst!("neg", 2, 0x9401, Register = 0x01f0),
    inst!("swap", 2, 0x9402, Register = 0x01f0),
    inst!("inc", 2, 0x9403, Register = 0x01f0),
    inst!("asr", 2, 0x9405, Register = 0x01f0),
    inst!("lsr", 2, 0x9406, Register = 0x01f0),
    inst!("ror", 2, 0x9407, Register = 0x01f0),
    inst!("dec", 2, 0x940a, Register = 0x01f0),
    inst!("des", 2, 0x940b, DesRound = 0x00f0),
    inst!("push", 2, 0x920f, Register = 0x01f0),
    inst!("pop", 2, 0x900f, Register = 0x01f0),

    inst!("xch", 2, 0x9204, Z = 0x0000, Register = 0x01f0),
    inst!("las", 2, 0x9205, Z = 0x0000, Register = 0x01f0),
    inst!("lac", 2, 0x9206, Z = 0x0000, Register = 0x01f0),
    inst!("lat", 2, 0x9207, Z = 0x0000, Register = 0x01f0),

    inst!("lds", 4, 0x9000, Register = 0x01f0, DataAddress = 0x0000),
    inst!("sts", 4, 0x9200, DataAddress = 0x0000, Register = 0x01f0),

    inst!("ld", 2, 0x900c, Register = 0x01f0, X = 0x0000),
    inst!("ld", 2, 0x900d, Register = 0x01f0, XPostIncrement = 0x0000),
    inst!("ld", 2, 0x900e, Register = 0x01f0, XPreDecrement = 0x0000),
    inst!("ld", 2, 0x8008, Register = 0x01f0, Y = 0x0000),
    inst!("ld", 2, 0x9009, Register = 0x01f0, YPostIncrement = 0x0000),
    inst!("ld", 2, 0x900a, Register = 0x01f0, YPreDecrement = 0x0000),
    inst!("ldd", 2, 0x8008, Register = 0x01f0, YDisplacement = 0x2c07),
    inst!("ld", 2, 0x8000, Register = 0x01f0, Z = 0x0000),
    inst!("ld", 2, 0x9001, Register = 0x01f0, ZPostIncrement = 0x0000),
    inst!("ld", 2, 0x9002, Register = 0x01f0, ZPreDecrement = 0x0000),
    inst!("ldd", 2, 0x8000, Register = 0x01f0, ZDisplacement = 0x2c07),

    inst!("st", 2, 0x920c, X = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x920d, XPostIncrement = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x920e, XPreDecrement = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x8208, Y = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x9209, YPostIncrement = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x920a, YPreDecrement = 0x0000, Register = 0x01f0),
    inst!("std", 2, 0x8208, YDisplacement = 0x2c07, Register = 0x01f0),
    inst!("st", 2, 0x8200, Z = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x9201, ZPostIncrement = 0x0000, Register = 0x01f0),
    inst!("st", 2, 0x9202, ZPreDecrement = 0x0000, Register = 0x01f0),
    inst!("std", 2, 0x8200, ZDisplacement = 0x2c07, Register = 0x01f0),

    inst!("lpm", 2, 0x9004, Register = 0x01f0, Z = 0x0000),
    inst!("lpm", 2, 0x9005, Register = 0x01f0, ZPostIncrement = 0x0000),
    inst!("elpm", 2, 0x9006, Register = 0x01f0, Z = 0x0000),
    inst!("elpm", 2, 0x9007, Register = 0x01f0, ZPostIncrement = 0x0000),

    inst!("in", 2, 0xb000, Register = 0x01f0, Io = 0x060f),
    inst!("out", 2, 0xb800, Io = 0x060f, Register = 0x01f0),
    inst!("cbi", 2, 0x9800, Io = 0x00f8, Bit = 0x0007),
    inst!("sbic", 2, 0x9900, Io = 0x00f8, Bit = 0x0007),
    inst!("sbi", 2, 0x9a00, Io = 0x00f8, Bit = 0x0007),
    inst!("sbis", 2, 0x9b00, Io = 0x00f8, Bit = 0x0007),

    inst!("bld", 2, 0xf800, Register = 0x01f0, Bit = 0x0007),
    inst!("bst", 2, 0xfa00, Register = 0x01f0, Bit = 0x0007),
    inst!("sbrc", 2, 0xfc00, Register = 0x01f0, Bit = 0x0007),
    inst!("sbrs", 2, 0xfe00, Register = 0x01f0, Bit = 0x0007),

    inst!("rjmp", 2, 0xc000, RelativeAddress = 0x0fff),
    inst!("rcall", 2, 0xd000, RelativeAddress = 0x0fff),
    inst!("jmp", 4, 0x940c, LongAbsoluteAddress = 0x01f1),
    inst!("call", 4, 0x940e, LongAbsoluteAddress = 0x01f1),

    // Conditional branch aliases of brbs/brbc.
    inst!("brcs", 2, 0xf000, BranchAddress = 0x03f8),
    inst!("breq", 2, 0xf001, BranchAddress = 0x03f8),
    inst!("brmi", 2, 0xf002, BranchAddress = 0x03f8),
    inst!("brvs", 2, 0xf003, BranchAddress = 0x03f8),
    inst!("brlt", 2, 0xf004, BranchAddress = 0x03f8),
    inst!("brhs", 2, 0xf005, BranchAddress = 0x03f8),
    inst!("brts", 2, 0xf006, BranchAddress = 0x03f8),
    inst!("brie", 2, 0xf007, BranchAddress = 0x03f8),
    inst!("brcc", 2, 0xf400, BranchAddress = 0x03f8),
    inst!("brne", 2, 0xf401, BranchAddress = 0x03f8),
    inst!("brpl", 2, 0xf402, BranchAddress = 0x03f8),
    inst!("brvc", 2, 0xf403, BranchAddress = 0x03f8),
    inst!("brge", 2, 0xf404, BranchAddress = 0x03f8),
    inst!("brhc", 2, 0xf405, BranchAddress = 0x03f8),
    inst!("brtc", 2, 0xf406, BranchAddress = 0x03f8),
    inst!("brid", 2, 0xf407, BranchAddress = 0x03f8),
];

/// Index entry standing for [`RAW_WORD`].
const CATCH_ALL: u8 = u8::MAX;

lazy_static! {
    /// Position in [`INSTRUCTION_SET`] of the match for every first word.
    static ref OPCODE_INDEX: Vec<u8> = (0..=u16::MAX)
        .map(|word| {
            INSTRUCTION_SET
                .iter()
                .position(|descriptor| descriptor.matches(word))
                .map_or(CATCH_ALL, |index| index as u8)
        })
        .collect();
}

/// Finds the descriptor of `word` by masked scan, without the index.
pub fn scan(word: u16) -> Option<&'static Descriptor> {
    masked_scan(&INSTRUCTION_SET, &RAW_WORD, word)
}

/// The AVR8 instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avr8;

impl InstructionSet for Avr8 {
    type Descriptor = Descriptor;

    const NAME: &'static str = "avr";
    const MAX_WIDTH: usize = 4;
    const UNIT: usize = 2;
    const ORIGIN_DIRECTIVE: &'static str = ".org";
    const END_DIRECTIVE: &'static str = ".exit";

    fn lookup(bytes: &[u8]) -> Option<&'static Descriptor> {
        let word = u16::from_le_bytes([*bytes.first()?, *bytes.get(1)?]);
        match *OPCODE_INDEX.get(usize::from(word))? {
            CATCH_ALL => RAW_WORD.matches(word).then_some(&RAW_WORD),
            index => INSTRUCTION_SET.get(usize::from(index)),
        }
    }

    fn fallback(available: usize) -> &'static Descriptor {
        if available >= 2 {
            &RAW_WORD
        } else {
            &RAW_BYTE
        }
    }

    fn decode_operands(descriptor: &Descriptor, opcode: &Opcode) -> Operands {
        let word = u16::from_le_bytes([opcode[0], opcode[1]]);
        let extension = i32::from(u16::from_le_bytes([opcode[2], opcode[3]]));
        let mut operands = Operands::default();

        for (value, field) in operands.iter_mut().zip(descriptor.operands) {
            let bits = i32::from(bits_from_mask(word, field.mask));
            *value = match field.kind {
                Operand::RegisterHigh => bits + 16,
                Operand::RegisterPair => bits * 2,
                Operand::RegisterPairHigh => bits * 2 + 24,
                Operand::BranchAddress | Operand::RelativeAddress => {
                    sign_extend(bits, field.mask.count_ones()) * 2
                }
                Operand::LongAbsoluteAddress => ((bits << 16) | extension) * 2,
                Operand::DataAddress => extension,
                Operand::RawWord => i32::from(word),
                Operand::RawByte => i32::from(opcode[0]),
                Operand::X
                | Operand::XPostIncrement
                | Operand::XPreDecrement
                | Operand::Y
                | Operand::YPostIncrement
                | Operand::YPreDecrement
                | Operand::Z
                | Operand::ZPostIncrement
                | Operand::ZPreDecrement => 0,
                Operand::Register
                | Operand::Io
                | Operand::Bit
                | Operand::DesRound
                | Operand::Data
                | Operand::YDisplacement
                | Operand::ZDisplacement => bits,
            };
        }
        operands
    }

    fn render_operand(
        instruction: &Instruction<Self>,
        index: usize,
        options: RenderOptions,
    ) -> Option<String> {
        let kind = instruction.descriptor().operands.get(index)?.kind;
        let value = *instruction.operands().get(index)?;
        Some(match kind {
            Operand::Register
            | Operand::RegisterHigh
            | Operand::RegisterPair
            | Operand::RegisterPairHigh => format!("R{value}"),
            Operand::Io => format!("${value:02x}"),
            Operand::Bit => format!("{value}"),
            Operand::DesRound => format!("0x{value:02x}"),
            Operand::Data => match options.radix {
                Radix::Hex => format!("0x{value:02x}"),
                Radix::Binary => format!("0b{value:08b}"),
                Radix::Decimal => format!("{value}"),
            },
            Operand::DataAddress => format!("0x{value:04x}"),
            Operand::LongAbsoluteAddress if options.assembly => label(value as u32),
            // word address outside of assembly listings
            Operand::LongAbsoluteAddress => format!("0x{:04x}", value / 2),
            Operand::BranchAddress | Operand::RelativeAddress if options.assembly => {
                label(instruction.relative_target(value))
            }
            Operand::BranchAddress | Operand::RelativeAddress => relative_offset(value),
            Operand::X => "X".to_owned(),
            Operand::XPostIncrement => "X+".to_owned(),
            Operand::XPreDecrement => "-X".to_owned(),
            Operand::Y => "Y".to_owned(),
            Operand::YPostIncrement => "Y+".to_owned(),
            Operand::YPreDecrement => "-Y".to_owned(),
            Operand::YDisplacement => format!("Y+{value}"),
            Operand::Z => "Z".to_owned(),
            Operand::ZPostIncrement => "Z+".to_owned(),
            Operand::ZPreDecrement => "-Z".to_owned(),
            Operand::ZDisplacement => format!("Z+{value}"),
            Operand::RawWord => format!("0x{value:04x}"),
            Operand::RawByte => format!("0x{value:02x}"),
        })
    }

    fn is_relative(descriptor: &Descriptor, index: usize) -> bool {
        descriptor.operands.get(index).map_or(false, |field| {
            matches!(
                field.kind,
                Operand::BranchAddress | Operand::RelativeAddress
            )
        })
    }

    fn format_address(address: u32) -> String {
        format!("0x{address:04x}")
    }

    fn format_destination(address: u32) -> String {
        format!("0x{address:x}")
    }
}

/// Sign extends the `width` bit two's complement value `bits`.
fn sign_extend(bits: i32, width: u32) -> i32 {
    let shift = 32 - width;
    (bits << shift) >> shift
}
