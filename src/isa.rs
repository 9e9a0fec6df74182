//! Instruction-set strategies
//!
//! Every supported architecture is a zero-sized type implementing
//! [`InstructionSet`]. The engine in [`crate::Disassembler`] is written once
//! against this trait; the tables, operand decoding and operand rendering
//! live in the modules under `arch/`.

use std::fmt;

use crate::decoded::{Instruction, RenderOptions};
use crate::window::MAX_WINDOW;

/// Most operands any descriptor carries.
pub const MAX_OPERANDS: usize = 3;

/// Decoded operand values, unused slots are zero.
pub type Operands = [i32; MAX_OPERANDS];

/// Opcode bytes of an instruction, zero padded.
pub type Opcode = [u8; MAX_WINDOW];

/// Static description of one instruction encoding
pub trait Descriptor: fmt::Debug + Sync + 'static {
    /// Lower-case mnemonic, or the raw data directive for fallbacks
    fn mnemonic(&self) -> &'static str;

    /// Encoded width in bytes
    fn width(&self) -> usize;

    /// Number of operands
    fn operand_count(&self) -> usize;
}

/// Architecture specific strategy plugged into the engine
pub trait InstructionSet: fmt::Debug + Clone + Copy + 'static {
    /// Descriptor table entry type
    type Descriptor: Descriptor;

    /// Human readable name
    const NAME: &'static str;

    /// Longest instruction, which is also the lookahead window capacity
    const MAX_WIDTH: usize;

    /// Smallest decodable unit in bytes
    const UNIT: usize;

    /// Name of the origin directive
    const ORIGIN_DIRECTIVE: &'static str;

    /// Name of the end directive
    const END_DIRECTIVE: &'static str;

    /// Finds the descriptor for the encoding starting at `bytes[0]`.
    ///
    /// `bytes` holds at least [`Self::UNIT`] bytes. `None` means the tables
    /// are malformed.
    fn lookup(bytes: &[u8]) -> Option<&'static Self::Descriptor>;

    /// Raw data descriptor covering at most `available` (at least one) bytes.
    fn fallback(available: usize) -> &'static Self::Descriptor;

    /// Decodes the operand values of `descriptor` from its opcode bytes.
    fn decode_operands(descriptor: &Self::Descriptor, opcode: &Opcode) -> Operands;

    /// Renders operand `index`, `None` once there are no more to show.
    fn render_operand(
        instruction: &Instruction<Self>,
        index: usize,
        options: RenderOptions,
    ) -> Option<String>;

    /// Whether operand `index` is a relative branch offset.
    fn is_relative(descriptor: &Self::Descriptor, index: usize) -> bool;

    /// Value a relative offset is added to, on top of the instruction address.
    fn branch_base(width: usize) -> u32 {
        width as u32
    }

    /// Renders a plain address, as used by the origin directive.
    fn format_address(address: u32) -> String;

    /// Renders the address in a destination comment.
    fn format_destination(address: u32) -> String;
}

/// A typed operand slot of a masked 16-bit encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<K> {
    /// How the extracted bits are interpreted
    pub kind: K,
    /// Bits of the first instruction word that hold the operand
    pub mask: u16,
}

/// Descriptor of an encoding matched by bit masks over its first word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordDescriptor<K: 'static> {
    /// Mnemonic
    pub mnemonic: &'static str,
    /// Width in bytes
    pub width: usize,
    /// Fixed opcode bits
    pub bits: u16,
    /// Bits ignored by the processor
    pub dont_care: u16,
    /// Operand fields
    pub operands: &'static [Field<K>],
}

impl<K> WordDescriptor<K> {
    /// OR of all operand masks.
    pub fn operand_mask(&self) -> u16 {
        self.operands.iter().fold(0, |acc, field| acc | field.mask)
    }

    /// Whether `word` is an encoding of this descriptor.
    pub fn matches(&self, word: u16) -> bool {
        word & !self.dont_care & !self.operand_mask() == self.bits
    }
}

impl<K: fmt::Debug + Sync + 'static> Descriptor for WordDescriptor<K> {
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

/// First descriptor of `table` matching `word`, else `catch_all` if it matches.
pub fn masked_scan<K>(
    table: &'static [WordDescriptor<K>],
    catch_all: &'static WordDescriptor<K>,
    word: u16,
) -> Option<&'static WordDescriptor<K>> {
    table
        .iter()
        .chain(std::iter::once(catch_all))
        .find(|descriptor| descriptor.matches(word))
}

/// Gathers the bits of `data` selected by `mask` into a right-justified value.
///
/// The lowest set bit of `mask` becomes bit 0 of the result, the next set
/// bit becomes bit 1 and so on.
pub fn bits_from_mask(data: u16, mask: u16) -> u16 {
    let mut result = 0;
    let mut position = 0;
    for bit in 0..16 {
        if mask & (1 << bit) != 0 {
            if data & (1 << bit) != 0 {
                result |= 1 << position;
            }
            position += 1;
        }
    }
    result
}
