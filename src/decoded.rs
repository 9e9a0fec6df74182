//! Values produced by the disassembly engine and their text forms

use crate::isa::{Descriptor, InstructionSet, Opcode, Operands};

/// Numeric base used for data literals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Radix {
    /// Hexadecimal
    #[default]
    Hex,
    /// Binary
    Binary,
    /// Decimal
    Decimal,
}

/// Options that change how a single operand is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render branch targets as `A_xxxx` labels
    pub assembly: bool,
    /// Base for data literals
    pub radix: Radix,
}

/// A pseudo-instruction produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Decoding continues at the given address
    Origin(u32),
    /// The input is exhausted
    End,
}

impl Directive {
    /// Directive name in the syntax of `A`.
    pub fn name<A: InstructionSet>(&self) -> &'static str {
        match self {
            Self::Origin(_) => A::ORIGIN_DIRECTIVE,
            Self::End => A::END_DIRECTIVE,
        }
    }

    /// The address carried by an origin directive.
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Origin(address) => Some(*address),
            Self::End => None,
        }
    }

    /// Number of operands.
    pub fn operand_count(&self) -> usize {
        match self {
            Self::Origin(_) => 1,
            Self::End => 0,
        }
    }

    /// Rendered operand `index`.
    pub fn operand<A: InstructionSet>(&self, index: usize) -> Option<String> {
        match (self, index) {
            (Self::Origin(address), 0) => Some(A::format_address(*address)),
            _ => None,
        }
    }
}

/// A decoded machine instruction
///
/// Owns copies of its opcode bytes and operand values, so it stays valid
/// after the engine moves on.
#[derive(Debug)]
pub struct Instruction<A: InstructionSet> {
    address: u32,
    opcode: Opcode,
    descriptor: &'static A::Descriptor,
    operands: Operands,
}

impl<A: InstructionSet> Clone for Instruction<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: InstructionSet> Copy for Instruction<A> {}

impl<A: InstructionSet> Instruction<A> {
    /// Decodes `descriptor` at `address` from the padded `opcode` bytes.
    pub fn decode(address: u32, descriptor: &'static A::Descriptor, mut opcode: Opcode) -> Self {
        for byte in opcode.iter_mut().skip(descriptor.width()) {
            *byte = 0;
        }
        let operands = A::decode_operands(descriptor, &opcode);
        Self {
            address,
            opcode,
            descriptor,
            operands,
        }
    }

    /// Address of the first byte.
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        self.descriptor.width()
    }

    /// The matched table entry.
    pub fn descriptor(&self) -> &'static A::Descriptor {
        self.descriptor
    }

    /// Opcode bytes in memory order.
    pub fn opcodes(&self) -> &[u8] {
        &self.opcode[..self.width()]
    }

    /// Mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        self.descriptor.mnemonic()
    }

    /// Number of operands.
    pub fn operand_count(&self) -> usize {
        self.descriptor.operand_count()
    }

    /// Decoded operand values.
    pub fn operands(&self) -> &[i32] {
        &self.operands[..self.operand_count()]
    }

    /// Rendered operand `index`, `None` past the last shown operand.
    pub fn operand(&self, index: usize, options: RenderOptions) -> Option<String> {
        if index >= self.operand_count() {
            return None;
        }
        A::render_operand(self, index, options)
    }

    /// All rendered operands, stopping at the first one with no text.
    pub fn rendered_operands(&self, options: RenderOptions) -> Vec<String> {
        (0..self.operand_count())
            .map_while(|index| self.operand(index, options))
            .collect()
    }

    /// Address label definition, e.g. `A_0004:`.
    pub fn address_label(&self) -> String {
        format!("{}:", label(self.address))
    }

    /// Address column, e.g. `   4:`.
    pub fn address_text(&self) -> String {
        format!("{:4x}:", self.address)
    }

    /// Opcode bytes, last byte first, padded to the widest instruction.
    pub fn opcode_text(&self) -> String {
        let mut text = String::with_capacity(A::MAX_WIDTH * 3);
        for (i, byte) in self.opcodes().iter().rev().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&format!("{byte:02x}"));
        }
        let width = A::MAX_WIDTH * 3 - 1;
        format!("{text:width$}")
    }

    /// Absolute target of the first relative operand.
    pub fn destination(&self) -> Option<u32> {
        (0..self.operand_count())
            .find(|&index| A::is_relative(self.descriptor, index))
            .map(|index| self.relative_target(self.operands[index]))
    }

    /// Destination comment, e.g. `; 0x0c08`.
    pub fn comment(&self) -> Option<String> {
        self.destination()
            .map(|address| format!("; {}", A::format_destination(address)))
    }

    /// Absolute address of a relative `offset` taken by this instruction.
    pub fn relative_target(&self, offset: i32) -> u32 {
        self.address
            .wrapping_add(A::branch_base(self.width()))
            .wrapping_add(offset as u32)
    }
}

/// Label text for `address`, e.g. `A_0501`.
pub fn label(address: u32) -> String {
    format!("A_{address:04x}")
}

/// An instruction or a directive
#[derive(Debug)]
pub enum DecodedValue<A: InstructionSet> {
    /// A machine instruction, or raw data that could not be decoded
    Instruction(Instruction<A>),
    /// An origin or end directive
    Directive(Directive),
}

impl<A: InstructionSet> Clone for DecodedValue<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: InstructionSet> Copy for DecodedValue<A> {}

impl<A: InstructionSet> DecodedValue<A> {
    /// Mnemonic or directive name.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Instruction(instruction) => instruction.mnemonic(),
            Self::Directive(directive) => directive.name::<A>(),
        }
    }

    /// Number of operands.
    pub fn operand_count(&self) -> usize {
        match self {
            Self::Instruction(instruction) => instruction.operand_count(),
            Self::Directive(directive) => directive.operand_count(),
        }
    }

    /// Rendered operand `index`.
    pub fn operand(&self, index: usize, options: RenderOptions) -> Option<String> {
        match self {
            Self::Instruction(instruction) => instruction.operand(index, options),
            Self::Directive(directive) => directive.operand::<A>(index),
        }
    }

    /// The instruction, if this is one.
    pub fn instruction(&self) -> Option<&Instruction<A>> {
        match self {
            Self::Instruction(instruction) => Some(instruction),
            Self::Directive(_) => None,
        }
    }

    /// The directive, if this is one.
    pub fn directive(&self) -> Option<Directive> {
        match self {
            Self::Instruction(_) => None,
            Self::Directive(directive) => Some(*directive),
        }
    }
}

impl<A: InstructionSet> From<Instruction<A>> for DecodedValue<A> {
    fn from(instruction: Instruction<A>) -> Self {
        Self::Instruction(instruction)
    }
}

impl<A: InstructionSet> From<Directive> for DecodedValue<A> {
    fn from(directive: Directive) -> Self {
        Self::Directive(directive)
    }
}

/// Renders a relative offset as `.+n` or `.-n`.
pub(crate) fn relative_offset(offset: i32) -> String {
    if offset >= 0 {
        format!(".+{offset}")
    } else {
        format!(".{offset}")
    }
}
