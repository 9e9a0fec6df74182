//! Line oriented text output of a disassembly stream

use std::io::Write;

use crate::decoded::{DecodedValue, Radix, RenderOptions};
use crate::disasm::Disassembler;
use crate::error::Error;
use crate::isa::InstructionSet;
use crate::source::ByteSource;

bitflags::bitflags! {
    /// Columns and modes of the text output
    pub struct PrintFlags: u8 {
        /// Prefix instructions with their address
        const ADDRESSES = 1 << 0;
        /// Show the raw opcode bytes
        const OPCODES = 1 << 1;
        /// Append `; <address>` to relative branches
        const DESTINATION_COMMENT = 1 << 2;
        /// Emit assembler-ready text: labels, directives, label operands
        const ASSEMBLY = 1 << 3;
    }
}

impl Default for PrintFlags {
    fn default() -> Self {
        Self::ADDRESSES | Self::OPCODES | Self::DESTINATION_COMMENT
    }
}

/// Configuration of a [`Formatter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Enabled columns and modes
    pub flags: PrintFlags,
    /// Base of data literals
    pub radix: Radix,
}

impl FormatOptions {
    fn render(&self) -> RenderOptions {
        RenderOptions {
            assembly: self.flags.contains(PrintFlags::ASSEMBLY),
            radix: self.radix,
        }
    }
}

/// Errors produced while printing a disassembly stream
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The disassembly stream failed
    #[error("error in disassembly stream")]
    Decode(#[from] Error),

    /// Writing the output failed
    #[error("error writing output")]
    IO(#[from] std::io::Error),
}

/// Renders one value as a complete output line.
///
/// Directives only produce a line in assembly mode.
pub fn format_line<A: InstructionSet>(
    value: &DecodedValue<A>,
    options: &FormatOptions,
) -> Option<String> {
    let render = options.render();
    match value {
        DecodedValue::Directive(directive) => {
            if !render.assembly {
                return None;
            }
            let operand = directive.operand::<A>(0).unwrap_or_default();
            Some(format!("\t{}\t{}\n", directive.name::<A>(), operand))
        }
        DecodedValue::Instruction(instruction) => {
            let mut line = String::new();
            if render.assembly {
                line.push_str(&instruction.address_label());
                line.push('\t');
            } else if options.flags.contains(PrintFlags::ADDRESSES) {
                line.push_str(&instruction.address_text());
                line.push('\t');
            }
            if options.flags.contains(PrintFlags::OPCODES) {
                line.push_str(&instruction.opcode_text());
                line.push('\t');
            }
            line.push_str(instruction.mnemonic());
            line.push('\t');
            line.push_str(&instruction.rendered_operands(render).join(", "));
            if options.flags.contains(PrintFlags::DESTINATION_COMMENT) {
                if let Some(comment) = instruction.comment() {
                    line.push('\t');
                    line.push_str(&comment);
                }
            }
            line.push('\n');
            Some(line)
        }
    }
}

/// Writes a disassembly stream as text, one line per value
#[derive(Debug)]
pub struct Formatter<A: InstructionSet, S> {
    disassembler: Disassembler<A, S>,
    options: FormatOptions,
}

impl<A: InstructionSet, S: ByteSource> Formatter<A, S> {
    /// Creates a formatter over `disassembler`.
    pub fn new(disassembler: Disassembler<A, S>, options: FormatOptions) -> Self {
        Self {
            disassembler,
            options,
        }
    }

    /// The formatter configuration.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Prints the next value, `None` once the stream has ended.
    pub fn write_next<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
    ) -> Option<Result<(), FormatError>> {
        let value = match self.disassembler.read()? {
            Ok(value) => value,
            Err(err) => return Some(Err(err.into())),
        };
        match format_line(&value, &self.options) {
            Some(line) => Some(out.write_all(line.as_bytes()).map_err(FormatError::from)),
            None => Some(Ok(())),
        }
    }

    /// Prints the whole stream.
    pub fn write_all<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), FormatError> {
        while let Some(result) = self.write_next(out) {
            result?;
        }
        out.flush()?;
        Ok(())
    }

    /// Releases the underlying byte source.
    pub fn close(self) -> Result<(), FormatError> {
        self.disassembler.close()?;
        Ok(())
    }
}
