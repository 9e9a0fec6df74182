//! Streaming disassembly of 8051, AVR8 and PIC firmware
//!
//! Bytes come from a [`ByteSource`] (Intel HEX, S-Records, Atmel generic,
//! raw binary, ASCII hex or an ELF `.text` section), are decoded one
//! instruction at a time by a [`Disassembler`] for a given
//! [`InstructionSet`], and can be printed by a [`Formatter`].
//!
//! # Example
//!
//! ## Decode AVR8 machine code
//!
//! ```
//! # use mcu_disasm::{avr::Avr8, ByteRecords, DecodedValue, Disassembler, RenderOptions};
//! let source = ByteRecords::contiguous(0, &[0x0f, 0xef, 0xfd, 0xcf]);
//! let mut disassembler = Disassembler::<Avr8, _>::new(source);
//!
//! while let Some(value) = disassembler.read() {
//!     if let DecodedValue::Instruction(instruction) = value.unwrap() {
//!         let operands = instruction.rendered_operands(RenderOptions::default());
//!         println!("{} {}", instruction.mnemonic(), operands.join(", "));
//!     }
//! }
//! ```
//!
//! ## Print an Intel HEX file
//!
//! ```
//! # use mcu_disasm::{_8051::Mcs51, Disassembler, FormatOptions, Formatter, IntelHex};
//! let hex = ":03000000020100FA\n:00000001FF\n";
//! let source = IntelHex::new(hex.as_bytes());
//! let mut formatter = Formatter::new(Disassembler::<Mcs51, _>::new(source), FormatOptions::default());
//!
//! let mut out = Vec::new();
//! formatter.write_all(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "   0:\t00 01 02\tljmp\t00100h\n");
//! ```

#![warn(missing_docs)]

mod arch;
pub mod decoded;
pub mod disasm;
pub mod error;
pub mod format;
pub mod isa;
pub mod source;
pub mod window;

pub use arch::*;
pub use decoded::{DecodedValue, Directive, Instruction, Radix, RenderOptions};
pub use disasm::Disassembler;
pub use error::{Error, InternalError, RecordError, SourceError};
pub use format::{FormatError, FormatOptions, Formatter, PrintFlags};
pub use isa::{Descriptor, InstructionSet};
pub use source::{AsciiHex, AtmelGeneric, Binary, ByteRecords, ByteSource, FileType, IntelHex, SRecord};
#[cfg(feature = "elf")]
pub use source::Elf;
pub use window::ByteRecord;

/// Architectures known by this crate
#[non_exhaustive]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Architecture {
    /// The Intel 8051 ISA
    #[cfg(feature = "8051")]
    _8051,

    /// The Atmel AVR8 ISA
    #[cfg(feature = "avr")]
    Avr,

    /// Baseline 12-bit PIC cores
    #[cfg(feature = "pic")]
    PicBaseline,

    /// Midrange 14-bit PIC cores
    #[cfg(feature = "pic")]
    PicMidrange,

    /// Enhanced midrange 14-bit PIC cores
    #[cfg(feature = "pic")]
    PicEnhanced,

    /// PIC18 cores
    #[cfg(feature = "pic")]
    Pic18,
}

impl Architecture {
    /// Every enabled architecture.
    pub const ALL: &'static [Architecture] = &[
        #[cfg(feature = "8051")]
        Self::_8051,
        #[cfg(feature = "avr")]
        Self::Avr,
        #[cfg(feature = "pic")]
        Self::PicBaseline,
        #[cfg(feature = "pic")]
        Self::PicMidrange,
        #[cfg(feature = "pic")]
        Self::PicEnhanced,
        #[cfg(feature = "pic")]
        Self::Pic18,
    ];

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match *self {
            #[cfg(feature = "8051")]
            Self::_8051 => _8051::Mcs51::NAME,
            #[cfg(feature = "avr")]
            Self::Avr => avr::Avr8::NAME,
            #[cfg(feature = "pic")]
            Self::PicBaseline => pic::Baseline::NAME,
            #[cfg(feature = "pic")]
            Self::PicMidrange => pic::Midrange::NAME,
            #[cfg(feature = "pic")]
            Self::PicEnhanced => pic::Enhanced::NAME,
            #[cfg(feature = "pic")]
            Self::Pic18 => pic::Pic18::NAME,
        }
    }
}

impl std::str::FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|arch| arch.name() == s)
            .ok_or_else(|| format!("unknown architecture '{s}'"))
    }
}

#[doc(inline)]
pub use decode::Decoder;

/// Decoder related things
pub mod decode {
    /// A instruction decoder
    pub trait Decoder {
        /// The instruction produced by this decoder
        type Instruction: core::fmt::Debug;

        /// Errors produced during decoding
        type Error: core::fmt::Debug + std::error::Error;

        /// Decode a instruction
        fn decode(&mut self) -> Option<Result<Self::Instruction, Self::Error>>;

        /// Turn this decoder into a [`Iterator`] yielding `Result<Self::Instruction, Self::Error>`
        fn into_iter(self) -> Iter<Self>
        where
            Self: Sized,
        {
            Iter(self)
        }
    }

    /// A [`Decoder`] as [`Iterator`]
    /// See [`Decoder::into_iter`] for more info
    pub struct Iter<D>(D);

    impl<D: Decoder> Iterator for Iter<D> {
        type Item = Result<D::Instruction, D::Error>;

        fn next(&mut self) -> Option<Self::Item> {
            self.0.decode()
        }
    }
}
