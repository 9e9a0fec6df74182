//! Byte sources feeding the disassembler
//!
//! A [`ByteSource`] yields `(byte, address)` pairs in program order.
//! Constructing a source is its initialisation step; [`ByteSource::close`]
//! releases it.

use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use crate::error::{RecordError, SourceError};
use crate::window::ByteRecord;

mod ascii;
mod binary;
#[cfg(feature = "elf")]
mod elf;
mod generic;
mod ihex;
mod srec;

pub use ascii::AsciiHex;
pub use binary::Binary;
#[cfg(feature = "elf")]
pub use elf::Elf;
pub use generic::AtmelGeneric;
pub use ihex::IntelHex;
pub use srec::SRecord;

/// A producer of program bytes and their addresses
pub trait ByteSource {
    /// Reads the next byte, `None` at the end of input.
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>>;

    /// Releases any resources held by the source.
    fn close(&mut self) -> Result<(), SourceError> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        (**self).read()
    }

    fn close(&mut self) -> Result<(), SourceError> {
        (**self).close()
    }
}

/// An in-memory list of byte records
#[derive(Debug, Clone, Default)]
pub struct ByteRecords {
    records: std::vec::IntoIter<ByteRecord>,
}

impl ByteRecords {
    /// Bytes at arbitrary addresses.
    pub fn new(records: impl IntoIterator<Item = ByteRecord>) -> Self {
        Self {
            records: records.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }

    /// Contiguous bytes starting at `base`.
    pub fn contiguous(base: u32, bytes: &[u8]) -> Self {
        Self::new(
            bytes
                .iter()
                .zip(0u32..)
                .map(|(&value, offset)| ByteRecord::new(value, base.wrapping_add(offset))),
        )
    }

    /// Number of records not read yet.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl FromIterator<(u8, u32)> for ByteRecords {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(value, address)| ByteRecord::new(value, address)),
        )
    }
}

impl ByteSource for ByteRecords {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        self.records.next().map(Ok)
    }
}

/// Input container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Atmel generic `AAAAAA:DDDD` word records
    Generic,
    /// Intel HEX
    IntelHex,
    /// Motorola S-Record
    SRecord,
    /// Raw binary loaded at address 0
    Binary,
    /// Whitespace separated hex bytes loaded at address 0
    Ascii,
    /// The `.text` section of an ELF file
    #[cfg(feature = "elf")]
    Elf,
}

impl FileType {
    /// Guesses the container from the first byte of the input.
    pub fn detect(first: u8) -> Result<Self, SourceError> {
        match first {
            b':' => Ok(Self::IntelHex),
            b'S' => Ok(Self::SRecord),
            byte if byte.is_ascii_hexdigit() => Ok(Self::Generic),
            #[cfg(feature = "elf")]
            0x7f => Ok(Self::Elf),
            byte => Err(SourceError::UnknownFileType(byte)),
        }
    }

    /// Opens `reader` as a byte source of this type.
    pub fn open<R: Read + 'static>(self, reader: R) -> Result<Box<dyn ByteSource>, SourceError> {
        let reader = BufReader::new(reader);
        Ok(match self {
            Self::Generic => Box::new(AtmelGeneric::new(reader)),
            Self::IntelHex => Box::new(IntelHex::new(reader)),
            Self::SRecord => Box::new(SRecord::new(reader)),
            Self::Binary => Box::new(Binary::new(reader)),
            Self::Ascii => Box::new(AsciiHex::new(reader)),
            #[cfg(feature = "elf")]
            Self::Elf => Box::new(Elf::from_reader(reader)?),
        })
    }

    /// Detects the type from the buffered input and opens it.
    pub fn open_detected<R: BufRead + 'static>(
        mut reader: R,
    ) -> Result<Box<dyn ByteSource>, SourceError> {
        let first = *reader.fill_buf()?.first().ok_or(SourceError::EmptyInput)?;
        Self::detect(first)?.open(reader)
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(Self::Generic),
            "ihex" => Ok(Self::IntelHex),
            "srec" => Ok(Self::SRecord),
            "binary" => Ok(Self::Binary),
            "ascii" => Ok(Self::Ascii),
            #[cfg(feature = "elf")]
            "elf" => Ok(Self::Elf),
            other => Err(format!("unknown file type '{other}'")),
        }
    }
}

/// Line-oriented reader shared by the text containers.
#[derive(Debug)]
pub(crate) struct Lines<R> {
    reader: R,
    buffer: String,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
        }
    }

    /// The next non-empty line, trimmed, with its one-based number.
    pub(crate) fn next_line(&mut self) -> Option<Result<(usize, &str), SourceError>> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(err) => return Some(Err(err.into())),
            }
            if !self.buffer.trim().is_empty() {
                return Some(Ok((self.line, self.buffer.trim())));
            }
        }
    }
}

/// Decodes pairs of hex digits.
pub(crate) fn hex_bytes(text: &str) -> Result<Vec<u8>, RecordError> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(RecordError::Length);
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(RecordError::InvalidHex)
        })
        .collect()
}

/// Bytes of the current record still waiting to be handed out.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    bytes: Vec<u8>,
    base: u32,
    next: usize,
}

impl Pending {
    pub(crate) fn load(&mut self, base: u32, bytes: Vec<u8>) {
        self.bytes = bytes;
        self.base = base;
        self.next = 0;
    }

    pub(crate) fn take(&mut self) -> Option<ByteRecord> {
        let value = *self.bytes.get(self.next)?;
        let address = self.base.wrapping_add(self.next as u32);
        self.next += 1;
        Some(ByteRecord::new(value, address))
    }
}
