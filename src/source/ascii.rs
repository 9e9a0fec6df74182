use std::io::BufRead;

use super::{hex_bytes, ByteSource, Lines, Pending};
use crate::error::SourceError;
use crate::window::ByteRecord;

/// Whitespace separated hex bytes, e.g. `0c 94 34 00`, loaded at address 0
#[derive(Debug)]
pub struct AsciiHex<R> {
    lines: Lines<R>,
    pending: Pending,
    address: u32,
}

impl<R: BufRead> AsciiHex<R> {
    /// Creates a source over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            pending: Pending::default(),
            address: 0,
        }
    }
}

impl<R: BufRead> ByteSource for AsciiHex<R> {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        loop {
            if let Some(record) = self.pending.take() {
                return Some(Ok(record));
            }
            let (line, text) = match self.lines.next_line()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            let mut bytes = Vec::new();
            for token in text.split_whitespace() {
                let token = token.trim_start_matches("0x").trim_start_matches("0X");
                match hex_bytes(token) {
                    Ok(values) => bytes.extend(values),
                    Err(kind) => return Some(Err(SourceError::Record { line, kind })),
                }
            }
            let base = self.address;
            self.address = self.address.wrapping_add(bytes.len() as u32);
            self.pending.load(base, bytes);
        }
    }
}
