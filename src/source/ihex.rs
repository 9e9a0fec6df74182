use std::io::BufRead;

use tracing::debug;

use super::{hex_bytes, ByteSource, Lines, Pending};
use crate::error::{RecordError, SourceError};
use crate::window::ByteRecord;

const DATA: u8 = 0x00;
const END_OF_FILE: u8 = 0x01;
const EXTENDED_SEGMENT_ADDRESS: u8 = 0x02;
const START_SEGMENT_ADDRESS: u8 = 0x03;
const EXTENDED_LINEAR_ADDRESS: u8 = 0x04;
const START_LINEAR_ADDRESS: u8 = 0x05;

/// Intel HEX records
#[derive(Debug)]
pub struct IntelHex<R> {
    lines: Lines<R>,
    pending: Pending,
    base: u32,
    finished: bool,
}

impl<R: BufRead> IntelHex<R> {
    /// Creates a source over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            pending: Pending::default(),
            base: 0,
            finished: false,
        }
    }

    fn record(&mut self, line: usize, text: &str) -> Result<(), RecordError> {
        let body = text
            .strip_prefix(':')
            .ok_or(RecordError::MissingStart(':'))?;
        let bytes = hex_bytes(body)?;
        if bytes.len() < 5 || bytes.len() != usize::from(bytes[0]) + 5 {
            return Err(RecordError::Length);
        }

        let (contents, checksum) = bytes.split_at(bytes.len() - 1);
        let expected = contents
            .iter()
            .fold(0u8, |sum, byte| sum.wrapping_add(*byte))
            .wrapping_neg();
        if expected != checksum[0] {
            return Err(RecordError::Checksum {
                expected,
                found: checksum[0],
            });
        }

        let offset = u32::from(u16::from_be_bytes([contents[1], contents[2]]));
        let data = &contents[4..];
        match contents[3] {
            DATA => self
                .pending
                .load(self.base.wrapping_add(offset), data.to_vec()),
            END_OF_FILE => {
                debug!(line, "intel hex end of file record");
                self.finished = true;
            }
            EXTENDED_SEGMENT_ADDRESS if data.len() == 2 => {
                self.base = u32::from(u16::from_be_bytes([data[0], data[1]])) << 4;
                debug!(line, base = self.base, "intel hex segment base");
            }
            EXTENDED_LINEAR_ADDRESS if data.len() == 2 => {
                self.base = u32::from(u16::from_be_bytes([data[0], data[1]])) << 16;
                debug!(line, base = self.base, "intel hex linear base");
            }
            EXTENDED_SEGMENT_ADDRESS | EXTENDED_LINEAR_ADDRESS => return Err(RecordError::Length),
            START_SEGMENT_ADDRESS | START_LINEAR_ADDRESS => {}
            other => return Err(RecordError::UnsupportedType(other)),
        }
        Ok(())
    }
}

impl<R: BufRead> ByteSource for IntelHex<R> {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        loop {
            if let Some(record) = self.pending.take() {
                return Some(Ok(record));
            }
            if self.finished {
                return None;
            }
            let (line, text) = match self.lines.next_line()? {
                Ok((line, text)) => (line, text.to_owned()),
                Err(err) => return Some(Err(err)),
            };
            if let Err(kind) = self.record(line, &text) {
                return Some(Err(SourceError::Record { line, kind }));
            }
        }
    }
}
