use std::io::BufRead;

use tracing::debug;

use super::{hex_bytes, ByteSource, Lines, Pending};
use crate::error::{RecordError, SourceError};
use crate::window::ByteRecord;

/// Motorola S-Records
#[derive(Debug)]
pub struct SRecord<R> {
    lines: Lines<R>,
    pending: Pending,
    finished: bool,
}

impl<R: BufRead> SRecord<R> {
    /// Creates a source over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            pending: Pending::default(),
            finished: false,
        }
    }

    fn record(&mut self, line: usize, text: &str) -> Result<(), RecordError> {
        let body = text.strip_prefix('S').ok_or(RecordError::MissingStart('S'))?;
        let kind = body
            .chars()
            .next()
            .and_then(|kind| kind.to_digit(10))
            .ok_or(RecordError::InvalidHex)? as u8;
        let address_width = match kind {
            0 | 1 | 5 | 9 => 2,
            2 | 6 | 8 => 3,
            3 | 7 => 4,
            other => return Err(RecordError::UnsupportedType(other)),
        };

        let bytes = hex_bytes(&body[1..])?;
        if bytes.len() < address_width + 2 || bytes.len() != usize::from(bytes[0]) + 1 {
            return Err(RecordError::Length);
        }

        let (contents, checksum) = bytes.split_at(bytes.len() - 1);
        let expected = !contents
            .iter()
            .fold(0u8, |sum, byte| sum.wrapping_add(*byte));
        if expected != checksum[0] {
            return Err(RecordError::Checksum {
                expected,
                found: checksum[0],
            });
        }

        let (address, data) = contents[1..].split_at(address_width);
        let address = address
            .iter()
            .fold(0u32, |acc, byte| acc << 8 | u32::from(*byte));
        match kind {
            1..=3 => self.pending.load(address, data.to_vec()),
            7..=9 => {
                debug!(line, entry = address, "s-record termination");
                self.finished = true;
            }
            _ => debug!(line, kind, "s-record skipped"),
        }
        Ok(())
    }
}

impl<R: BufRead> ByteSource for SRecord<R> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Result<Vec<ByteRecord>, SourceError> {
        let mut source = SRecord::new(text.as_bytes());
        std::iter::from_fn(|| source.read()).collect()
    }

    #[test]
    fn reads_s1_records() {
        let records = collect("S00600004844521B\nS1050100AABB94\nS9030000FC\n").unwrap();
        assert_eq!(
            records,
            vec![ByteRecord::new(0xaa, 0x100), ByteRecord::new(0xbb, 0x101)]
        );
    }

    #[test]
    fn reads_s3_records() {
        let records = collect("S3060001000012E6\n").unwrap();
        assert_eq!(records, vec![ByteRecord::new(0x12, 0x10000)]);
    }

    #[test]
    fn rejects_bad_checksum() {
        let err = collect("S1050100AABB95\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Record {
                line: 1,
                kind: RecordError::Checksum {
                    expected: 0x94,
                    found: 0x95
                }
            }
        ));
    }

    #[test]
    fn rejects_reserved_record_type() {
        let err = collect("S4030000FC\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Record {
                kind: RecordError::UnsupportedType(4),
                ..
            }
        ));
    }
}
