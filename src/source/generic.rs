use std::io::BufRead;

use super::{hex_bytes, ByteSource, Lines, Pending};
use crate::error::{RecordError, SourceError};
use crate::window::ByteRecord;

/// Atmel generic records, one `AAAAAA:DDDD` word per line
///
/// The address counts 16-bit words; each word is handed out low byte first.
#[derive(Debug)]
pub struct AtmelGeneric<R> {
    lines: Lines<R>,
    pending: Pending,
}

impl<R: BufRead> AtmelGeneric<R> {
    /// Creates a source over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            pending: Pending::default(),
        }
    }
}

fn parse(text: &str) -> Result<(u32, [u8; 2]), RecordError> {
    let (address, data) = text.split_once(':').ok_or(RecordError::MissingSeparator)?;
    if address.len() != 6 || data.len() != 4 {
        return Err(RecordError::Length);
    }
    let address = hex_bytes(address)?
        .iter()
        .fold(0u32, |acc, byte| acc << 8 | u32::from(*byte));
    let data = hex_bytes(data)?;
    Ok((address * 2, [data[1], data[0]]))
}

impl<R: BufRead> ByteSource for AtmelGeneric<R> {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        loop {
            if let Some(record) = self.pending.take() {
                return Some(Ok(record));
            }
            let (line, text) = match self.lines.next_line()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err)),
            };
            match parse(text) {
                Ok((address, word)) => self.pending.load(address, word.to_vec()),
                Err(kind) => return Some(Err(SourceError::Record { line, kind })),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian_at_doubled_addresses() {
        let mut source = AtmelGeneric::new(&b"000000:940c\n000001:0034\n"[..]);
        let records: Vec<_> = std::iter::from_fn(|| source.read())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            records,
            vec![
                ByteRecord::new(0x0c, 0),
                ByteRecord::new(0x94, 1),
                ByteRecord::new(0x34, 2),
                ByteRecord::new(0x00, 3),
            ]
        );
    }

    #[test]
    fn rejects_missing_separator() {
        let mut source = AtmelGeneric::new(&b"000000940c\n"[..]);
        assert!(matches!(
            source.read(),
            Some(Err(SourceError::Record {
                line: 1,
                kind: RecordError::MissingSeparator
            }))
        ));
    }
}
