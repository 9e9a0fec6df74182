use std::io::{Bytes, Read};

use super::ByteSource;
use crate::error::SourceError;
use crate::window::ByteRecord;

/// Raw binary image loaded at address 0
#[derive(Debug)]
pub struct Binary<R> {
    bytes: Bytes<R>,
    address: u32,
}

impl<R: Read> Binary<R> {
    /// Creates a source over `reader`, which should be buffered.
    pub fn new(reader: R) -> Self {
        Self::with_base(reader, 0)
    }

    /// Creates a source whose first byte lives at `base`.
    pub fn with_base(reader: R, base: u32) -> Self {
        Self {
            bytes: reader.bytes(),
            address: base,
        }
    }
}

impl<R: Read> ByteSource for Binary<R> {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        let value = match self.bytes.next()? {
            Ok(value) => value,
            Err(err) => return Some(Err(err.into())),
        };
        let record = ByteRecord::new(value, self.address);
        self.address = self.address.wrapping_add(1);
        Some(Ok(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_count_from_zero() {
        let mut source = Binary::new(&[0xaa, 0xbb][..]);
        assert_eq!(source.read().unwrap().unwrap(), ByteRecord::new(0xaa, 0));
        assert_eq!(source.read().unwrap().unwrap(), ByteRecord::new(0xbb, 1));
        assert!(source.read().is_none());
    }
}
