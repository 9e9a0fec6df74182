use std::io::Read;

use tracing::debug;

use super::ByteSource;
use crate::error::SourceError;
use crate::window::ByteRecord;

/// The `.text` section of an ELF file, at its link address
#[derive(Debug)]
pub struct Elf {
    text: std::vec::IntoIter<u8>,
    address: u32,
}

impl Elf {
    /// Reads the whole of `reader` and extracts its `.text` section.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, SourceError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Extracts the `.text` section of an in-memory ELF image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SourceError> {
        let elf = goblin::elf::Elf::parse(bytes)?;
        let text = elf
            .section_headers
            .iter()
            .find(|header| elf.shdr_strtab.get_at(header.sh_name) == Some(".text"))
            .ok_or(SourceError::MissingText)?;
        let data = text
            .file_range()
            .and_then(|range| bytes.get(range))
            .ok_or(SourceError::MissingText)?;
        debug!(address = text.sh_addr, size = text.sh_size, "elf .text section");
        Ok(Self {
            text: data.to_vec().into_iter(),
            address: load_address(text.sh_addr)?,
        })
    }
}

fn load_address(address: u64) -> Result<u32, SourceError> {
    u32::try_from(address).map_err(|_| SourceError::AddressOverflow(address))
}

impl ByteSource for Elf {
    fn read(&mut self) -> Option<Result<ByteRecord, SourceError>> {
        let value = self.text.next()?;
        let record = ByteRecord::new(value, self.address);
        self.address = self.address.wrapping_add(1);
        Some(Ok(record))
    }
}
