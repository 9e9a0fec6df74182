//! Errors produced by byte sources and the disassembly engine

/// Errors produced while reading bytes from an input container
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An I/O Error was encountered during reading
    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// A record of a text container could not be parsed
    #[error("line {line}: {kind}")]
    Record {
        /// One-based line number of the offending record
        line: usize,
        /// What is wrong with the record
        kind: RecordError,
    },

    /// The container type could not be derived from the first byte
    #[error("unable to determine file type from leading byte {0:#04x}")]
    UnknownFileType(u8),

    /// The input was empty when a file type had to be detected
    #[error("unable to determine file type of an empty input")]
    EmptyInput,

    /// The ELF container could not be parsed
    #[cfg(feature = "elf")]
    #[error("invalid ELF file")]
    Elf(#[from] goblin::error::Error),

    /// The ELF container carries no `.text` section
    #[error("no .text section found")]
    MissingText,

    /// A section lives beyond the 32-bit address space
    #[error("section address {0:#x} does not fit in 32 bits")]
    AddressOverflow(u64),
}

/// Ways a single text record can be malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The record does not begin with its start code
    #[error("missing start code {0:?}")]
    MissingStart(char),

    /// A character that should be a hex digit is not one
    #[error("invalid hex digit")]
    InvalidHex,

    /// The record is shorter or longer than its byte count announces
    #[error("record length does not match its byte count")]
    Length,

    /// The stored checksum does not match the record contents
    #[error("checksum mismatch: expected {expected:#04x}, found {found:#04x}")]
    Checksum {
        /// Checksum computed from the record contents
        expected: u8,
        /// Checksum stored in the record
        found: u8,
    },

    /// The record type is not one this container defines
    #[error("unsupported record type {0:#04x}")]
    UnsupportedType(u8),

    /// The separator between address and data is missing
    #[error("missing ':' between address and data")]
    MissingSeparator,
}

/// Invariant violations inside the engine
///
/// These are never caused by the input bytes: every byte sequence has a
/// decoding. Once one is raised the stream must be abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    /// No descriptor (not even the raw-word catch-all) matched
    #[error("malformed instruction set: no descriptor matches {0:#06x}")]
    UnmatchedOpcode(u16),

    /// A byte was pushed into a full lookahead window
    #[error("lookahead window overflow")]
    WindowOverflow,

    /// The retry loop finished without emitting anything
    #[error("no decoding logic invoked within {0} attempts")]
    NoDecodePath(usize),
}

/// Errors produced by the disassembly engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte source failed
    #[error("error in input byte stream")]
    Source(#[from] SourceError),

    /// The engine hit a catastrophic failure
    #[error("catastrophic failure")]
    Internal(#[from] InternalError),
}
