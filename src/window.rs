//! The lookahead window between a byte source and the instruction matcher

use crate::error::InternalError;

/// Largest window any instruction set needs, in bytes.
pub const MAX_WINDOW: usize = 4;

/// A single byte of program memory and where it lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByteRecord {
    /// The byte itself
    pub value: u8,
    /// Its address
    pub address: u32,
}

impl ByteRecord {
    /// Creates a new record.
    pub const fn new(value: u8, address: u32) -> Self {
        Self { value, address }
    }
}

/// Fixed-capacity FIFO of pending bytes.
///
/// The window only holds bytes that have been read from the source but not
/// yet consumed by a decoded instruction.
#[derive(Debug, Clone)]
pub struct Window {
    slots: [ByteRecord; MAX_WINDOW],
    len: usize,
    capacity: usize,
}

impl Window {
    /// Creates an empty window holding at most `capacity` bytes.
    ///
    /// `capacity` is clamped to [`MAX_WINDOW`].
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: [ByteRecord::default(); MAX_WINDOW],
            len: 0,
            capacity: capacity.min(MAX_WINDOW),
        }
    }

    /// Maximum number of bytes this window holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pending bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bytes are pending.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if no further byte can be pushed.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Appends a byte to the tail.
    pub fn push(&mut self, record: ByteRecord) -> Result<(), InternalError> {
        if self.is_full() {
            return Err(InternalError::WindowOverflow);
        }
        self.slots[self.len] = record;
        self.len += 1;
        Ok(())
    }

    /// The oldest pending byte.
    pub fn head(&self) -> Option<ByteRecord> {
        self.records().first().copied()
    }

    /// All pending bytes, oldest first.
    pub fn records(&self) -> &[ByteRecord] {
        &self.slots[..self.len]
    }

    /// Length of the longest prefix whose addresses increase by exactly one.
    ///
    /// An empty window has a run of zero, any non-empty window at least one.
    pub fn consecutive_run(&self) -> usize {
        let records = self.records();
        if records.is_empty() {
            return 0;
        }
        1 + records
            .windows(2)
            .take_while(|pair| pair[1].address.wrapping_sub(pair[0].address) == 1)
            .count()
    }

    /// Values of the first `n` pending bytes, zero padded.
    pub fn values(&self, n: usize) -> [u8; MAX_WINDOW] {
        let mut values = [0; MAX_WINDOW];
        for (value, record) in values.iter_mut().zip(self.records().iter().take(n)) {
            *value = record.value;
        }
        values
    }

    /// Drops the first `n` bytes, moving the rest to the front.
    pub fn shift(&mut self, n: usize) {
        let n = n.min(self.len);
        let len = self.len;
        self.slots.copy_within(n..len, 0);
        self.len -= n;
        self.slots[self.len..len].fill(ByteRecord::default());
    }
}
