//! The disassembly engine
//!
//! [`Disassembler`] pulls [`ByteRecord`]s from a [`ByteSource`] into a small
//! lookahead window and turns them into a stream of [`DecodedValue`]s:
//!
//! - an origin directive before the first instruction and after every
//!   address discontinuity,
//! - one instruction per call, or raw data when an instruction is cut short
//!   by the end of input or by an address gap,
//! - a single end directive once everything has been consumed.

use std::marker::PhantomData;

use tracing::{debug, error, trace, warn};

use crate::decoded::{DecodedValue, Directive, Instruction};
use crate::error::{Error, InternalError};
use crate::isa::{Descriptor, InstructionSet};
use crate::source::ByteSource;
use crate::window::{ByteRecord, Window};

/// Bound on the internal decode loop of a single [`Disassembler::read`].
///
/// Every attempt either produces a value or pulls one byte, and the window
/// never holds more than four bytes.
pub const DECODE_ATTEMPTS: usize = 5;

/// What one pass of the state machine decided
enum Step<A: InstructionSet> {
    Emit(DecodedValue<A>),
    Pull,
    Finished,
}

/// Streaming disassembler over the instruction set `A`
#[derive(Debug)]
pub struct Disassembler<A: InstructionSet, S> {
    source: S,
    window: Window,
    next_address: u32,
    initialized: bool,
    source_eof: bool,
    end_emitted: bool,
    truncated: usize,
    poisoned: Option<InternalError>,
    isa: PhantomData<A>,
}

impl<A: InstructionSet, S: ByteSource> Disassembler<A, S> {
    /// Creates a disassembler reading from an initialised `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            window: Window::new(A::MAX_WIDTH),
            next_address: 0,
            initialized: false,
            source_eof: false,
            end_emitted: false,
            truncated: 0,
            poisoned: None,
            isa: PhantomData,
        }
    }

    /// Produces the next value, `None` after the end directive.
    pub fn read(&mut self) -> Option<Result<DecodedValue<A>, Error>> {
        if let Some(err) = self.poisoned {
            return Some(Err(err.into()));
        }

        for _ in 0..DECODE_ATTEMPTS {
            let step = match self.step() {
                Ok(step) => step,
                Err(err) => return Some(Err(self.poison(err))),
            };
            match step {
                Step::Emit(value) => return Some(Ok(value)),
                Step::Finished => return None,
                Step::Pull => {
                    if let Err(err) = self.pull() {
                        return Some(Err(err));
                    }
                }
            }
        }

        Some(Err(self.poison(InternalError::NoDecodePath(DECODE_ATTEMPTS))))
    }

    /// Releases the byte source.
    pub fn close(mut self) -> Result<(), Error> {
        self.source.close()?;
        Ok(())
    }

    /// Address the next instruction is expected at.
    pub fn next_address(&self) -> u32 {
        self.next_address
    }

    /// Number of bytes read but not yet decoded.
    pub fn pending(&self) -> usize {
        self.window.len()
    }

    /// The underlying byte source.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn poison(&mut self, err: InternalError) -> Error {
        error!(isa = A::NAME, %err, "disassembly stream abandoned");
        self.poisoned = Some(err);
        err.into()
    }

    fn pull(&mut self) -> Result<(), Error> {
        match self.source.read() {
            Some(Ok(record)) => {
                trace!(value = record.value, address = record.address, "pulled byte");
                self.window.push(record).map_err(|err| self.poison(err))
            }
            Some(Err(err)) => Err(err.into()),
            None => {
                self.source_eof = true;
                Ok(())
            }
        }
    }

    fn step(&mut self) -> Result<Step<A>, InternalError> {
        let run = self.window.consecutive_run();
        let head = match self.window.head() {
            Some(head) => head,
            None if !self.source_eof => return Ok(Step::Pull),
            None if self.end_emitted => return Ok(Step::Finished),
            None => {
                debug!(isa = A::NAME, "end of input");
                self.end_emitted = true;
                return Ok(Step::Emit(Directive::End.into()));
            }
        };

        if !self.initialized || head.address != self.next_address {
            debug!(isa = A::NAME, address = head.address, "new origin");
            self.initialized = true;
            self.next_address = head.address;
            return Ok(Step::Emit(Directive::Origin(head.address).into()));
        }

        if self.truncated > 0 {
            return Ok(Step::Emit(self.emit_fallback(head).into()));
        }

        let values = self.window.values(run);
        let descriptor = if run >= A::UNIT {
            Some(A::lookup(&values[..run]).ok_or_else(|| unmatched(&values))?)
        } else {
            None
        };
        let required = descriptor.map_or(A::UNIT, |descriptor| descriptor.width());

        if let Some(descriptor) = descriptor.filter(|_| required <= run) {
            return Ok(Step::Emit(self.consume(head, descriptor).into()));
        }

        if self.window.len() > run || self.source_eof {
            warn!(
                isa = A::NAME,
                address = head.address,
                available = run,
                required,
                "instruction truncated, emitting raw data"
            );
            self.truncated = run;
            return Ok(Step::Emit(self.emit_fallback(head).into()));
        }

        Ok(Step::Pull)
    }

    fn emit_fallback(&mut self, head: ByteRecord) -> Instruction<A> {
        let descriptor = A::fallback(self.truncated);
        self.truncated = self.truncated.saturating_sub(descriptor.width());
        self.consume(head, descriptor)
    }

    fn consume(&mut self, head: ByteRecord, descriptor: &'static A::Descriptor) -> Instruction<A> {
        let width = descriptor.width();
        let instruction = Instruction::decode(head.address, descriptor, self.window.values(width));
        self.window.shift(width);
        self.next_address = head.address.wrapping_add(width as u32);
        instruction
    }
}

fn unmatched(values: &[u8]) -> InternalError {
    InternalError::UnmatchedOpcode(u16::from_le_bytes([values[0], values[1]]))
}

impl<A: InstructionSet, S: ByteSource> crate::Decoder for Disassembler<A, S> {
    type Instruction = DecodedValue<A>;
    type Error = Error;

    fn decode(&mut self) -> Option<Result<Self::Instruction, Self::Error>> {
        self.read()
    }
}
