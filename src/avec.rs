//! Convenience interfaces for common decoding patterns.
//!
//! [`Table`] drives the finite-state machine in [`crate::sans`] over any
//! [`Source`], yielding records lazily. Sources are provided for readers and
//! files ([`reader::ReaderSource`]) and for byte slices
//! ([`slice::SliceSource`]).
//!
//! For the common case of collecting a whole table, see [`decode_reader`] and
//! [`decode_slice`].

use core::iter::FusedIterator;

use either::Either::{Left, Right};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    record::Record,
    sans::{
        Decoder,
        gap::{GapProbe, PROBE_WIDTH},
        header::{HEADER_WIDTH, MIN_FILE_SIZE},
        slot::Slot,
    },
    schema::{MAX_SLOT_WIDTH, Schema},
};

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

/// Errors occurring while reading from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Fewer bytes remain than were requested.
    #[error("Fewer bytes remain than were requested.")]
    ShortRead,
    /// An error from the supplied reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors occurring while decoding a table.
#[derive(Debug, Error)]
pub enum Error {
    /// The document cannot hold a table.
    #[error("Document is too short ({size} bytes) to hold a table.")]
    TooShort { size: u64 },
    /// The input ran out before the end of the alignment gap was found.
    #[error("End of the alignment gap not found.")]
    AlignmentNotFound,
    /// The source failed.
    #[error("Failed to read from the source: {0}")]
    Read(#[from] SourceError),
}

/// A sequential, forward-only supply of document bytes.
pub trait Source {
    /// Fill `buf` entirely from the cursor, advancing it.
    ///
    /// Returns [`SourceError::ShortRead`] if fewer bytes remain. The cursor
    /// position is unspecified after a failure.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// Fill `buf` entirely from the cursor, leaving the cursor in place.
    fn peek_and_rewind(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// The total length of the document.
    fn size(&mut self) -> Result<u64, SourceError>;
}

/// Options for opening a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Width of the table header written ahead of the alignment gap.
    pub header_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            header_width: HEADER_WIDTH,
        }
    }
}

/// A lazily decoded table of records.
///
/// Yields each record in slot order. Iteration ends at the all-zero sentinel
/// slot or when the source runs out mid-slot. A source failure is yielded
/// once, after which iteration ends.
#[derive(Debug)]
pub struct Table<S> {
    source: S,
    state: Option<Slot>,
    buf: [u8; MAX_SLOT_WIDTH],
    index: usize,
    offset: u64,
}

impl<S: Source> Table<S> {
    /// Skip a document's header and alignment gap, ready to decode records of
    /// the given schema.
    pub fn open(mut source: S, schema: Schema, options: Options) -> Result<Self, Error> {
        let size = source.size()?;
        if size < MIN_FILE_SIZE {
            Err(Error::TooShort { size })?;
        }

        let (width, probe) = Decoder::with_width(schema, options.header_width).advance();
        debug!(width, "skipping table header");
        discard(&mut source, width)?;

        let mut offset = width as u64;
        let state = skip_gap(&mut source, probe, &mut offset)?;
        debug!(offset, slot_width = state.width(), "found first slot");

        Ok(Self {
            source,
            state: Some(state),
            buf: [0; MAX_SLOT_WIDTH],
            index: 0,
            offset,
        })
    }

    /// The number of records yielded so far.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Release the source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Source> Iterator for Table<S> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        let buf = &mut self.buf[..state.width()];

        match self.source.read_exact(buf) {
            Ok(()) => {}
            Err(SourceError::ShortRead) => {
                debug!(slot = self.index, offset = self.offset, "table ends without sentinel");
                return None;
            }
            #[allow(unreachable_patterns)]
            Err(err) => return Some(Err(err.into())),
        }

        let Some((record, state)) = state.advance(buf) else {
            debug!(slot = self.index, offset = self.offset, "reached sentinel slot");
            return None;
        };

        trace!(slot = self.index, offset = self.offset, id = record.id(), "decoded record");
        self.state = Some(state);
        self.index += 1;
        self.offset += buf.len() as u64;

        Some(Ok(record))
    }
}

impl<S: Source> FusedIterator for Table<S> {}

/// Decode every record of a table from a source, publishing to a receiver.
///
/// Returns the number of records decoded. Records received before a failure
/// are left in the receiver.
pub fn decode_source(
    source: impl Source,
    schema: Schema,
    options: Options,
    o: &mut impl Extend<Record>,
) -> Result<usize, Error> {
    let mut table = Table::open(source, schema, options)?;

    for record in table.by_ref() {
        o.extend([record?]);
    }

    Ok(table.position())
}

/// Take and discard a number of bytes from a source.
fn discard(r: &mut impl Source, mut n: usize) -> Result<(), Error> {
    let mut scratch = [0; 64];

    while n > 0 {
        let chunk = &mut scratch[..n.min(64)];
        take_in_gap(r, chunk)?;
        n -= chunk.len();
    }

    Ok(())
}

/// Walk the alignment gap until its end is confirmed, advancing an offset
/// counter used for logging.
fn skip_gap(r: &mut impl Source, mut probe: GapProbe, offset: &mut u64) -> Result<Slot, Error> {
    loop {
        let mut window = [0; PROBE_WIDTH];
        take_in_gap(r, &mut window)?;
        *offset += PROBE_WIDTH as u64;

        probe = match probe.advance(window) {
            Left(peek) => {
                let mut next = [0; 1];
                peek_in_gap(r, &mut next)?;

                match peek.advance(next) {
                    Left(slot) => return Ok(slot),
                    Right(probe) => {
                        trace!(offset = *offset, "ambiguous fingerprint, still in gap");
                        probe
                    }
                }
            }
            Right(probe) => probe,
        };
    }
}

fn take_in_gap(r: &mut impl Source, buf: &mut [u8]) -> Result<(), Error> {
    r.read_exact(buf).map_err(exhausted_in_gap)
}

fn peek_in_gap(r: &mut impl Source, buf: &mut [u8]) -> Result<(), Error> {
    r.peek_and_rewind(buf).map_err(exhausted_in_gap)
}

/// Running out of bytes before the first slot means no gap end was found.
fn exhausted_in_gap(err: SourceError) -> Error {
    match err {
        SourceError::ShortRead => Error::AlignmentNotFound,
        #[allow(unreachable_patterns)]
        err => Error::Read(err),
    }
}
