//! State processing the table header.

use crate::schema::Schema;

use super::{
    gap::{FINGERPRINT_WIDTH, GapProbe},
    layout::{RawTableHeader, align_default},
};

/// Padded width of the table header written by a process with the build
/// target's layout rules.
///
/// This is 80 bytes on 64-bit targets. Dumps from other platforms need a
/// different width, supplied with [`TableHeader::with_width`].
pub const HEADER_WIDTH: usize = align_default(size_of::<RawTableHeader>());

/// Smallest document that can hold a fingerprint and a byte on either side.
pub const MIN_FILE_SIZE: u64 = FINGERPRINT_WIDTH as u64 + 2;

/// State token to skip over the table header.
#[derive(Debug)]
pub struct TableHeader {
    schema: Schema,
    width: usize,
}

impl TableHeader {
    /// Begin decoding a table of the given schema with a header of
    /// [`HEADER_WIDTH`] bytes.
    pub fn new(schema: Schema) -> Self {
        Self::with_width(schema, HEADER_WIDTH)
    }

    /// Begin decoding a table of the given schema with a header of `width`
    /// bytes.
    pub fn with_width(schema: Schema, width: usize) -> Self {
        Self { schema, width }
    }

    /// Transition to another state by skipping the header.
    ///
    /// The header holds nothing of use to a reader, so no bytes are taken.
    /// Returns the number of bytes to discard, and a successor state token.
    pub fn advance(self) -> (usize, GapProbe) {
        (self.width, GapProbe::new(self.schema))
    }
}
