//! Slice-based source implementation.

use crate::{record::Record, schema::Schema};

use super::{Error, Options, Source, SourceError, decode_source};

/// A source reading from a slice holding a whole document.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    r: &'a [u8],
    i: usize, // Offset of the cursor.
}

impl<'a> SliceSource<'a> {
    /// Read a document from the start of a slice.
    pub fn new(r: &'a [u8]) -> Self {
        Self { r, i: 0 }
    }

    /// The bytes not yet read.
    pub fn remaining(&self) -> &'a [u8] {
        &self.r[self.i..]
    }
}

impl Source for SliceSource<'_> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        self.peek_and_rewind(buf)?;
        self.i += buf.len();
        Ok(())
    }

    fn peek_and_rewind(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let s = self.i;
        let e = s + buf.len();
        buf.copy_from_slice(self.r.get(s..e).ok_or(SourceError::ShortRead)?);
        Ok(())
    }

    fn size(&mut self) -> Result<u64, SourceError> {
        Ok(self.r.len() as u64)
    }
}

/// Decode every record of a table from a slice, publishing to a receiver.
///
/// This method is also re-exported as `slotmem_reader::avec::decode_slice`.
pub fn decode(
    r: &[u8],
    schema: Schema,
    options: Options,
    o: &mut impl Extend<Record>,
) -> Result<usize, Error> {
    decode_source(SliceSource::new(r), schema, options, o)
}
