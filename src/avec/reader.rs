//! Reader-based source implementation.
//!
//! _Requires Cargo feature `std`._

use std::{
    fs::File,
    io::{self, BufReader, ErrorKind, Read, Seek, SeekFrom},
    path::Path,
};

use crate::{record::Record, schema::Schema};

use super::{Error, Options, Source, SourceError, Table, decode_source};

/// A source reading from a seekable reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read + Seek> ReaderSource<R> {
    /// Wrap a reader positioned at the start of a document.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Release the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl ReaderSource<BufReader<File>> {
    /// Open a file for reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read + Seek> Source for ReaderSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        self.inner.read_exact(buf).map_err(|err| match err.kind() {
            ErrorKind::UnexpectedEof => SourceError::ShortRead,
            _ => SourceError::Io(err),
        })
    }

    fn peek_and_rewind(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        self.read_exact(buf)?;
        self.inner.seek(SeekFrom::Current(-(buf.len() as i64)))?;
        Ok(())
    }

    fn size(&mut self) -> Result<u64, SourceError> {
        let position = self.inner.stream_position()?;
        let size = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(size)
    }
}

/// Decode every record of a table from a reader, publishing to a receiver.
///
/// This method is also re-exported as `slotmem_reader::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(
    r: impl Read + Seek,
    schema: Schema,
    options: Options,
    o: &mut impl Extend<Record>,
) -> Result<usize, Error> {
    decode_source(ReaderSource::new(r), schema, options, o)
}

/// Open a table stored in a file.
///
/// _Requires Cargo feature `std`._
pub fn open_file(
    path: impl AsRef<Path>,
    schema: Schema,
    options: Options,
) -> Result<Table<ReaderSource<BufReader<File>>>, Error> {
    let source = ReaderSource::open(path).map_err(SourceError::Io)?;
    Table::open(source, schema, options)
}
