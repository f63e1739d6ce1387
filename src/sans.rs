//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need control over how bytes
//! are fetched. See [`crate::avec`] for implementations covering files, readers
//! and slices.
//!
//! # Architecture
//!
//! All states are represented by a small, non-copy token. Once enough bytes
//! are ready, transition to another state by calling the token's `advance`
//! method. This will return a successor state token, along with any extracted
//! data. Tokens carry the [`Schema`](crate::Schema) chosen for the table, so
//! the slot width is known by the time the record array is reached.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed. Since every transition consumes its token, a table can be
//! walked once only; a second pass starts from a fresh [`Decoder`].
//!
//! Some areas of the decoding process are not represented in the finite-state
//! machine and must be carefully written:
//!
//! - Reading bytes from the correct place in the document. The gap states
//! require a one-byte lookahead that must not be consumed.
//!
//! - Rejecting documents shorter than [`header::MIN_FILE_SIZE`].
//!
//! - Ending decoding when the input runs out in the middle of a slot. This is
//! a normal end of table, not an error.
//!
//! Implementers are recommended to begin by studying and modifying the driver
//! in [`crate::avec`].

pub mod check;
pub mod gap;
pub mod header;
pub mod layout;
pub mod slot;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::TableHeader;
