//! States searching for the end of the alignment gap.
//!
//! The writer pads between the table header and the first slot according to
//! its own layout rules. The gap is walked in windows of [`PROBE_WIDTH`] bytes.
//! A window ends the gap when its last seven bytes equal one of the
//! [`FINGERPRINTS`] and the byte following the window is non-zero.
//!
//! The non-zero rule is a heuristic. A record whose first byte is zero cannot
//! be found this way, and decoding will run past it or fail.

use either::Either::{self, Left, Right};

use crate::schema::Schema;

use super::slot::Slot;

/// Width of a window read while searching the gap.
pub const PROBE_WIDTH: usize = 8;

/// Width of a fingerprint. The first byte of each window belongs to the
/// previous unit and is not compared.
pub const FINGERPRINT_WIDTH: usize = PROBE_WIDTH - 1;

/// Byte patterns recognized at the end of the gap.
pub const FINGERPRINTS: [[u8; FINGERPRINT_WIDTH]; 2] = [
    [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
];

/// State token to test a window of the gap.
#[derive(Debug)]
pub struct GapProbe {
    schema: Schema,
}

impl GapProbe {
    pub(super) fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Transition to another state by testing a window against the
    /// fingerprints.
    ///
    /// Returns a lookahead state if the window matched, or this state again to
    /// test the following window.
    pub fn advance(self, r: [u8; PROBE_WIDTH]) -> Either<GapPeek, GapProbe> {
        if FINGERPRINTS.iter().any(|f| r[1..] == f[..]) {
            Left(GapPeek {
                schema: self.schema,
            })
        } else {
            Right(self)
        }
    }
}

/// State token to confirm a fingerprint match by looking at the next byte.
#[derive(Debug)]
pub struct GapPeek {
    schema: Schema,
}

impl GapPeek {
    /// Transition to another state by inspecting the byte after a matched
    /// window.
    ///
    /// **This method expects a byte not consumed from the cursor.** The byte
    /// belongs to the first slot when the gap ends here, or to the next window
    /// otherwise.
    ///
    /// Returns the first slot state if the byte is non-zero, or a probe state
    /// to test the following window.
    pub fn advance(self, r: [u8; 1]) -> Either<Slot, GapProbe> {
        if r[0] != 0 {
            Left(Slot::new(self.schema))
        } else {
            Right(GapProbe::new(self.schema))
        }
    }
}
