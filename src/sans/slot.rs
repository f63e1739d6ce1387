//! State processing record slots.

use crate::{record::Record, schema::Schema};

use super::check::is_zeroed;

/// State token to decode a record slot.
#[derive(Debug)]
pub struct Slot {
    schema: Schema,
}

impl Slot {
    pub(super) fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// The schema of records in this table.
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The number of bytes to supply to [`Slot::advance`].
    pub fn width(&self) -> usize {
        self.schema.slot_width()
    }

    /// Transition to another state by decoding a slot of [`Slot::width`]
    /// bytes.
    ///
    /// Returns the decoded record and a successor state token, or nothing if
    /// the slot is the all-zero sentinel ending the table.
    pub fn advance(self, r: &[u8]) -> Option<(Record, Slot)> {
        debug_assert_eq!(r.len(), self.width());

        if is_zeroed(r) {
            return None;
        }

        Some((self.schema.decode(r), self))
    }
}
