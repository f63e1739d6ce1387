//! Helper for detecting sentinel slots.

/// Whether every byte is zero.
///
/// An all-zero slot is the sentinel marking the end of live records.
pub fn is_zeroed(r: &[u8]) -> bool {
    r.iter().all(|b| *b == 0)
}
