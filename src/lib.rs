#![no_std]

//! A reader for the shared-memory slot tables mod_cluster persists to disk.
//!
//! mod_cluster keeps its node, balancer, context, domain and host tables in
//! "slotmem" shared memory, and dumps that memory verbatim to files such as
//! `manager.node.nodes.slotmem`. A dump is laid out as:
//!
//! ```text
//! [table header][alignment gap][slot]*[all-zero slot or end of file]
//! ```
//!
//! The header and gap widths depend on the platform that wrote the file and
//! are not recorded anywhere, so the reader skips a header of a configured
//! width and then searches for the end of the gap by fingerprint.
//!
//! Most users should begin with [`avec::Table`] or the `decode_*` functions in
//! the [`avec`] module. The underlying state tokens are exposed in [`sans`]
//! for applications that manage their own input.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based sources and text output (default).
//! - `cli`: build the `slotmem-reader` binary (default).

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
#[cfg(feature = "std")]
pub mod output;
pub mod record;
pub mod sans;
pub mod schema;

pub use record::Record;
pub use schema::Schema;
