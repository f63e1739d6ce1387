//! The closed set of table layouts and their slot widths.

use thiserror::Error;

use crate::{
    record::Record,
    sans::layout::{
        RawBalancerInfo, RawContextInfo, RawDomainInfo, RawHostInfo, RawNodeInfo, align_default,
    },
};

/// Bytes missing from the persisted node slot, beyond the halving of its
/// in-memory width.
pub const NODE_SLOT_CORRECTION: usize = 40;

/// Copy a slot into a zeroed buffer the size of a raw structure and
/// reinterpret it.
macro_rules! read_raw {
    ($raw:ty, $r:expr) => {{
        let r: &[u8] = $r;
        let mut bytes = [0u8; size_of::<$raw>()];
        let n = r.len().min(bytes.len());
        bytes[..n].copy_from_slice(&r[..n]);
        let raw: $raw = zerocopy::transmute!(bytes);
        raw
    }};
}

/// An error matching a path against the known table names.
#[derive(Debug, Error)]
#[error(
    "Expected one of node.nodes.slotmem, balancer.balancers.slotmem, \
     context.contexts.slotmem, domain.domain.slotmem, manager.host.hosts.slotmem."
)]
pub struct UnrecognizedSchema;

/// The layout of records in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    Node,
    Balancer,
    Context,
    Domain,
    Host,
}

impl Schema {
    /// Every schema, in the order paths are matched.
    pub const ALL: [Schema; 5] = [
        Schema::Node,
        Schema::Balancer,
        Schema::Context,
        Schema::Domain,
        Schema::Host,
    ];

    /// The file name suffix mod_cluster gives this table.
    pub const fn table_name(self) -> &'static str {
        match self {
            Schema::Node => "node.nodes.slotmem",
            Schema::Balancer => "balancer.balancers.slotmem",
            Schema::Context => "context.contexts.slotmem",
            Schema::Domain => "domain.domain.slotmem",
            Schema::Host => "manager.host.hosts.slotmem",
        }
    }

    /// Select a schema by the first table name contained in a path.
    pub fn from_path(path: &str) -> Result<Self, UnrecognizedSchema> {
        Self::ALL
            .into_iter()
            .find(|s| path.contains(s.table_name()))
            .ok_or(UnrecognizedSchema)
    }

    /// The number of bytes each slot occupies on disk.
    ///
    /// Node slots hold half of the in-memory structure less a fixed
    /// correction: the trailing statistics area is never persisted in full.
    pub const fn slot_width(self) -> usize {
        match self {
            Schema::Node => NODE_SLOT_WIDTH,
            Schema::Balancer => align_default(size_of::<RawBalancerInfo>()),
            Schema::Context => align_default(size_of::<RawContextInfo>()),
            Schema::Domain => align_default(size_of::<RawDomainInfo>()),
            Schema::Host => align_default(size_of::<RawHostInfo>()),
        }
    }

    /// Decode the bytes of one slot.
    ///
    /// Fields lying beyond the end of `r` decode as zero.
    pub fn decode(self, r: &[u8]) -> Record {
        match self {
            Schema::Node => Record::Node(read_raw!(RawNodeInfo, r).into()),
            Schema::Balancer => Record::Balancer(read_raw!(RawBalancerInfo, r).into()),
            Schema::Context => Record::Context(read_raw!(RawContextInfo, r).into()),
            Schema::Domain => Record::Domain(read_raw!(RawDomainInfo, r).into()),
            Schema::Host => Record::Host(read_raw!(RawHostInfo, r).into()),
        }
    }
}

/// Width of a node slot on disk.
pub const NODE_SLOT_WIDTH: usize =
    align_default(size_of::<RawNodeInfo>()) / 2 - NODE_SLOT_CORRECTION;

/// Width of the widest slot of any schema.
pub const MAX_SLOT_WIDTH: usize = {
    let mut max = 0;
    let mut i = 0;
    while i < Schema::ALL.len() {
        let width = Schema::ALL[i].slot_width();
        if width > max {
            max = width;
        }
        i += 1;
    }
    max
};
