//! Native memory layouts of the persisted structures.
//!
//! Each structure mirrors its C counterpart field for field, using the build
//! target's alignment and byte order. Dumps are only readable by a build for a
//! target with the same layout rules as the writer.

use zerocopy::FromBytes;

/// Round a structure size up to the allocator's default alignment of 8 bytes.
pub const fn align_default(size: usize) -> usize {
    (size + 7) & !7
}

/// Capacity of a balancer name.
pub const BALANCER_SIZE: usize = 40;
/// Capacity of a node's JVM route.
pub const JVM_ROUTE_SIZE: usize = 80;
/// Capacity of a domain name.
pub const DOMAIN_SIZE: usize = 20;
/// Capacity of a node's host address.
pub const HOST_NODE_SIZE: usize = 64;
/// Capacity of a node's port.
pub const PORT_SIZE: usize = 7;
/// Capacity of a node's connection scheme.
pub const SCHEME_SIZE: usize = 6;
/// Capacity of a node's worker statistics area.
pub const SCORE_SIZE: usize = 800;
/// Capacity of a sticky session cookie name.
pub const COOKIE_SIZE: usize = 30;
/// Capacity of a sticky session path parameter.
pub const PATH_SIZE: usize = 30;
/// Capacity of a context path.
pub const CONTEXT_SIZE: usize = 81;
/// Capacity of a virtual host alias.
pub const HOST_ALIAS_SIZE: usize = 101;

/// The slot table's control block, as written ahead of the record array.
///
/// Pointer fields held addresses in the writer's process. They only occupy
/// space and are never read.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawTableHeader {
    pub name: usize,
    pub shm: usize,
    pub ident: usize,
    pub version: usize,
    pub base: usize,
    pub size: usize,
    pub num: i32,
    pub global_pool: usize,
    pub global_lock: usize,
    pub next: usize,
}

/// Proxy parameters registered by a node.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawNodeMessage {
    pub balancer: [u8; BALANCER_SIZE],
    pub jvm_route: [u8; JVM_ROUTE_SIZE],
    pub domain: [u8; DOMAIN_SIZE],
    pub host: [u8; HOST_NODE_SIZE],
    pub port: [u8; PORT_SIZE],
    pub scheme: [u8; SCHEME_SIZE],
    pub reversed: i32,
    pub remove: i32,
    pub flush_packets: i32,
    pub flush_wait: i32,
    pub ping: i64,
    pub smax: i32,
    pub ttl: i64,
    pub timeout: i64,
    pub id: i32,
    pub update_time_lb: i64,
    pub num_failure_idle: i32,
    pub old_elected: i32,
    pub last_clean_try: i64,
}

/// A node slot. Only the leading part is persisted.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawNodeInfo {
    pub mess: RawNodeMessage,
    pub update_time: i64,
    pub offset: i32,
    pub stat: [u8; SCORE_SIZE],
}

/// A balancer slot.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawBalancerInfo {
    pub balancer: [u8; BALANCER_SIZE],
    pub sticky_session: i32,
    pub sticky_session_cookie: [u8; COOKIE_SIZE],
    pub sticky_session_path: [u8; PATH_SIZE],
    pub sticky_session_remove: i32,
    pub sticky_session_force: i32,
    pub timeout: i32,
    pub max_attempts: i32,
    pub update_time: i64,
    pub id: i32,
}

/// A context slot.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawContextInfo {
    pub context: [u8; CONTEXT_SIZE],
    pub vhost: i32,
    pub node: i32,
    pub status: i32,
    pub nb_requests: i32,
    pub update_time: i64,
    pub id: i32,
}

/// A domain slot.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawDomainInfo {
    pub domain: [u8; DOMAIN_SIZE],
    pub jvm_route: [u8; JVM_ROUTE_SIZE],
    pub balancer: [u8; BALANCER_SIZE],
    pub update_time: i64,
    pub id: i32,
}

/// A virtual host alias slot.
#[repr(C)]
#[derive(Debug, FromBytes)]
pub struct RawHostInfo {
    pub host: [u8; HOST_ALIAS_SIZE],
    pub vhost: i32,
    pub node: i32,
    pub update_time: i64,
    pub id: i32,
}
