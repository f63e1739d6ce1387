//! Decoded records.
//!
//! Records are plain owned values. Strings keep their fixed capacity but expose
//! only the bytes before the first NUL.

use core::fmt;

use crate::sans::layout::{
    BALANCER_SIZE, COOKIE_SIZE, CONTEXT_SIZE, DOMAIN_SIZE, HOST_ALIAS_SIZE, HOST_NODE_SIZE,
    JVM_ROUTE_SIZE, PATH_SIZE, PORT_SIZE, RawBalancerInfo, RawContextInfo, RawDomainInfo,
    RawHostInfo, RawNodeInfo, RawNodeMessage, SCHEME_SIZE, SCORE_SIZE,
};

/// A NUL-terminated string stored in a fixed-capacity buffer.
///
/// Bytes after the first NUL are cleared on construction, so stale buffer
/// contents never take part in comparisons or output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize>([u8; N]);

impl<const N: usize> FixedStr<N> {
    /// Take ownership of a raw buffer, truncating at the first NUL.
    pub fn from_raw(mut raw: [u8; N]) -> Self {
        if let Some(end) = raw.iter().position(|b| *b == 0) {
            raw[end..].fill(0);
        }
        Self(raw)
    }

    /// The string's bytes, up to but excluding the first NUL.
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(N);
        &self.0[..end]
    }

    /// The string as UTF-8, if valid.
    pub fn to_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Whether the string has no bytes before its first NUL.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Capacity of the underlying buffer, including room for the NUL.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    /// Writes the string, replacing invalid UTF-8 sequences with U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for chunk in self.as_bytes().utf8_chunks() {
            write!(f, "{}", chunk.valid().escape_debug())?;
            for b in chunk.invalid() {
                write!(f, "\\x{b:02x}")?;
            }
        }
        f.write_str("\"")
    }
}

/// A count of microseconds, as kept by APR for both points in time and
/// intervals.
///
/// Points in time count from the Unix epoch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(pub i64);

impl Ticks {
    /// Ticks in one second.
    pub const PER_SECOND: i64 = 1_000_000;
    /// Ticks in one millisecond.
    pub const PER_MILLISECOND: i64 = 1_000;

    /// The raw count of microseconds.
    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// Whole milliseconds, truncated toward zero.
    pub const fn as_millis(self) -> i64 {
        self.0 / Self::PER_MILLISECOND
    }

    /// Whole seconds, truncated toward zero.
    pub const fn as_secs(self) -> i64 {
        self.0 / Self::PER_SECOND
    }

    /// The point in time these ticks denote, if representable.
    #[cfg(feature = "std")]
    pub fn to_datetime(self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp_micros(self.0)
    }
}

/// The proxy parameters a node registered with.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeMessage {
    pub balancer: FixedStr<BALANCER_SIZE>,
    pub jvm_route: FixedStr<JVM_ROUTE_SIZE>,
    pub domain: FixedStr<DOMAIN_SIZE>,
    pub host: FixedStr<HOST_NODE_SIZE>,
    pub port: FixedStr<PORT_SIZE>,
    /// Connection scheme (`ajp`, `http`, `https`).
    pub scheme: FixedStr<SCHEME_SIZE>,
    pub reversed: i32,
    pub remove: i32,
    pub flush_packets: i32,
    pub flush_wait: i32,
    pub ping: Ticks,
    pub smax: i32,
    pub ttl: Ticks,
    pub timeout: Ticks,
    pub id: i32,
    pub update_time_lb: Ticks,
    pub num_failure_idle: i32,
    pub old_elected: i32,
    pub last_clean_try: Ticks,
}

/// A backend node.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub mess: NodeMessage,
    pub update_time: Ticks,
    pub offset: i32,
    /// Worker statistics. Only the part inside the persisted slot survives.
    pub stat: FixedStr<SCORE_SIZE>,
}

/// A load balancer and its sticky session settings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BalancerInfo {
    pub balancer: FixedStr<BALANCER_SIZE>,
    pub sticky_session: i32,
    pub sticky_session_cookie: FixedStr<COOKIE_SIZE>,
    pub sticky_session_path: FixedStr<PATH_SIZE>,
    pub sticky_session_remove: i32,
    pub sticky_session_force: i32,
    pub timeout: i32,
    pub max_attempts: i32,
    pub update_time: Ticks,
    pub id: i32,
}

/// A context path served by a node on a virtual host.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub context: FixedStr<CONTEXT_SIZE>,
    pub vhost: i32,
    pub node: i32,
    pub status: i32,
    pub nb_requests: i32,
    pub update_time: Ticks,
    pub id: i32,
}

/// The domain a node belongs to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub domain: FixedStr<DOMAIN_SIZE>,
    pub jvm_route: FixedStr<JVM_ROUTE_SIZE>,
    pub balancer: FixedStr<BALANCER_SIZE>,
    pub update_time: Ticks,
    pub id: i32,
}

/// A virtual host alias of a node.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub host: FixedStr<HOST_ALIAS_SIZE>,
    pub vhost: i32,
    pub node: i32,
    pub update_time: Ticks,
    pub id: i32,
}

/// A record decoded from one slot, tagged by table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Node(NodeInfo),
    Balancer(BalancerInfo),
    Context(ContextInfo),
    Domain(DomainInfo),
    Host(HostInfo),
}

impl Record {
    /// The record's identifier within its table.
    pub fn id(&self) -> i32 {
        match self {
            Record::Node(r) => r.mess.id,
            Record::Balancer(r) => r.id,
            Record::Context(r) => r.id,
            Record::Domain(r) => r.id,
            Record::Host(r) => r.id,
        }
    }
}

impl From<RawNodeMessage> for NodeMessage {
    fn from(raw: RawNodeMessage) -> Self {
        Self {
            balancer: FixedStr::from_raw(raw.balancer),
            jvm_route: FixedStr::from_raw(raw.jvm_route),
            domain: FixedStr::from_raw(raw.domain),
            host: FixedStr::from_raw(raw.host),
            port: FixedStr::from_raw(raw.port),
            scheme: FixedStr::from_raw(raw.scheme),
            reversed: raw.reversed,
            remove: raw.remove,
            flush_packets: raw.flush_packets,
            flush_wait: raw.flush_wait,
            ping: Ticks(raw.ping),
            smax: raw.smax,
            ttl: Ticks(raw.ttl),
            timeout: Ticks(raw.timeout),
            id: raw.id,
            update_time_lb: Ticks(raw.update_time_lb),
            num_failure_idle: raw.num_failure_idle,
            old_elected: raw.old_elected,
            last_clean_try: Ticks(raw.last_clean_try),
        }
    }
}

impl From<RawNodeInfo> for NodeInfo {
    fn from(raw: RawNodeInfo) -> Self {
        Self {
            mess: raw.mess.into(),
            update_time: Ticks(raw.update_time),
            offset: raw.offset,
            stat: FixedStr::from_raw(raw.stat),
        }
    }
}

impl From<RawBalancerInfo> for BalancerInfo {
    fn from(raw: RawBalancerInfo) -> Self {
        Self {
            balancer: FixedStr::from_raw(raw.balancer),
            sticky_session: raw.sticky_session,
            sticky_session_cookie: FixedStr::from_raw(raw.sticky_session_cookie),
            sticky_session_path: FixedStr::from_raw(raw.sticky_session_path),
            sticky_session_remove: raw.sticky_session_remove,
            sticky_session_force: raw.sticky_session_force,
            timeout: raw.timeout,
            max_attempts: raw.max_attempts,
            update_time: Ticks(raw.update_time),
            id: raw.id,
        }
    }
}

impl From<RawContextInfo> for ContextInfo {
    fn from(raw: RawContextInfo) -> Self {
        Self {
            context: FixedStr::from_raw(raw.context),
            vhost: raw.vhost,
            node: raw.node,
            status: raw.status,
            nb_requests: raw.nb_requests,
            update_time: Ticks(raw.update_time),
            id: raw.id,
        }
    }
}

impl From<RawDomainInfo> for DomainInfo {
    fn from(raw: RawDomainInfo) -> Self {
        Self {
            domain: FixedStr::from_raw(raw.domain),
            jvm_route: FixedStr::from_raw(raw.jvm_route),
            balancer: FixedStr::from_raw(raw.balancer),
            update_time: Ticks(raw.update_time),
            id: raw.id,
        }
    }
}

impl From<RawHostInfo> for HostInfo {
    fn from(raw: RawHostInfo) -> Self {
        Self {
            host: FixedStr::from_raw(raw.host),
            vhost: raw.vhost,
            node: raw.node,
            update_time: Ticks(raw.update_time),
            id: raw.id,
        }
    }
}
