//! Text rendering of decoded records.
//!
//! Each record is written as `key: value` lines followed by [`DIVIDER`].
//! Keys follow the field names of the C structures.
//!
//! _Requires Cargo feature `std`._

use std::{
    format,
    io::{self, Write},
    string::{String, ToString},
};

use crate::record::{BalancerInfo, ContextInfo, DomainInfo, HostInfo, NodeInfo, Record, Ticks};

/// Line written after every record.
pub const DIVIDER: &str = "----------";

/// Line written once the table is exhausted.
pub const FOOTER: &str = "DONE displaying available data.";

/// Write a record as a block of lines.
pub fn write_record(w: &mut impl Write, record: &Record) -> io::Result<()> {
    match record {
        Record::Node(r) => write_node(w, r)?,
        Record::Balancer(r) => write_balancer(w, r)?,
        Record::Context(r) => write_context(w, r)?,
        Record::Domain(r) => write_domain(w, r)?,
        Record::Host(r) => write_host(w, r)?,
    }
    writeln!(w, "{DIVIDER}")
}

/// Write the trailer that follows the last record.
pub fn write_footer(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "\n{FOOTER}")
}

/// Render a point in time as an RFC 822 date, as `apr_rfc822_date` does.
///
/// Values outside the representable range are rendered as raw ticks.
pub fn rfc822(t: Ticks) -> String {
    match t.to_datetime() {
        Some(date) => date.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        None => format!("{} [us]", t.as_micros()),
    }
}

fn write_node(w: &mut impl Write, r: &NodeInfo) -> io::Result<()> {
    let m = &r.mess;
    writeln!(w, "mess.balancer: {}", m.balancer)?;
    writeln!(w, "mess.JVMRoute: {}", m.jvm_route)?;
    writeln!(w, "mess.Domain: {}", m.domain)?;
    writeln!(w, "mess.Host: {}", m.host)?;
    writeln!(w, "mess.Port: {}", m.port)?;
    writeln!(w, "mess.Type: {}", m.scheme)?;
    writeln!(w, "mess.reversed: {}", m.reversed)?;
    writeln!(w, "mess.remove: {}", m.remove)?;
    writeln!(w, "mess.flushpackets: {}", m.flush_packets)?;
    writeln!(w, "mess.flushwait: {}", m.flush_wait)?;
    writeln!(w, "mess.ping: {} [ms]", m.ping.as_millis())?;
    writeln!(w, "mess.smax: {}", m.smax)?;
    writeln!(w, "mess.ttl: {} [ms]", m.ttl.as_millis())?;
    writeln!(w, "mess.timeout: {} [ms]", m.timeout.as_millis())?;
    writeln!(w, "mess.id: {}", m.id)?;
    writeln!(w, "mess.updatetimelb: {}", rfc822(m.update_time_lb))?;
    writeln!(w, "mess.num_failure_idle: {}", m.num_failure_idle)?;
    writeln!(w, "mess.oldelected: {}", m.old_elected)?;
    writeln!(w, "mess.lastcleantry: {} [ms]", m.last_clean_try.as_millis())?;
    writeln!(w, "updatetime: {}", rfc822(r.update_time))?;
    writeln!(w, "offset: {}", r.offset)?;
    writeln!(w, "stat: {}", r.stat)
}

fn write_balancer(w: &mut impl Write, r: &BalancerInfo) -> io::Result<()> {
    writeln!(w, "balancer: {}", r.balancer)?;
    writeln!(w, "StickySession: {}", r.sticky_session)?;
    writeln!(w, "StickySessionCookie: {}", r.sticky_session_cookie)?;
    writeln!(w, "StickySessionPath: {}", r.sticky_session_path)?;
    writeln!(w, "StickySessionRemove: {}", r.sticky_session_remove)?;
    writeln!(w, "StickySessionForce: {}", r.sticky_session_force)?;
    writeln!(w, "Timeout: {}", r.timeout)?;
    writeln!(w, "Maxattempts: {}", r.max_attempts)?;
    writeln!(w, "updatetime: {} [s]", r.update_time.as_secs())?;
    writeln!(w, "id: {}", r.id)
}

fn write_context(w: &mut impl Write, r: &ContextInfo) -> io::Result<()> {
    writeln!(w, "context: {}", r.context)?;
    writeln!(w, "vhost: {}", r.vhost)?;
    writeln!(w, "node: {}", r.node)?;
    writeln!(w, "status: {}", r.status)?;
    writeln!(w, "nbrequests: {}", r.nb_requests)?;
    writeln!(w, "updatetime: {} [s]", r.update_time.as_secs())?;
    writeln!(w, "id: {}", r.id)
}

fn write_domain(w: &mut impl Write, r: &DomainInfo) -> io::Result<()> {
    writeln!(w, "domain: {}", r.domain)?;
    writeln!(w, "JVMRoute: {}", r.jvm_route)?;
    writeln!(w, "balancer: {}", r.balancer)?;
    writeln!(w, "updatetime: {} [s]", r.update_time.as_secs())?;
    writeln!(w, "id: {}", r.id)
}

fn write_host(w: &mut impl Write, r: &HostInfo) -> io::Result<()> {
    writeln!(w, "host: {}", r.host)?;
    writeln!(w, "vhost: {}", r.vhost)?;
    writeln!(w, "node: {}", r.node)?;
    writeln!(w, "updatetime: {} [s]", r.update_time.as_secs())?;
    writeln!(w, "id: {}", r.id)
}
