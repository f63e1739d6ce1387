#![allow(dead_code)]

//! Builders for synthetic slotmem documents.

use std::mem::offset_of;

use slotmem_reader::{
    Schema,
    sans::{
        gap::PROBE_WIDTH,
        header::HEADER_WIDTH,
        layout::{
            RawBalancerInfo, RawContextInfo, RawDomainInfo, RawHostInfo, RawNodeInfo,
            RawNodeMessage,
        },
    },
};

/// A gap window ending in fingerprint A.
pub const WINDOW_A: [u8; PROBE_WIDTH] = [0, 1, 0, 0, 0, 0, 0, 0];
/// A gap window ending in fingerprint B.
pub const WINDOW_B: [u8; PROBE_WIDTH] = [0; PROBE_WIDTH];

pub struct Document {
    schema: Schema,
    bytes: Vec<u8>,
}

impl Document {
    /// Start a document with a header of [`HEADER_WIDTH`] bytes.
    pub fn new(schema: Schema) -> Self {
        Self::with_header(schema, HEADER_WIDTH)
    }

    /// Start a document with a header of `width` bytes of pointer-like noise.
    pub fn with_header(schema: Schema, width: usize) -> Self {
        let bytes = (0..width).map(|i| 0xA0 | (i % 16) as u8).collect();
        Self { schema, bytes }
    }

    pub fn window(mut self, window: [u8; PROBE_WIDTH]) -> Self {
        self.bytes.extend_from_slice(&window);
        self
    }

    pub fn slot(mut self, slot: Vec<u8>) -> Self {
        assert_eq!(slot.len(), self.schema.slot_width());
        self.bytes.extend(slot);
        self
    }

    pub fn sentinel(mut self) -> Self {
        let width = self.schema.slot_width();
        self.bytes.extend(std::iter::repeat_n(0, width));
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

fn put(slot: &mut [u8], offset: usize, bytes: &[u8]) {
    slot[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn put_str(slot: &mut [u8], offset: usize, s: &str) {
    put(slot, offset, s.as_bytes());
}

fn put_i32(slot: &mut [u8], offset: usize, v: i32) {
    put(slot, offset, &v.to_ne_bytes());
}

fn put_i64(slot: &mut [u8], offset: usize, v: i64) {
    put(slot, offset, &v.to_ne_bytes());
}

pub fn balancer_slot(name: &str, id: i32) -> Vec<u8> {
    let mut slot = vec![0; Schema::Balancer.slot_width()];
    put_str(&mut slot, offset_of!(RawBalancerInfo, balancer), name);
    put_i32(&mut slot, offset_of!(RawBalancerInfo, sticky_session), 1);
    put_str(&mut slot, offset_of!(RawBalancerInfo, sticky_session_cookie), "JSESSIONID");
    put_str(&mut slot, offset_of!(RawBalancerInfo, sticky_session_path), "jsessionid");
    put_i32(&mut slot, offset_of!(RawBalancerInfo, timeout), 0);
    put_i32(&mut slot, offset_of!(RawBalancerInfo, max_attempts), 1);
    put_i64(&mut slot, offset_of!(RawBalancerInfo, update_time), 1_700_000_000_000_000);
    put_i32(&mut slot, offset_of!(RawBalancerInfo, id), id);
    slot
}

pub fn context_slot(context: &str, node: i32, id: i32) -> Vec<u8> {
    let mut slot = vec![0; Schema::Context.slot_width()];
    put_str(&mut slot, offset_of!(RawContextInfo, context), context);
    put_i32(&mut slot, offset_of!(RawContextInfo, vhost), 1);
    put_i32(&mut slot, offset_of!(RawContextInfo, node), node);
    put_i32(&mut slot, offset_of!(RawContextInfo, status), 1);
    put_i32(&mut slot, offset_of!(RawContextInfo, nb_requests), 0);
    put_i64(&mut slot, offset_of!(RawContextInfo, update_time), 1_700_000_000_000_000);
    put_i32(&mut slot, offset_of!(RawContextInfo, id), id);
    slot
}

pub fn domain_slot(domain: &str, jvm_route: &str, id: i32) -> Vec<u8> {
    let mut slot = vec![0; Schema::Domain.slot_width()];
    put_str(&mut slot, offset_of!(RawDomainInfo, domain), domain);
    put_str(&mut slot, offset_of!(RawDomainInfo, jvm_route), jvm_route);
    put_str(&mut slot, offset_of!(RawDomainInfo, balancer), "mycluster");
    put_i32(&mut slot, offset_of!(RawDomainInfo, id), id);
    slot
}

pub fn host_slot(host: &str, node: i32, id: i32) -> Vec<u8> {
    let mut slot = vec![0; Schema::Host.slot_width()];
    put_str(&mut slot, offset_of!(RawHostInfo, host), host);
    put_i32(&mut slot, offset_of!(RawHostInfo, vhost), 1);
    put_i32(&mut slot, offset_of!(RawHostInfo, node), node);
    put_i64(&mut slot, offset_of!(RawHostInfo, update_time), 1_700_000_000_000_000);
    put_i32(&mut slot, offset_of!(RawHostInfo, id), id);
    slot
}

pub fn node_slot(jvm_route: &str, id: i32) -> Vec<u8> {
    let mut slot = vec![0; Schema::Node.slot_width()];
    let mess = offset_of!(RawNodeInfo, mess);
    put_str(&mut slot, mess + offset_of!(RawNodeMessage, balancer), "mycluster");
    put_str(&mut slot, mess + offset_of!(RawNodeMessage, jvm_route), jvm_route);
    put_str(&mut slot, mess + offset_of!(RawNodeMessage, host), "10.0.0.7");
    put_str(&mut slot, mess + offset_of!(RawNodeMessage, port), "8009");
    put_str(&mut slot, mess + offset_of!(RawNodeMessage, scheme), "ajp");
    put_i64(&mut slot, mess + offset_of!(RawNodeMessage, ping), 10_000_000);
    put_i32(&mut slot, mess + offset_of!(RawNodeMessage, smax), 26);
    put_i64(&mut slot, mess + offset_of!(RawNodeMessage, ttl), 60_000_000);
    put_i32(&mut slot, mess + offset_of!(RawNodeMessage, id), id);
    put_i64(&mut slot, offset_of!(RawNodeInfo, update_time), 1_700_000_000_000_000);
    put_i32(&mut slot, offset_of!(RawNodeInfo, offset), id * 8);
    slot
}

/// A balancer table of `names`, with gap and sentinel.
pub fn balancer_table(names: &[&str]) -> Vec<u8> {
    let mut document = Document::new(Schema::Balancer).window(WINDOW_A);
    for (id, name) in names.iter().enumerate() {
        document = document.slot(balancer_slot(name, id as i32 + 1));
    }
    document.sentinel().build()
}
