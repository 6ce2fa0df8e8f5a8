use super::RecordType;
use std::any::Any;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// SOA record data. Names are kept in presentation form with a trailing dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srv {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// Record data the rewriter does not interpret.
///
/// The codec that produced it stashes its own representation here and gets it
/// back on encode, so unhandled types pass through byte-for-byte.
#[derive(Clone)]
pub struct OpaquePayload {
    record_type: RecordType,
    inner: Arc<dyn Any + Send + Sync>,
}

impl OpaquePayload {
    pub fn new<T: Any + Send + Sync>(record_type: RecordType, value: T) -> Self {
        Self {
            record_type,
            inner: Arc::new(value),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for OpaquePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaquePayload")
            .field("record_type", &self.record_type)
            .finish_non_exhaustive()
    }
}

impl PartialEq for OpaquePayload {
    fn eq(&self, other: &Self) -> bool {
        self.record_type == other.record_type && Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(String),
    NS(String),
    PTR(String),
    TXT(Vec<String>),
    SOA(Soa),
    SRV(Srv),
    Unhandled(OpaquePayload),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::CNAME(_) => RecordType::CNAME,
            RecordData::NS(_) => RecordType::NS,
            RecordData::PTR(_) => RecordType::PTR,
            RecordData::TXT(_) => RecordType::TXT,
            RecordData::SOA(_) => RecordType::SOA,
            RecordData::SRV(_) => RecordType::SRV,
            RecordData::Unhandled(payload) => payload.record_type(),
        }
    }
}
