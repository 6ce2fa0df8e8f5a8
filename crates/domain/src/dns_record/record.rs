use super::{DnsClass, RecordData, RecordType};

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub name: String,

    pub dns_class: DnsClass,

    pub ttl: u32,

    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            dns_class: DnsClass::IN,
            ttl,
            data,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }
}
