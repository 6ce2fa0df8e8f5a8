use rewriteng_domain::{
    DnsClass, DnsMessage, Question, RecordData, RecordType, ResourceRecord,
};
use rewriteng_infrastructure::dns::MessageCodec;

pub fn query(id: u16, name: &str, record_type: RecordType) -> DnsMessage {
    DnsMessage::query(id, Question::new(name, DnsClass::IN, record_type))
}

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    MessageCodec::encode(&query(id, name, record_type)).unwrap()
}

pub fn a(name: &str, addr: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::A(addr.parse().unwrap()))
}

pub fn cname(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::CNAME(target.to_string()))
}

pub fn txt(name: &str, text: &str) -> ResourceRecord {
    ResourceRecord::new(name, 300, RecordData::TXT(vec![text.to_string()]))
}
