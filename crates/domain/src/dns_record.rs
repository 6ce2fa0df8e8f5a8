pub mod dns_class;
pub mod record;
pub mod record_data;
pub mod record_type;

pub use dns_class::DnsClass;
pub use record::ResourceRecord;
pub use record_data::{OpaquePayload, RecordData, Soa, Srv};
pub use record_type::RecordType;
