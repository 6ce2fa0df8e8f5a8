//! Mapping between the domain's record type / class enums and hickory's.
//!
//! Both sides carry unknown codes, so the mapping goes through the numeric
//! value and never loses a type or class the wire carried.

use hickory_proto::op::ResponseCode as HickoryResponseCode;
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};
use rewriteng_domain::{DnsClass, RecordType, ResponseCode};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(record_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(record_type))
    }
}

pub struct ClassMapper;

impl ClassMapper {
    pub fn to_hickory(class: DnsClass) -> DNSClass {
        DNSClass::from(class.to_u16())
    }

    pub fn from_hickory(class: DNSClass) -> DnsClass {
        DnsClass::from_u16(u16::from(class))
    }
}

pub struct ResponseCodeMapper;

impl ResponseCodeMapper {
    pub fn to_hickory(code: ResponseCode) -> HickoryResponseCode {
        <HickoryResponseCode as From<u16>>::from(code.to_u16())
    }

    pub fn from_hickory(code: HickoryResponseCode) -> ResponseCode {
        ResponseCode::from_u16(u16::from(code))
    }
}
