use crate::dns_record::{DnsClass, RecordType, ResourceRecord};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Unknown(u16),
}

impl ResponseCode {
    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three record sections of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Answer, Section::Authority, Section::Additional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "answer" => Ok(Section::Answer),
            "authority" => Ok(Section::Authority),
            "additional" => Ok(Section::Additional),
            _ => Err(format!(
                "Only answer, additional, authority supported, received: {}",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub query_class: DnsClass,
    pub query_type: RecordType,
}

impl Question {
    pub fn new(name: impl Into<String>, query_class: DnsClass, query_type: RecordType) -> Self {
        Self {
            name: name.into(),
            query_class,
            query_type,
        }
    }
}

/// Decoded DNS message, request or response.
///
/// Only the header bits the rewrite pipeline reads or must echo are kept.
/// EDNS is owned by the transport and is not represented here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DnsMessage {
    pub id: u16,
    pub is_response: bool,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub queries: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl DnsMessage {
    /// Build a single-question query.
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            id,
            queries: vec![question],
            ..Self::default()
        }
    }

    /// Empty response mirroring the request's id, question and RD bit.
    pub fn response_to(request: &DnsMessage, response_code: ResponseCode) -> Self {
        Self {
            id: request.id,
            is_response: true,
            recursion_desired: request.recursion_desired,
            recursion_available: true,
            response_code,
            queries: request.queries.clone(),
            ..Self::default()
        }
    }

    pub fn question(&self) -> Option<&Question> {
        self.queries.first()
    }

    pub fn question_mut(&mut self) -> Option<&mut Question> {
        self.queries.first_mut()
    }

    pub fn section(&self, section: Section) -> &[ResourceRecord] {
        match section {
            Section::Answer => &self.answers,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<ResourceRecord> {
        match section {
            Section::Answer => &mut self.answers,
            Section::Authority => &mut self.authority,
            Section::Additional => &mut self.additional,
        }
    }
}
