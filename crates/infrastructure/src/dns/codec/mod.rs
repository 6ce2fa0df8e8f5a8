//! Wire codec between raw DNS messages and the domain message model.
//!
//! Record data the rewriter understands is decoded into typed
//! `RecordData` variants. Everything else is kept as hickory `RData` inside an
//! opaque payload and re-emitted untouched. EDNS is not carried across.

mod rdata;
pub mod type_map;

pub use type_map::{ClassMapper, RecordTypeMapper, ResponseCodeMapper};

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use rewriteng_domain::{DnsMessage, DomainError, Question};

pub struct MessageCodec;

impl MessageCodec {
    pub fn decode(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message = Message::from_vec(bytes).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e))
        })?;

        Ok(Self::from_hickory(&message))
    }

    pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        let message = Self::to_hickory(message)?;
        Self::serialize_message(&message)
    }

    pub fn from_hickory(message: &Message) -> DnsMessage {
        DnsMessage {
            id: message.id(),
            is_response: message.message_type() == MessageType::Response,
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            recursion_desired: message.recursion_desired(),
            recursion_available: message.recursion_available(),
            response_code: ResponseCodeMapper::from_hickory(message.response_code()),
            queries: message
                .queries()
                .iter()
                .map(|query| {
                    Question::new(
                        query.name().to_ascii(),
                        ClassMapper::from_hickory(query.query_class()),
                        RecordTypeMapper::from_hickory(query.query_type()),
                    )
                })
                .collect(),
            answers: message.answers().iter().map(rdata::record_from_hickory).collect(),
            authority: message
                .name_servers()
                .iter()
                .map(rdata::record_from_hickory)
                .collect(),
            additional: message
                .additionals()
                .iter()
                .map(rdata::record_from_hickory)
                .collect(),
        }
    }

    pub fn to_hickory(message: &DnsMessage) -> Result<Message, DomainError> {
        let message_type = if message.is_response {
            MessageType::Response
        } else {
            MessageType::Query
        };

        let mut out = Message::new(message.id, message_type, OpCode::Query);
        out.set_authoritative(message.authoritative);
        out.set_truncated(message.truncated);
        out.set_recursion_desired(message.recursion_desired);
        out.set_recursion_available(message.recursion_available);
        out.set_response_code(ResponseCodeMapper::to_hickory(message.response_code));

        for question in &message.queries {
            let mut query = Query::query(
                rdata::parse_name(&question.name)?,
                RecordTypeMapper::to_hickory(question.query_type),
            );
            query.set_query_class(ClassMapper::to_hickory(question.query_class));
            out.add_query(query);
        }
        for record in &message.answers {
            out.add_answer(rdata::record_to_hickory(record)?);
        }
        for record in &message.authority {
            out.add_name_server(rdata::record_to_hickory(record)?);
        }
        for record in &message.additional {
            out.add_additional(rdata::record_to_hickory(record)?);
        }

        Ok(out)
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
