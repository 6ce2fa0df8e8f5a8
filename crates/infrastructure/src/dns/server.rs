use crate::dns::codec::MessageCodec;
use crate::dns::wire_header::{build_error_response, RawHeader, MAX_UDP_PAYLOAD};
use async_trait::async_trait;
use rewriteng_application::ports::{DnsHandler, ResponseWriter};
use rewriteng_domain::{DnsMessage, DomainError, ResponseCode};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "UDP",
            Protocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns one raw client packet into one raw reply by running it through the
/// handler chain.
pub struct DnsServerHandler {
    chain: Arc<dyn DnsHandler>,
}

impl DnsServerHandler {
    pub fn new(chain: Arc<dyn DnsHandler>) -> Self {
        Self { chain }
    }

    /// Returns `None` when the packet must be dropped without a reply.
    pub async fn handle_raw(&self, bytes: &[u8], protocol: Protocol) -> Option<Vec<u8>> {
        let Some(header) = RawHeader::parse(bytes) else {
            debug!(
                len = bytes.len(),
                protocol = %protocol,
                "Dropping packet shorter than a DNS header"
            );
            return None;
        };

        if header.is_response() {
            debug!(id = header.id, protocol = %protocol, "Dropping unsolicited DNS response");
            return None;
        }

        if header.op_code() != 0 {
            debug!(id = header.id, op_code = header.op_code(), "Unsupported opcode");
            return Some(build_error_response(&header, ResponseCode::NotImp));
        }

        let request = match MessageCodec::decode(bytes) {
            Ok(request) => request,
            Err(e) => {
                warn!(id = header.id, error = %e, "Failed to parse DNS request");
                return Some(build_error_response(&header, ResponseCode::FormErr));
            }
        };

        let response = self.resolve(request).await;

        match Self::encode_for(response, protocol) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                error!(id = header.id, error = %e, "Failed to encode DNS response");
                Some(build_error_response(&header, ResponseCode::ServFail))
            }
        }
    }

    async fn resolve(&self, request: DnsMessage) -> DnsMessage {
        let mut writer = CapturingWriter::default();
        let id = request.id;

        let fallback = DnsMessage::response_to(&request, ResponseCode::ServFail);

        match self.chain.serve_dns(&mut writer, request).await {
            Ok(rcode) => match writer.response {
                Some(mut response) => {
                    debug!(id, rcode = %rcode, "Request served");
                    response.id = id;
                    response
                }
                None => {
                    warn!(id, handler = self.chain.name(), "Handler chain wrote no response");
                    fallback
                }
            },
            Err(e @ DomainError::InvalidRewrittenName(_)) => {
                warn!(id, error = %e, "Rewritten question rejected");
                fallback
            }
            Err(e) => {
                error!(id, error = %e, "Handler chain failed");
                fallback
            }
        }
    }

    fn encode_for(response: DnsMessage, protocol: Protocol) -> Result<Vec<u8>, DomainError> {
        let encoded = MessageCodec::encode(&response)?;

        if protocol == Protocol::Tcp || encoded.len() <= MAX_UDP_PAYLOAD {
            return Ok(encoded);
        }

        debug!(id = response.id, size = encoded.len(), "Truncating UDP response");
        MessageCodec::encode(&DnsMessage {
            truncated: true,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            ..response
        })
    }
}

#[derive(Default)]
struct CapturingWriter {
    response: Option<DnsMessage>,
}

#[async_trait]
impl ResponseWriter for CapturingWriter {
    async fn write_msg(&mut self, response: DnsMessage) -> Result<(), DomainError> {
        self.response = Some(response);
        Ok(())
    }
}
