use async_trait::async_trait;
use rewriteng_domain::{DnsMessage, DomainError, ResponseCode};

/// Sink for the single response of a request.
///
/// Handlers that want to post-process a response wrap the writer they were
/// given and pass the wrapper down the chain.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write_msg(&mut self, response: DnsMessage) -> Result<(), DomainError>;
}

/// One link of the request-handling chain.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Serve `request`, writing at most one response to `writer`.
    ///
    /// The returned code mirrors what was written; on `Err` nothing was
    /// written and the caller answers with SERVFAIL.
    async fn serve_dns(
        &self,
        writer: &mut dyn ResponseWriter,
        request: DnsMessage,
    ) -> Result<ResponseCode, DomainError>;
}
