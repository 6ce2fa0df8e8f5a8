use crate::dns::codec::MessageCodec;
use crate::dns::transport::{DnsTransport, TcpTransport, UdpTransport};
use async_trait::async_trait;
use rewriteng_application::ports::{DnsHandler, ResponseWriter};
use rewriteng_domain::{DnsMessage, DomainError, ResponseCode, UpstreamConfig};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_DNS_PORT: u16 = 53;

struct UpstreamServer {
    addr: SocketAddr,
    udp: UdpTransport,
    tcp: TcpTransport,
}

impl UpstreamServer {
    fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            udp: UdpTransport::new(addr),
            tcp: TcpTransport::new(addr),
        }
    }
}

/// Terminal handler of the chain: sends the query to the configured
/// upstream servers in order and writes back the first usable answer.
pub struct UpstreamForwarder {
    servers: Vec<UpstreamServer>,
    timeout: Duration,
    tcp_fallback: bool,
}

impl UpstreamForwarder {
    pub const NAME: &'static str = "forward";

    pub fn new(servers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self {
            servers: servers.into_iter().map(UpstreamServer::new).collect(),
            timeout,
            tcp_fallback: true,
        }
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let servers = config
            .servers
            .iter()
            .map(|server| parse_server_addr(server))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(servers, Duration::from_millis(config.timeout_ms))
            .with_tcp_fallback(config.tcp_fallback))
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.servers.iter().map(|server| server.addr).collect()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(
        &self,
        server: &UpstreamServer,
        query_bytes: &[u8],
        query_id: u16,
    ) -> Result<DnsMessage, DomainError> {
        let response = server.udp.send(query_bytes, self.timeout).await?;
        let message = parse_response(&response.bytes, query_id)?;

        if !message.truncated || !self.tcp_fallback {
            return Ok(message);
        }

        debug!(server = %server.addr, "Truncated UDP response, retrying over TCP");
        let response = server.tcp.send(query_bytes, self.timeout).await?;
        parse_response(&response.bytes, query_id)
    }
}

#[async_trait]
impl DnsHandler for UpstreamForwarder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn serve_dns(
        &self,
        writer: &mut dyn ResponseWriter,
        request: DnsMessage,
    ) -> Result<ResponseCode, DomainError> {
        let original_id = request.id;
        let mut query = request;
        query.id = fastrand::u16(..);
        let query_bytes = MessageCodec::encode(&query)?;

        for server in &self.servers {
            match self.exchange(server, &query_bytes, query.id).await {
                Ok(mut response) => {
                    response.id = original_id;
                    let rcode = response.response_code;

                    debug!(
                        server = %server.addr,
                        rcode = %rcode,
                        answers = response.answers.len(),
                        "Upstream response received"
                    );

                    writer.write_msg(response).await?;
                    return Ok(rcode);
                }
                Err(e) => {
                    warn!(server = %server.addr, error = %e, "Upstream exchange failed");
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }
}

fn parse_response(bytes: &[u8], expected_id: u16) -> Result<DnsMessage, DomainError> {
    let message =
        MessageCodec::decode(bytes).map_err(|e| DomainError::InvalidDnsResponse(e.to_string()))?;

    if message.id != expected_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response id {} does not match query id {}",
            message.id, expected_id
        )));
    }

    Ok(message)
}

/// Accepts `ip:port`, `[v6]:port` or a bare address on port 53.
pub fn parse_server_addr(server: &str) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| DomainError::ConfigError(format!("Invalid upstream server '{}'", server)))
}
