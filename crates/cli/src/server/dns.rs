use rewriteng_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use rewriteng_infrastructure::dns::{DnsServerHandler, Protocol as DnsProtocol};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
const UDP_RECV_BUFFER: usize = 4096;

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<DnsServerHandler>,
    tcp_enabled: bool,
) -> anyhow::Result<()> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    info!(bind_address = %socket_addr, tcp_enabled, "Starting DNS server");

    let mut join_set: JoinSet<()> = JoinSet::new();

    let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
    info!(protocol = "UDP", "DNS server listening");
    let handler_udp = handler.clone();
    join_set.spawn(async move {
        run_udp_listener(udp_socket, handler_udp).await;
    });

    if tcp_enabled {
        let tcp_listener = create_tcp_listener(domain, socket_addr)?;
        info!(protocol = "TCP", "DNS server listening");
        join_set.spawn(async move {
            run_tcp_listener(tcp_listener, handler).await;
        });
    }

    info!("DNS server ready to accept queries");

    while join_set.join_next().await.is_some() {}
    Ok(())
}

async fn run_udp_listener(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>) {
    let mut recv_buf = [0u8; UDP_RECV_BUFFER];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw(&query, DnsProtocol::Udp).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send UDP response");
                }
            }
        });
    }
}

async fn run_tcp_listener(listener: TcpListener, handler: Arc<DnsServerHandler>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let handler = handler.clone();
                tokio::spawn(async move {
                    serve_tcp_connection(stream, peer, handler).await;
                });
            }
            Err(e) => error!(error = %e, "TCP accept error"),
        }
    }
}

/// Serves length-prefixed queries until the client closes or goes idle.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
) {
    loop {
        let query =
            match tokio::time::timeout(TCP_IDLE_TIMEOUT, read_with_length_prefix(&mut stream))
                .await
            {
                Ok(Ok(query)) => query,
                Ok(Err(e)) => {
                    debug!(client = %peer, error = %e, "TCP connection closed");
                    return;
                }
                Err(_) => {
                    debug!(client = %peer, "TCP connection idle, closing");
                    return;
                }
            };

        let Some(response) = handler.handle_raw(&query, DnsProtocol::Tcp).await else {
            continue;
        };

        if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
            debug!(client = %peer, error = %e, "Failed to send TCP response");
            return;
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
