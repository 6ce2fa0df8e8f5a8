use rewriteng_domain::{DnsMessage, ResourceRecord, ResponseCode};
use rewriteng_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use rewriteng_infrastructure::dns::MessageCodec;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Clone)]
pub enum UpstreamBehavior {
    Answer(Vec<ResourceRecord>),
    /// Truncated over UDP, full answer over TCP.
    TruncatedOverUdp(Vec<ResourceRecord>),
    WrongId,
    Silent,
}

/// Upstream resolver on 127.0.0.1 serving both UDP and TCP on one port.
pub struct MockUpstream {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<DnsMessage>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start(behavior: UpstreamBehavior) -> Self {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = udp.local_addr().unwrap();
        let tcp = TcpListener::bind(addr).await.unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let log = received.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(reply) = reply_to(&buf[..len], &behavior, false, &log) {
                                let _ = udp.send_to(&reply, peer).await;
                            }
                        }
                    }
                    result = tcp.accept() => {
                        if let Ok((mut stream, _)) = result {
                            let behavior = behavior.clone();
                            let log = log.clone();
                            tokio::spawn(async move {
                                let Ok(request) = read_with_length_prefix(&mut stream).await else {
                                    return;
                                };
                                if let Some(reply) = reply_to(&request, &behavior, true, &log) {
                                    let _ = send_with_length_prefix(&mut stream, &reply).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<DnsMessage> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn reply_to(
    bytes: &[u8],
    behavior: &UpstreamBehavior,
    over_tcp: bool,
    log: &Mutex<Vec<DnsMessage>>,
) -> Option<Vec<u8>> {
    let request = MessageCodec::decode(bytes).ok()?;
    log.lock().unwrap().push(request.clone());

    let mut response = DnsMessage::response_to(&request, ResponseCode::NoError);
    match behavior {
        UpstreamBehavior::Answer(answers) => response.answers = answers.clone(),
        UpstreamBehavior::TruncatedOverUdp(answers) => {
            if over_tcp {
                response.answers = answers.clone();
            } else {
                response.truncated = true;
            }
        }
        UpstreamBehavior::WrongId => response.id = request.id.wrapping_add(1),
        UpstreamBehavior::Silent => return None,
    }

    MessageCodec::encode(&response).ok()
}
