use ferrous_doh_domain::{DnsMessage, Record, ResponseCode};
use ferrous_doh_infrastructure::dns::codec::wire;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Answers every question with one A record.
    Answer { address: Ipv4Addr, ttl: u32 },

    /// Sets TC over UDP; the full answer is only available over TCP.
    Truncate { address: Ipv4Addr, ttl: u32 },

    ServFail,

    /// Replies with an id that does not match the query.
    WrongId,

    /// Reads queries and never replies.
    Silent,
}

/// UDP (and, when truncating, TCP) DNS server on an ephemeral loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));

        let tcp = match behavior {
            MockBehavior::Truncate { .. } => Some(TcpListener::bind(addr).await?),
            _ => None,
        };

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = Arc::clone(&queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::udp_reply(behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = accept(&tcp) => {
                        if let Ok((mut stream, _)) = accepted {
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(response) = Self::full_reply(behavior, &query) {
                                    let len = (response.len() as u16).to_be_bytes();
                                    let _ = stream.write_all(&len).await;
                                    let _ = stream.write_all(&response).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Number of UDP queries received so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn udp_reply(behavior: MockBehavior, query: &[u8]) -> Option<Vec<u8>> {
        match behavior {
            MockBehavior::Truncate { .. } => {
                let query = wire::decode(query).ok()?.message;
                let reply = DnsMessage::reply_to(&query);
                let mut bytes = wire::encode(&reply).ok()?;
                bytes[2] |= 0x02;
                Some(bytes)
            }
            _ => Self::full_reply(behavior, query),
        }
    }

    fn full_reply(behavior: MockBehavior, query: &[u8]) -> Option<Vec<u8>> {
        let query = wire::decode(query).ok()?.message;
        let mut reply = DnsMessage::reply_to(&query);

        match behavior {
            MockBehavior::Answer { address, ttl } | MockBehavior::Truncate { address, ttl } => {
                for question in &query.questions {
                    reply.push_answer(Record::a(question.name.clone(), ttl, address));
                }
            }
            MockBehavior::ServFail => reply.response_code = ResponseCode::ServFail,
            MockBehavior::WrongId => reply.id = query.id.wrapping_add(1),
            MockBehavior::Silent => return None,
        }

        wire::encode(&reply).ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn accept(
    listener: &Option<TcpListener>,
) -> std::io::Result<(tokio::net::TcpStream, SocketAddr)> {
    match listener {
        Some(listener) => listener.accept().await,
        None => std::future::pending().await,
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
