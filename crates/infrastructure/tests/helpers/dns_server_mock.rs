#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::PTR;
use hickory_proto::rr::{Name, RData, Record};
use std::net::SocketAddr;
use std::str::FromStr;
use tapguard_infrastructure::dns::MessageBuilder;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// UDP responder answering every PTR query with `hostname`, or staying
/// silent when `hostname` is `None`.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(hostname: Option<&str>) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let hostname = hostname.map(|h| Name::from_str(h).unwrap());

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Some(hostname) = hostname.clone() else { continue };
                        if let Some(response) = Self::build_response(&buf[..len], hostname) {
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_response(query: &[u8], hostname: Name) -> Option<Vec<u8>> {
        let query = Message::from_vec(query).ok()?;
        let question = query.queries().first()?.clone();

        let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
        response.add_query(question.clone());
        response.add_answer(Record::from_rdata(
            question.name().clone(),
            60,
            RData::PTR(PTR(hostname)),
        ));
        MessageBuilder::serialize_message(&response).ok()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
