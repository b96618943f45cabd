use crate::dns::MessageBuilder;
use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_proto::rr::RData;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tapguard_application::ports::HostnameResolver;
use tapguard_domain::DomainError;
use tokio::net::UdpSocket;
use tracing::debug;

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// PTR lookups over UDP against a single configured resolver.
///
/// The whole exchange (send and receive) is bounded by `timeout`.
pub struct PtrHostnameResolver {
    server: SocketAddr,
    timeout: Duration,
}

impl PtrHostnameResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(self.server).await?;
        socket.send(query).await?;

        let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let len = socket.recv(&mut buf).await?;
        buf.truncate(len);
        Ok(buf)
    }
}

#[async_trait]
impl HostnameResolver for PtrHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        let (id, query) = MessageBuilder::build_ptr_query(&ip)?;

        debug!(ip = %ip, server = %self.server, "Performing PTR lookup");

        let bytes = tokio::time::timeout(self.timeout, self.exchange(&query))
            .await
            .map_err(|_| DomainError::QueryTimeout)??;

        let response = Message::from_vec(&bytes).map_err(|e| {
            DomainError::HostnameLookup(format!("Failed to parse PTR response: {}", e))
        })?;
        if response.id() != id {
            return Err(DomainError::HostnameLookup(format!(
                "PTR response id {} does not match query id {}",
                response.id(),
                id
            )));
        }

        for record in response.answers() {
            if let RData::PTR(ptr) = record.data() {
                let hostname = ptr.to_utf8();
                debug!(ip = %ip, hostname = %hostname, "PTR lookup successful");
                return Ok(Some(hostname));
            }
        }

        debug!(ip = %ip, rcode = ?response.response_code(), "PTR lookup returned no records");
        Ok(None)
    }
}
