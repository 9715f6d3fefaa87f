//! TCP Transport for DNS queries (RFC 1035 §4.2.2): two-byte length prefix framing.

use super::transport_error;
use ferrous_doh_domain::DomainError;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// One connection per query; used when a UDP reply came back truncated.
pub async fn exchange(server: SocketAddr, query: &[u8]) -> Result<Vec<u8>, DomainError> {
    let mut stream = TcpStream::connect(server)
        .await
        .map_err(|e| transport_error(server, format!("connect failed: {}", e)))?;
    stream
        .set_nodelay(true)
        .map_err(|e| transport_error(server, e))?;

    send_with_length_prefix(&mut stream, query)
        .await
        .map_err(|e| transport_error(server, e))?;

    read_with_length_prefix(&mut stream)
        .await
        .map_err(|e| transport_error(server, e))
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "DNS message too large")
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_length_prefix_framing() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        send_with_length_prefix(&mut client, b"hello").await.unwrap();
        let received = read_with_length_prefix(&mut server).await.unwrap();

        assert_eq!(received, b"hello");
    }

    #[tokio::test]
    async fn test_truncated_frame_is_error() {
        let (mut client, mut server) = tokio::io::duplex(1024);
        client.write_all(&[0x00, 0x10, 0x01]).await.unwrap();
        drop(client);

        assert!(read_with_length_prefix(&mut server).await.is_err());
    }
}
