use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{
    error::{ProtoError, Result},
    packets::{encode_packet, PacketEncode, PacketFrame, MAX_PACKET_SIZE},
    varint::{read_varint, read_varint_stream},
};

/// Write one length-prefixed packet and flush it.
pub async fn write_frame<W, P>(writer: &mut W, pkt: &P) -> Result<()>
where
    W: AsyncWrite + Unpin,
    P: PacketEncode,
{
    let mut buf = Vec::new();
    encode_packet(&mut buf, pkt)?;
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one length-prefixed packet.
///
/// The declared length is accumulated with `read_exact`, since a single
/// network read may return fewer bytes. A peer that closes the stream before
/// delivering it is a truncation error.
pub async fn read_frame<R>(reader: &mut R) -> Result<PacketFrame>
where
    R: AsyncRead + Unpin,
{
    let packet_len = read_varint_stream(reader).await?;
    if packet_len < 0 {
        return Err(ProtoError::NegativeLength(packet_len));
    }

    let packet_len = packet_len as usize;
    if packet_len > MAX_PACKET_SIZE {
        return Err(ProtoError::PacketTooLarge { len: packet_len });
    }

    let mut packet = vec![0u8; packet_len];
    if let Err(err) = reader.read_exact(&mut packet).await {
        if err.kind() == ErrorKind::UnexpectedEof {
            return Err(ProtoError::UnexpectedEof);
        }
        return Err(ProtoError::Io(err));
    }

    let mut body = packet.as_slice();
    let id = read_varint(&mut body)?;
    Ok(PacketFrame {
        id,
        body: body.to_vec(),
    })
}
