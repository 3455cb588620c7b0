use super::{
    error::{ProtoError, Result},
    varint::{read_varint, varint_len, write_varint},
};

/// Maximum packet length in bytes (protocol limit).
pub const MAX_PACKET_SIZE: usize = 2_097_152;

/// Protocol version sent in the handshake. Only the status response is
/// consumed here, so a fixed recent version is enough.
pub const PROTOCOL_VERSION: i32 = 770;

const NEXT_STATE_STATUS: i32 = 1;

/// Serverbound packet body encoding.
pub trait PacketEncode {
    const ID: i32;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()>;
}

/// Clientbound packet body decoding.
pub trait PacketDecode: Sized {
    const ID: i32;

    fn decode_body(input: &mut &[u8]) -> Result<Self>;
}

/// Decoded packet frame with the raw body (without ID).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketFrame {
    pub id: i32,
    pub body: Vec<u8>,
}

impl PacketFrame {
    /// Decode the body as `P`. The frame id is recorded but not validated;
    /// a status server answers the request with id 0x00 and nothing else.
    pub fn decode<P: PacketDecode>(&self) -> Result<P> {
        let mut input = self.body.as_slice();
        P::decode_body(&mut input)
    }
}

/// Handshake (C2S): switches the connection into the status state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeC2s<'a> {
    pub protocol_version: i32,
    pub server_address: &'a str,
    pub server_port: u16,
}

impl<'a> PacketEncode for HandshakeC2s<'a> {
    const ID: i32 = 0x00;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_varint(out, self.protocol_version);
        write_string(out, self.server_address)?;
        out.extend_from_slice(&self.server_port.to_be_bytes());
        write_varint(out, NEXT_STATE_STATUS);
        Ok(())
    }
}

/// Status request (C2S) packet, empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRequestC2s;

impl PacketEncode for StatusRequestC2s {
    const ID: i32 = 0x00;

    fn encode_body(&self, _out: &mut Vec<u8>) -> Result<()> {
        Ok(())
    }
}

/// Status response (S2C) carrying the status JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponseS2c {
    pub json: String,
}

impl PacketDecode for StatusResponseS2c {
    const ID: i32 = 0x00;

    fn decode_body(input: &mut &[u8]) -> Result<Self> {
        Ok(Self {
            json: read_string(input)?,
        })
    }
}

impl PacketEncode for StatusResponseS2c {
    const ID: i32 = 0x00;

    fn encode_body(&self, out: &mut Vec<u8>) -> Result<()> {
        write_string(out, &self.json)
    }
}

/// Encode `pkt` as one length-prefixed frame.
pub fn encode_packet<P: PacketEncode>(out: &mut Vec<u8>, pkt: &P) -> Result<()> {
    let mut body = Vec::new();
    pkt.encode_body(&mut body)?;

    let packet_len = varint_len(P::ID) + body.len();
    if packet_len > MAX_PACKET_SIZE {
        return Err(ProtoError::PacketTooLarge { len: packet_len });
    }

    write_varint(out, packet_len as i32);
    write_varint(out, P::ID);
    out.extend_from_slice(&body);
    Ok(())
}

fn write_string(out: &mut Vec<u8>, value: &str) -> Result<()> {
    if value.len() > i32::MAX as usize {
        return Err(ProtoError::PacketTooLarge { len: value.len() });
    }

    write_varint(out, value.len() as i32);
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

fn read_string(input: &mut &[u8]) -> Result<String> {
    let byte_len = read_varint(input)?;
    if byte_len < 0 {
        return Err(ProtoError::NegativeLength(byte_len));
    }

    let byte_len = byte_len as usize;
    if input.len() < byte_len {
        return Err(ProtoError::UnexpectedEof);
    }

    let (head, tail) = input.split_at(byte_len);
    let value = std::str::from_utf8(head).map_err(|_| ProtoError::InvalidUtf8)?;
    *input = tail;
    Ok(value.to_owned())
}
