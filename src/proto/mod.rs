//! Minimal Minecraft protocol support: varints, length-prefixed frames, and
//! the handshake/status packets.
pub mod error;
pub mod framing;
pub mod packets;
pub mod varint;

#[cfg(test)]
mod tests;

pub use error::ProtoError;
pub use framing::{read_frame, write_frame};
pub use packets::{
    encode_packet, HandshakeC2s, PacketDecode, PacketEncode, PacketFrame, StatusRequestC2s,
    StatusResponseS2c, MAX_PACKET_SIZE, PROTOCOL_VERSION,
};
