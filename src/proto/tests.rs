use tokio::io::AsyncWriteExt;

use super::{
    error::ProtoError,
    framing::{read_frame, write_frame},
    packets::{
        encode_packet, HandshakeC2s, PacketDecode, PacketEncode, StatusResponseS2c,
        PROTOCOL_VERSION,
    },
    varint::{read_varint, read_varint_stream, varint_len, write_varint},
};

struct RawBody(Vec<u8>);

impl PacketEncode for RawBody {
    const ID: i32 = 0x00;

    fn encode_body(&self, out: &mut Vec<u8>) -> super::error::Result<()> {
        out.extend_from_slice(&self.0);
        Ok(())
    }
}

#[test]
fn varint_roundtrip() {
    let values = [0, 1, 2, 127, 128, 255, 16_383, 16_384, 2_147_483_647];
    for value in values {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        assert_eq!(buf.len(), varint_len(value));

        let mut slice = buf.as_slice();
        let decoded = read_varint(&mut slice).unwrap();
        assert_eq!(decoded, value);
        assert!(slice.is_empty());
    }
}

#[test]
fn varint_encoded_lengths() {
    let cases = [(0, 1), (127, 1), (128, 2), (16_383, 2), (16_384, 3)];
    for (value, expected) in cases {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        assert_eq!(buf.len(), expected, "value {value}");
    }
}

#[test]
fn varint_truncated_is_an_error() {
    let mut buf = Vec::new();
    write_varint(&mut buf, 300);

    let mut slice = &buf[..1];
    assert!(matches!(
        read_varint(&mut slice),
        Err(ProtoError::UnexpectedEof)
    ));
}

#[tokio::test]
async fn varint_stream_eof_mid_sequence() {
    let (mut client, mut server) = tokio::io::duplex(64);
    client.write_all(&[0x80]).await.unwrap();
    drop(client);

    assert!(matches!(
        read_varint_stream(&mut server).await,
        Err(ProtoError::UnexpectedEof)
    ));
}

#[tokio::test]
async fn frame_roundtrip_various_lengths() {
    for len in [0usize, 1, 200] {
        let body: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let (mut client, mut server) = tokio::io::duplex(4096);

        write_frame(&mut client, &RawBody(body.clone())).await.unwrap();
        let frame = read_frame(&mut server).await.unwrap();

        assert_eq!(frame.id, 0x00);
        assert_eq!(frame.body, body);
    }
}

#[tokio::test]
async fn frame_truncated_body_is_an_error() {
    let (mut client, mut server) = tokio::io::duplex(64);
    // declares a 10 byte packet, delivers 3
    client.write_all(&[10, 0x00, 1, 2]).await.unwrap();
    drop(client);

    assert!(matches!(
        read_frame(&mut server).await,
        Err(ProtoError::UnexpectedEof)
    ));
}

#[test]
fn handshake_wire_layout() {
    let packet = HandshakeC2s {
        protocol_version: PROTOCOL_VERSION,
        server_address: "localhost",
        server_port: 25565,
    };

    let mut buf = Vec::new();
    encode_packet(&mut buf, &packet).unwrap();

    let mut slice = buf.as_slice();
    let packet_len = read_varint(&mut slice).unwrap();
    assert_eq!(packet_len as usize, slice.len());
    assert_eq!(read_varint(&mut slice).unwrap(), 0x00);
    assert_eq!(read_varint(&mut slice).unwrap(), PROTOCOL_VERSION);

    let host_len = read_varint(&mut slice).unwrap() as usize;
    assert_eq!(&slice[..host_len], b"localhost");
    slice = &slice[host_len..];

    assert_eq!(u16::from_be_bytes([slice[0], slice[1]]), 25565);
    assert_eq!(slice[2], 1); // next state: status
    assert_eq!(slice.len(), 3);
}

#[test]
fn status_response_roundtrip() {
    let packet = StatusResponseS2c {
        json: r#"{"description":"hi"}"#.to_string(),
    };

    let mut buf = Vec::new();
    encode_packet(&mut buf, &packet).unwrap();

    let mut slice = buf.as_slice();
    let _ = read_varint(&mut slice).unwrap();
    assert_eq!(read_varint(&mut slice).unwrap(), 0x00);

    let decoded = StatusResponseS2c::decode_body(&mut slice).unwrap();
    assert_eq!(decoded, packet);
    assert!(slice.is_empty());
}
