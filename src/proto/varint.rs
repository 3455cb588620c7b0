use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::{ProtoError, Result};

/// Decode a varint from the front of `input`, advancing past it.
#[inline]
pub fn read_varint(input: &mut &[u8]) -> Result<i32> {
    let mut value: u32 = 0;
    for i in 0..5 {
        let Some(&byte) = input.get(i) else {
            return Err(ProtoError::UnexpectedEof);
        };
        value |= ((byte & 0x7f) as u32) << (i * 7);
        if byte & 0x80 == 0 {
            *input = &input[i + 1..];
            return Ok(value as i32);
        }
    }

    Err(ProtoError::VarIntTooLarge)
}

/// Decode a varint by pulling single bytes off a stream.
///
/// A stream that ends mid-sequence is a truncation error; it must not be
/// mistaken for a legitimate zero.
pub async fn read_varint_stream<R>(reader: &mut R) -> Result<i32>
where
    R: AsyncRead + Unpin,
{
    let mut value: u32 = 0;
    for i in 0..5 {
        let byte = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                return Err(ProtoError::UnexpectedEof);
            }
            Err(err) => return Err(ProtoError::Io(err)),
        };
        value |= ((byte & 0x7f) as u32) << (i * 7);
        if byte & 0x80 == 0 {
            return Ok(value as i32);
        }
    }

    Err(ProtoError::VarIntTooLarge)
}

#[inline]
pub fn write_varint(out: &mut Vec<u8>, value: i32) {
    let mut val = value as u32;
    loop {
        if (val & 0xffff_ff80) == 0 {
            out.push(val as u8);
            return;
        }
        out.push((val as u8 & 0x7f) | 0x80);
        val >>= 7;
    }
}

#[inline]
pub fn varint_len(value: i32) -> usize {
    let mut val = value as u32;
    let mut count = 1;
    while (val & 0xffff_ff80) != 0 {
        count += 1;
        val >>= 7;
    }
    count
}
