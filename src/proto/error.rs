use thiserror::Error;

/// Wire-level decode/encode error.
#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("unexpected end of stream")]
    UnexpectedEof,
    #[error("varint wider than 5 bytes")]
    VarIntTooLarge,
    #[error("negative length {0}")]
    NegativeLength(i32),
    #[error("packet of {len} bytes exceeds the protocol limit")]
    PacketTooLarge { len: usize },
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
