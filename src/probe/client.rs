use std::{fmt, time::Duration};

use tokio::{
    net::TcpStream,
    time::{timeout_at, Instant},
};

use crate::{
    addr::ServerAddress,
    logging::ProbeLogger,
    proto::{
        read_frame, write_frame, HandshakeC2s, ProtoError, StatusRequestC2s, StatusResponseS2c,
        PROTOCOL_VERSION,
    },
    status::{parse_status, ProbeResult},
};

/// Where in the exchange a probe currently is; a failure carries the stage
/// that broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    Connect,
    Handshake,
    StatusRequest,
    StatusResponse,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Connect => "connect",
            Self::Handshake => "handshake",
            Self::StatusRequest => "status request",
            Self::StatusResponse => "status response",
        };
        write!(f, "{stage}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("connect failed")]
    Connect(#[source] std::io::Error),
    #[error("timed out during {0}")]
    Timeout(ProbeStage),
    #[error("protocol failure during {stage}")]
    Protocol {
        stage: ProbeStage,
        #[source]
        source: ProtoError,
    },
    #[error("status payload rejected")]
    Payload(#[source] serde_json::Error),
}

/// Probe one server, absorbing every network and protocol failure into an
/// offline result. The whole exchange shares a single deadline.
pub async fn probe(address: &ServerAddress, timeout: Duration) -> ProbeResult {
    match query(address, timeout).await {
        Ok(result) => result,
        Err(err) => {
            ProbeLogger::probe_offline(address, &err);
            ProbeResult::offline()
        }
    }
}

async fn query(address: &ServerAddress, timeout: Duration) -> Result<ProbeResult, ProbeError> {
    let deadline = Instant::now() + timeout;

    let mut stream = timeout_at(deadline, TcpStream::connect((address.host(), address.port())))
        .await
        .map_err(|_| ProbeError::Timeout(ProbeStage::Connect))?
        .map_err(ProbeError::Connect)?;

    // The stream is dropped on every path below, failures included.
    let handshake = HandshakeC2s {
        protocol_version: PROTOCOL_VERSION,
        server_address: address.host(),
        server_port: address.port(),
    };
    timeout_at(deadline, write_frame(&mut stream, &handshake))
        .await
        .map_err(|_| ProbeError::Timeout(ProbeStage::Handshake))?
        .map_err(protocol_failure(ProbeStage::Handshake))?;

    timeout_at(deadline, write_frame(&mut stream, &StatusRequestC2s))
        .await
        .map_err(|_| ProbeError::Timeout(ProbeStage::StatusRequest))?
        .map_err(protocol_failure(ProbeStage::StatusRequest))?;

    let frame = timeout_at(deadline, read_frame(&mut stream))
        .await
        .map_err(|_| ProbeError::Timeout(ProbeStage::StatusResponse))?
        .map_err(protocol_failure(ProbeStage::StatusResponse))?;

    let response: StatusResponseS2c = frame
        .decode()
        .map_err(protocol_failure(ProbeStage::StatusResponse))?;

    parse_status(&response.json).map_err(ProbeError::Payload)
}

fn protocol_failure(stage: ProbeStage) -> impl Fn(ProtoError) -> ProbeError {
    move |source| ProbeError::Protocol { stage, source }
}
