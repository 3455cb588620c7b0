use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default Minecraft server port.
pub const DEFAULT_PORT: u16 = 25565;

/// Host/port pair of a server to probe. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    host: String,
    port: u16,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse a server address that MAY omit the port.
    ///
    /// Supported forms:
    /// - host or IPv4, optionally with port: `example.com`, `1.2.3.4:25566`
    /// - bracketed IPv6, optionally with port: `[::1]` or `[::1]:25566`
    /// - unbracketed IPv6 with no port: `2001:db8::1`
    ///
    /// A missing port falls back to 25565.
    pub fn parse(s: &str) -> Result<Self, ParseAddressError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseAddressError::Empty);
        }

        // bracketed IPv6 may include port or not: [::1]:25566 or [::1]
        if let Some(rest) = s.strip_prefix('[') {
            let close = rest
                .find(']')
                .ok_or(ParseAddressError::MissingClosingBracket)?;
            let host = &rest[..close];
            if host.is_empty() {
                return Err(ParseAddressError::Empty);
            }
            let after = &rest[close + 1..];
            let port = if after.is_empty() {
                DEFAULT_PORT
            } else {
                let port_str = after
                    .strip_prefix(':')
                    .ok_or(ParseAddressError::MissingPort)?;
                port_str
                    .parse::<u16>()
                    .map_err(ParseAddressError::InvalidPort)?
            };
            return Ok(Self::new(host, port));
        }

        // exactly one colon means host:port; more than one is an IPv6
        // literal with no port
        match s.matches(':').count() {
            0 => Ok(Self::new(s, DEFAULT_PORT)),
            1 => {
                let (host, port_str) = s.split_once(':').unwrap_or((s, ""));
                if host.is_empty() {
                    return Err(ParseAddressError::Empty);
                }
                let port = port_str
                    .parse::<u16>()
                    .map_err(ParseAddressError::InvalidPort)?;
                Ok(Self::new(host, port))
            }
            _ => Ok(Self::new(s, DEFAULT_PORT)),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseAddressError {
    #[error("empty input")]
    Empty,
    #[error("invalid port: {0}")]
    InvalidPort(std::num::ParseIntError),
    #[error("missing closing ']' for IPv6 literal")]
    MissingClosingBracket,
    #[error("expected ':' after bracketed IPv6 literal")]
    MissingPort,
}

impl FromStr for ServerAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerAddress::parse(s)
    }
}

impl Serialize for ServerAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ServerAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServerAddress::parse(&s).map_err(|err| serde::de::Error::custom(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_host_without_port() {
        let a = ServerAddress::parse("example.com").unwrap();
        assert_eq!(a.host(), "example.com");
        assert_eq!(a.port(), DEFAULT_PORT);
    }

    #[test]
    fn parse_host_with_port() {
        let a = ServerAddress::parse("1.2.3.4:25566").unwrap();
        assert_eq!(a.host(), "1.2.3.4");
        assert_eq!(a.port(), 25566);
    }

    #[test]
    fn parse_bracketed_ipv6() {
        let a = ServerAddress::parse("[::1]:8080").unwrap();
        assert_eq!(a.host(), "::1");
        assert_eq!(a.port(), 8080);

        let b = ServerAddress::parse("[2001:db8::1]").unwrap();
        assert_eq!(b.host(), "2001:db8::1");
        assert_eq!(b.port(), DEFAULT_PORT);
    }

    #[test]
    fn parse_unbracketed_ipv6_has_no_port() {
        let a = ServerAddress::parse("2001:db8::1").unwrap();
        assert_eq!(a.host(), "2001:db8::1");
        assert_eq!(a.port(), DEFAULT_PORT);
    }

    #[test]
    fn reject_bad_input() {
        assert!(matches!(
            ServerAddress::parse("   "),
            Err(ParseAddressError::Empty)
        ));
        assert!(matches!(
            ServerAddress::parse("host:notaport"),
            Err(ParseAddressError::InvalidPort(_))
        ));
        assert!(matches!(
            ServerAddress::parse("[::1"),
            Err(ParseAddressError::MissingClosingBracket)
        ));
    }

    #[test]
    fn display_brackets_ipv6() {
        let a = ServerAddress::parse("[::1]:80").unwrap();
        assert_eq!(a.to_string(), "[::1]:80");

        let b = ServerAddress::parse("example.com").unwrap();
        assert_eq!(b.to_string(), "example.com:25565");
    }
}
