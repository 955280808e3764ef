use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use crate::DecodeError;

/// An address and port decoded from the kernel's `C0A80001:0050` notation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ServerAddress {
    pub ip: Ipv4Addr,
    /// Not range checked, the kernel only ever writes four hex digits.
    pub port: u64,
}

impl ServerAddress {
    /// Underscore form used in metric names, e.g. `192_168_1_1_80`.
    pub fn key(&self) -> String {
        format!("{}_{}", dotted_to_underscore(self.ip), self.port)
    }
}

impl Display for ServerAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

pub(crate) fn dotted_to_underscore(ip: Ipv4Addr) -> String {
    ip.to_string().replace('.', "_")
}

pub fn decode_address(token: &str) -> Result<ServerAddress, DecodeError> {
    let Some((addr, port)) = token.split_once(':') else {
        return Err(DecodeError::MissingPort(token.to_string()));
    };

    let octets = decode_hex(addr).ok_or_else(|| DecodeError::InvalidHex(token.to_string()))?;
    let octets: [u8; 4] = octets
        .try_into()
        .map_err(|octets: Vec<u8>| DecodeError::AddressLength {
            token: token.to_string(),
            len: octets.len(),
        })?;

    let port = u64::from_str_radix(port, 16).map_err(|err| DecodeError::InvalidPort {
        token: token.to_string(),
        err,
    })?;

    Ok(ServerAddress {
        ip: Ipv4Addr::from(octets),
        port,
    })
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        let tests = [
            ("C0A80001:0050", Ipv4Addr::new(192, 168, 0, 1), 80),
            ("C0A80001:01BB", Ipv4Addr::new(192, 168, 0, 1), 443),
            ("c0a80016:0cea", Ipv4Addr::new(192, 168, 0, 22), 3306),
            ("0A000001:35", Ipv4Addr::new(10, 0, 0, 1), 53),
            ("00000000:0000", Ipv4Addr::UNSPECIFIED, 0),
            // wider than 16 bits, passed through
            ("7F000001:10000", Ipv4Addr::LOCALHOST, 65536),
        ];

        for (input, ip, port) in tests {
            let addr = decode_address(input).unwrap();
            assert_eq!(addr, ServerAddress { ip, port }, "input: {input}");
        }
    }

    #[test]
    fn decode_random() {
        for _ in 0..1000 {
            let (token, ip, port) = testify::random::random_address();
            let addr = decode_address(&token).unwrap();

            assert_eq!(addr.ip, ip, "token: {token}");
            assert_eq!(addr.port, port as u64, "token: {token}");
            assert_eq!(addr.to_string(), format!("{ip}:{port}"));
        }
    }

    #[test]
    fn key_and_display() {
        let addr = decode_address("C0A80101:01BB").unwrap();
        assert_eq!(addr.key(), "192_168_1_1_443");
        assert_eq!(addr.to_string(), "192.168.1.1:443");
    }

    #[test]
    fn decode_failures() {
        assert_eq!(
            decode_address("C0A80001").unwrap_err(),
            DecodeError::MissingPort("C0A80001".into())
        );
        assert_eq!(
            decode_address("C0A8000G:0050").unwrap_err(),
            DecodeError::InvalidHex("C0A8000G:0050".into())
        );
        assert_eq!(
            decode_address("C0A800:0050").unwrap_err(),
            DecodeError::AddressLength {
                token: "C0A800:0050".into(),
                len: 3
            }
        );
        assert_eq!(
            decode_address("C0A8000:0050").unwrap_err(),
            DecodeError::InvalidHex("C0A8000:0050".into())
        );
        assert!(matches!(
            decode_address("C0A80001:ZZ").unwrap_err(),
            DecodeError::InvalidPort { .. }
        ));
        assert!(matches!(
            decode_address("C0A80001:").unwrap_err(),
            DecodeError::InvalidPort { .. }
        ));
        // ipv6 entries are not supported
        assert!(decode_address("[2620:0000:0000:0000:0000:0000:0000:0001]:0050").is_err());
    }
}
