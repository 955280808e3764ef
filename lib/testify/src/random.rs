use std::net::Ipv4Addr;

use rand::distr::Alphanumeric;
use rand::Rng;

pub fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
}

/// A random `<hex ip>:<hex port>` token as printed in `/proc/net/ip_vs`,
/// along with the address and port it stands for. The port is written
/// with 1 to 4 digits.
pub fn random_address() -> (String, Ipv4Addr, u16) {
    let mut rng = rand::rng();
    let ip = Ipv4Addr::from(rng.random::<u32>());
    let port = rng.random::<u16>();
    let width = rng.random_range(1..=4usize);

    let token = format!("{:08X}:{port:0width$X}", u32::from(ip));
    (token, ip, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_token() {
        for _ in 0..100 {
            let (token, _, port) = random_address();
            let (addr, hex_port) = token.split_once(':').unwrap();

            assert_eq!(addr.len(), 8);
            assert!((1..=4).contains(&hex_port.len()), "{token}");
            assert_eq!(u16::from_str_radix(hex_port, 16).unwrap(), port);
        }
    }
}
