//! Address helpers for controller and port values.

use std::net::IpAddr;

/// Check if a string is a valid IP address (IPv4 or IPv6)
pub fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok()
}

/// Split a controller address of the form `host:port`.
///
/// The host may be a name or an address; a bracketed IPv6 host
/// (`[::1]:6633`) is accepted. Returns `None` when the port is missing or is
/// not a number.
pub fn split_host_port(addr: &str) -> Option<(&str, u16)> {
    let (host, port) = addr.rsplit_once(':')?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if host.is_empty() || (host.contains(':') && !is_valid_ip(host)) {
        return None;
    }
    let port = port.parse::<u16>().ok()?;
    Some((host, port))
}
