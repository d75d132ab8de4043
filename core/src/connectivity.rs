//! Network reachability check for hosts that cannot ask the OS.

use std::net::TcpStream;
use std::time::Duration;

use tracing::debug;
use url::Url;

/// `true` if a TCP connection to `url`'s host and port opens within
/// `timeout`. Every resolved address is tried in turn.
pub fn probe(url: &Url, timeout: Duration) -> bool {
    let addrs = match url.socket_addrs(|| None) {
        Ok(addrs) => addrs,
        Err(e) => {
            debug!(%url, error = %e, "could not resolve host");
            return false;
        }
    };
    addrs.iter().any(|addr| match TcpStream::connect_timeout(addr, timeout) {
        Ok(_) => true,
        Err(e) => {
            debug!(%addr, error = %e, "probe connect failed");
            false
        }
    })
}
