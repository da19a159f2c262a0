//! TCP socket `pfetch` transport, grounded on the original's direct-socket
//! fetch mode (the non-HTTP half of `blxGffParser`'s fetch dispatch).

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::RuntimeError;

/// Formats the single-line query `pfetch`-protocol servers expect: the
/// sequence name followed by a newline. Split out from
/// [`fetch_socket_pfetch`] so the wire format can be unit-tested without a
/// live server.
#[must_use]
pub fn format_pfetch_query(name: &str) -> String {
  format!("{name}\n")
}

/// Connects to `host:port`, sends [`format_pfetch_query`] and reads the
/// response until the server closes the connection.
pub fn fetch_socket_pfetch(host: &str, port: u16, name: &str, timeout: Duration) -> Result<String, RuntimeError> {
  let addr = format!("{host}:{port}");
  let mut stream = TcpStream::connect(&addr).map_err(|e| RuntimeError::TransportError(e.to_string()))?;
  stream.set_read_timeout(Some(timeout)).map_err(|e| RuntimeError::TransportError(e.to_string()))?;
  stream.set_write_timeout(Some(timeout)).map_err(|e| RuntimeError::TransportError(e.to_string()))?;

  stream
    .write_all(format_pfetch_query(name).as_bytes())
    .map_err(|e| RuntimeError::TransportError(e.to_string()))?;

  let mut response = String::new();
  stream
    .read_to_string(&mut response)
    .map_err(|e| RuntimeError::TransportError(e.to_string()))?;

  Ok(response)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn query_is_name_plus_newline() {
    assert_eq!(format_pfetch_query("est1"), "est1\n");
  }

  #[test]
  fn connect_failure_becomes_transport_error() {
    // Port 0 never accepts connections, so this exercises the error path
    // without depending on a live pfetch server.
    let result = fetch_socket_pfetch("127.0.0.1", 0, "est1", Duration::from_millis(200));
    assert!(result.is_err());
  }
}
