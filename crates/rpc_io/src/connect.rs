use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::{RpcAddress, Transport, TransportConfig, TransportError};

/// Connected GUI-RPC socket.
#[derive(Debug)]
pub enum RpcStream {
    /// TCP connection.
    Tcp(TcpStream),
    /// Unix-domain connection.
    #[cfg(unix)]
    Unix(UnixStream),
}

impl RpcStream {
    /// Shuts down both halves of the connection.
    pub fn shutdown(&self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.shutdown(Shutdown::Both),
            #[cfg(unix)]
            Self::Unix(stream) => stream.shutdown(Shutdown::Both),
        }
    }

    fn set_timeouts(&self, config: &TransportConfig) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => {
                stream.set_read_timeout(config.read_timeout)?;
                stream.set_write_timeout(config.write_timeout)
            }
            #[cfg(unix)]
            Self::Unix(stream) => {
                stream.set_read_timeout(config.read_timeout)?;
                stream.set_write_timeout(config.write_timeout)
            }
        }
    }
}

impl Read for RpcStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for RpcStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

/// Opens a connection to the core client at `address`.
///
/// Every resolved TCP candidate is tried in turn; the error of the last one is
/// reported when none accepts. Read and write timeouts from `config` are
/// applied to the connected socket.
pub fn connect(
    address: &RpcAddress,
    config: &TransportConfig,
) -> Result<Transport<RpcStream>, TransportError> {
    let connect_error = |source| TransportError::Connect {
        address: address.to_string(),
        source,
    };

    let stream = match address {
        RpcAddress::Tcp { host, port } => {
            RpcStream::Tcp(connect_tcp(host, *port, config.connect_timeout).map_err(connect_error)?)
        }
        #[cfg(unix)]
        RpcAddress::Unix(path) => RpcStream::Unix(UnixStream::connect(path).map_err(connect_error)?),
    };

    stream
        .set_timeouts(config)
        .map_err(|error| TransportError::io("configure", error))?;
    logging::trace_transport!(info, "connected to {}", address);
    Ok(Transport::new(stream))
}

fn connect_tcp(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let mut last_error = None;

    for candidate in (host, port).to_socket_addrs()? {
        match connect_candidate(candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(error) => {
                logging::trace_transport!("connect to {} failed: {}", candidate, error);
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("host '{host}' did not resolve to any addresses"),
        )
    }))
}

fn connect_candidate(target: SocketAddr, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(target), Type::STREAM, Some(Protocol::TCP))?;
    let target = SockAddr::from(target);
    match timeout {
        Some(duration) => socket.connect_timeout(&target, duration)?,
        None => socket.connect(&target)?,
    }
    socket.set_tcp_nodelay(true)?;
    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn connect_applies_read_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        let config = TransportConfig::default().with_read_timeout(Some(Duration::from_millis(250)));

        let transport = connect(&RpcAddress::tcp("127.0.0.1", port), &config).expect("connect");
        let RpcStream::Tcp(stream) = transport.get_ref() else {
            panic!("expected a TCP stream");
        };
        assert_eq!(stream.read_timeout().expect("timeout"), Some(Duration::from_millis(250)));
        assert!(stream.nodelay().expect("nodelay"));
    }

    #[test]
    fn refused_connection_reports_address() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };

        let error = connect(&RpcAddress::tcp("127.0.0.1", port), &TransportConfig::default())
            .expect_err("nothing listening");
        match error {
            TransportError::Connect { address, .. } => assert_eq!(address, format!("127.0.0.1:{port}")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
