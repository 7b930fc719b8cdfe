use std::io::{self, Read, Write};

use memchr::memchr;
use protocol::{ETX, decode_latin1, frame_request};

use crate::TransportError;

const READ_CHUNK: usize = 8 * 1024;

/// ETX-framed request/reply channel over a byte stream.
///
/// The transport is strictly sequential: each [`send`](Self::send) is
/// expected to be followed by one [`receive`](Self::receive).
#[derive(Debug)]
pub struct Transport<S> {
    stream: S,
    pending: Vec<u8>,
}

impl<S> Transport<S> {
    /// Wraps an already connected stream.
    pub const fn new(stream: S) -> Self {
        Self {
            stream,
            pending: Vec::new(),
        }
    }

    /// Borrows the underlying stream.
    pub const fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Mutably borrows the underlying stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Bytes received after the last terminator and not yet returned.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        &self.pending
    }

    /// Releases the underlying stream, discarding buffered bytes.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Transport<S> {
    /// Frames `body` in the request envelope and writes it.
    pub fn send(&mut self, body: &str) -> Result<(), TransportError> {
        let frame = frame_request(body)?;
        self.stream
            .write_all(&frame)
            .and_then(|()| self.stream.flush())
            .map_err(|error| map_io("write", error))?;
        logging::trace_transport!("sent {} byte request", frame.len());
        Ok(())
    }

    /// Reads the next reply, without its terminator.
    pub fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut scanned = 0;
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            if let Some(offset) = memchr(ETX, &self.pending[scanned..]) {
                let end = scanned + offset;
                let mut message: Vec<u8> = self.pending.drain(..=end).collect();
                message.pop();
                logging::trace_transport!(
                    "received {} byte reply, {} bytes buffered",
                    message.len(),
                    self.pending.len()
                );
                return Ok(message);
            }
            scanned = self.pending.len();

            match self.stream.read(&mut chunk) {
                Ok(0) if self.pending.is_empty() => return Err(TransportError::PeerClosed),
                Ok(0) => {
                    let received = std::mem::take(&mut self.pending).len();
                    logging::trace_transport!(warn, "reply truncated after {} bytes", received);
                    return Err(TransportError::Truncated { received });
                }
                Ok(read) => self.pending.extend_from_slice(&chunk[..read]),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(map_io("read", error)),
            }
        }
    }

    /// Sends `body` and returns the decoded text of the reply.
    pub fn round_trip(&mut self, body: &str) -> Result<String, TransportError> {
        self.send(body)?;
        let reply = self.receive()?;
        Ok(decode_latin1(&reply))
    }

    /// Flushes outstanding writes and drops the stream.
    pub fn close(mut self) -> Result<(), TransportError> {
        self.stream.flush().map_err(|error| map_io("flush", error))
    }
}

fn map_io(action: &'static str, error: io::Error) -> TransportError {
    match error.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            logging::trace_transport!(warn, "{} timed out", action);
            TransportError::Timeout
        }
        io::ErrorKind::UnexpectedEof
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe => {
            logging::trace_transport!(warn, "{} failed: {}", action, error);
            TransportError::PeerClosed
        }
        _ => TransportError::io(action, error),
    }
}
