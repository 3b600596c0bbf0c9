//! Transport abstraction over the duplex byte channel to the board.
//!
//! The driver needs very little from a transport: an availability check,
//! a bulk write, a single-byte read, and a TX flush. Anything that moves
//! bytes both ways can implement [`TransportPort`]; framing, pacing and
//! timeouts all live above it.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Pause before re-polling a socket that had nothing for us.
const RETRY_SLEEP: Duration = Duration::from_millis(1);

/// Duplex byte channel carrying frames to and from the board.
pub trait TransportPort {
    /// Number of received bytes ready to read without blocking.
    fn bytes_available(&mut self) -> io::Result<usize>;

    /// Write raw bytes to the channel.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read one received byte. Callers check [`Self::bytes_available`]
    /// first; with nothing pending this may block until a byte arrives.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Block until previously written bytes are on the wire. Pending
    /// received bytes are not discarded.
    fn drain(&mut self) -> io::Result<()>;
}

// ============================================================================
// TCP bridge port
// ============================================================================

/// [`TransportPort`] over a TCP connection to a UART bridge.
///
/// Robot controllers in this project expose peripheral UARTs as TCP
/// ports; this client gives the driver the same byte-level view it would
/// have on the serial line itself. The socket runs non-blocking and
/// readable bytes are staged in a local queue so availability checks are
/// cheap and never lose data.
pub struct TcpPort {
    stream: TcpStream,
    rx: VecDeque<u8>,
}

impl TcpPort {
    /// Connect to a UART bridge.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        stream.set_nonblocking(true)?;
        Ok(TcpPort {
            stream,
            rx: VecDeque::new(),
        })
    }

    /// Pull everything currently readable off the socket into the local
    /// receive queue.
    fn fill_rx(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; 256];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "bridge closed the connection",
                    ))
                }
                Ok(n) => self.rx.extend(&chunk[..n]),
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}

impl TransportPort for TcpPort {
    fn bytes_available(&mut self) -> io::Result<usize> {
        self.fill_rx()?;
        Ok(self.rx.len())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut rest = bytes;
        while !rest.is_empty() {
            match self.stream.write(rest) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "bridge accepted no bytes",
                    ))
                }
                Ok(n) => rest = &rest[n..],
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    std::thread::sleep(RETRY_SLEEP)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        loop {
            if let Some(byte) = self.rx.pop_front() {
                return Ok(byte);
            }
            self.fill_rx()?;
            if self.rx.is_empty() {
                std::thread::sleep(RETRY_SLEEP);
            }
        }
    }

    fn drain(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

// ============================================================================
// Scripted in-memory port
// ============================================================================

/// In-memory port scripted with the bytes the device will send.
///
/// Stands in for a live bridge in the test suites: written frames are
/// captured for inspection and the device's reply is queued up front.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    rx: VecDeque<u8>,
    written: Vec<u8>,
    drains: usize,
}

impl ScriptedPort {
    /// Create an empty scripted port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the driver to receive.
    pub fn queue_reply(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Everything the driver has written, in order.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Take and clear the captured writes.
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.written)
    }

    /// Number of times the driver flushed the port.
    pub fn drain_count(&self) -> usize {
        self.drains
    }
}

impl TransportPort for ScriptedPort {
    fn bytes_available(&mut self) -> io::Result<usize> {
        Ok(self.rx.len())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        self.rx.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted reply exhausted")
        })
    }

    fn drain(&mut self) -> io::Result<()> {
        self.drains += 1;
        Ok(())
    }
}
