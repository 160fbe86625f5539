//! TCP Module
//!
//! Outbound connections, listening hosts, and the reliable stream
//! operations: full-buffer send, single receive with disconnect detection,
//! and the composed send-then-receive request/reply form.
//!
//! All calls block. There is no timeout and no cancellation primitive;
//! closing a handle that another thread is blocked on has operating-system
//! defined behavior.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr};

use crate::error::{AcceptError, ConnectError, HostError, RecvError, SendError, SendRecvError};
use crate::resolve::{resolve, Transport};
use crate::socket::{Socket, SocketError};

/// An established TCP connection
///
/// Owns its descriptor; dropping the connection closes it. The reliable
/// stream operations take `&mut self`: a connection is valid for use by
/// exactly one of them at a time.
pub struct TcpConnection {
    socket: Socket,
}

/// Connect to a host via TCP
///
/// Resolves the target, creates a matching socket, and connects. Blocks
/// until the connection is established or fails.
///
/// Failure kinds, in precedence order: [`ConnectError::AddressResolutionFailed`],
/// [`ConnectError::SocketCreationFailed`], [`ConnectError::ConnectFailed`].
/// On every failure path the partially-created socket is released before the
/// error is returned.
///
/// # Arguments
///
/// * `host` - IP or name of the host to connect to (e.g. "192.168.0.1", "www.example.com")
/// * `port` - Numeric port or service name at the target (e.g. "80", "http")
pub fn connect(host: &str, port: &str) -> Result<TcpConnection, ConnectError> {
    let target = resolve(Some(host), port, Transport::Tcp, false)
        .map_err(|_| ConnectError::AddressResolutionFailed)?;

    let socket = Socket::new(target.family(), target.socket_type(), target.protocol())
        .map_err(|_| ConnectError::SocketCreationFailed)?;

    socket
        .connect(target.sockaddr())
        .map_err(|_| ConnectError::ConnectFailed)?;

    Ok(TcpConnection { socket })
}

impl TcpConnection {
    pub(crate) fn from_socket(socket: Socket) -> Self {
        Self { socket }
    }

    /// Send a whole buffer
    ///
    /// The kernel may accept fewer bytes than submitted in one call, so this
    /// loops over the unsent tail until every byte has been accepted or a
    /// submission fails. Full-buffer delivery is the contract; there is no
    /// partial-success result.
    pub fn send_all(&mut self, bytes: &[u8]) -> Result<(), SendError> {
        let mut sent = 0;
        while sent < bytes.len() {
            match self.socket.send(&bytes[sent..]) {
                Ok(n) => sent += n,
                Err(_) => return Err(SendError::SendFailed),
            }
        }
        Ok(())
    }

    /// Receive once
    ///
    /// Blocks for a single receive into `buf` and returns the byte count,
    /// which is always at least 1. A zero-byte read and a failed read are
    /// reported uniformly as [`RecvError::NoDataOrDisconnected`]; this layer
    /// does not distinguish a graceful close from an I/O error.
    pub fn recv_once(&mut self, buf: &mut [u8]) -> Result<usize, RecvError> {
        match self.socket.recv(buf) {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(RecvError::NoDataOrDisconnected),
        }
    }

    /// Send a whole buffer, then receive one reply
    ///
    /// The single-request/single-response convenience form. A send failure
    /// short-circuits; otherwise one receive is performed and its outcome
    /// reported.
    pub fn send_recv(&mut self, out: &[u8], buf: &mut [u8]) -> Result<usize, SendRecvError> {
        self.send_all(out)
            .map_err(|_| SendRecvError::SendFailed)?;
        self.recv_once(buf)
            .map_err(|_| SendRecvError::NoDataOrDisconnected)
    }

    /// Disconnect both directions
    ///
    /// Best-effort shutdown; never reports failure. The descriptor stays
    /// open (and owned) until the connection is dropped.
    pub fn disconnect(&self) {
        let _ = self.socket.shutdown(Shutdown::Both);
    }

    /// Get the local address
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        self.socket.local_addr()
    }

    /// Get the peer address
    pub fn peer_addr(&self) -> Result<SocketAddr, SocketError> {
        self.socket.peer_addr()
    }

    /// Get the underlying socket
    pub fn inner(&self) -> &Socket {
        &self.socket
    }
}

impl Read for TcpConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket
            .recv(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{:?}", e)))
    }
}

impl Write for TcpConnection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.socket
            .send(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{:?}", e)))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A bound TCP host socket
///
/// Created bound but not yet listening; [`TcpHost::accept_once`] marks it
/// listening and accepts exactly one connection per call.
pub struct TcpHost {
    socket: Socket,
}

/// Create a TCP host bound to a port on all local interfaces
///
/// Resolves the wildcard address for `port`, creates a socket, enables
/// address reuse, and binds. Address reuse lets a restarted server rebind a
/// recently used port immediately.
///
/// Reuse is enabled *before* bind, so [`HostError::ReuseOptionFailed`] is
/// reported even though bind was never attempted; the code numbering keeps
/// bind at -3 and reuse at -4 regardless.
///
/// # Arguments
///
/// * `port` - Numeric port or service name to bind (e.g. "1729", "http")
pub fn create_host(port: &str) -> Result<TcpHost, HostError> {
    let local = resolve(None, port, Transport::Tcp, true)
        .map_err(|_| HostError::AddressResolutionFailed)?;

    let socket = Socket::new(local.family(), local.socket_type(), local.protocol())
        .map_err(|_| HostError::SocketCreationFailed)?;

    socket
        .set_reuse_address(true)
        .map_err(|_| HostError::ReuseOptionFailed)?;

    socket
        .bind(local.sockaddr())
        .map_err(|_| HostError::BindFailed)?;

    Ok(TcpHost { socket })
}

impl TcpHost {
    /// Accept one inbound connection
    ///
    /// Marks the socket as listening with the given backlog, then blocks
    /// until one connection arrives or a failure occurs. One accept per
    /// invocation; a server loop calls this repeatedly.
    ///
    /// # Arguments
    ///
    /// * `backlog` - Maximum number of pending connections queued by the kernel
    ///
    /// # Returns
    ///
    /// * `Ok((TcpConnection, SocketAddr))` - Accepted connection and peer address
    /// * `Err(AcceptError)` - Listen or accept failure
    pub fn accept_once(&self, backlog: i32) -> Result<(TcpConnection, SocketAddr), AcceptError> {
        self.socket
            .listen(backlog)
            .map_err(|_| AcceptError::ListenFailed)?;

        let (accepted, peer) = self.socket
            .accept()
            .map_err(|_| AcceptError::AcceptFailed)?;

        Ok((TcpConnection::from_socket(accepted), peer))
    }

    /// Get the bound local address
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        self.socket.local_addr()
    }

    /// Get the underlying socket
    pub fn inner(&self) -> &Socket {
        &self.socket
    }
}
