//! UDP Module
//!
//! Datagram sending sessions, a stateless one-shot send, and bound datagram
//! hosts for receiving. Unlike the stream send there is no completion loop
//! here: a datagram send is one best-effort kernel submission, and the
//! returned count may legitimately be less than the buffer length.

use std::net::SocketAddr;

use crate::error::{HostError, RecvError, UdpOpenError, UdpSendError, UdpSendOnceError};
use crate::resolve::{resolve, ResolvedAddress, Transport};
use crate::socket::{Socket, SocketError};

/// A UDP sending session
///
/// Pairs the socket with the remembered peer address, because every
/// datagram send needs the destination. The session owns both for its
/// lifetime; dropping it closes the socket.
pub struct UdpSession {
    socket: Socket,
    peer: ResolvedAddress,
}

impl UdpSession {
    /// Open a session for sending datagrams to a host
    ///
    /// Resolves the target and creates a matching socket bound to a
    /// transient local port on first send. Failure kinds, in precedence
    /// order: [`UdpOpenError::AddressResolutionFailed`],
    /// [`UdpOpenError::SocketCreationFailed`].
    ///
    /// # Arguments
    ///
    /// * `host` - IP or name of the host to send to
    /// * `port` - Numeric port or service name at the target
    pub fn open(host: &str, port: &str) -> Result<UdpSession, UdpOpenError> {
        let peer = resolve(Some(host), port, Transport::Udp, false)
            .map_err(|_| UdpOpenError::AddressResolutionFailed)?;

        let socket = Socket::new(peer.family(), peer.socket_type(), peer.protocol())
            .map_err(|_| UdpOpenError::SocketCreationFailed)?;

        Ok(UdpSession { socket, peer })
    }

    /// Send one datagram to the session peer
    ///
    /// One best-effort transmission; returns the number of bytes the kernel
    /// accepted for this call, which may be less than `bytes.len()`.
    /// Datagrams are not retried or fragmented by this layer.
    pub fn send(&self, bytes: &[u8]) -> Result<usize, UdpSendError> {
        self.socket
            .send_to(bytes, self.peer.sockaddr())
            .map_err(|_| UdpSendError::SendFailed)
    }

    /// The remembered peer address
    pub fn peer(&self) -> &ResolvedAddress {
        &self.peer
    }

    /// Get the local address
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        self.socket.local_addr()
    }

    /// Get the underlying socket
    pub fn inner(&self) -> &Socket {
        &self.socket
    }
}

/// Send one datagram to a host in a single call
///
/// Stateless convenience: resolves the target, opens a throwaway socket,
/// sends once, and releases the socket before returning. Failure kinds, in
/// precedence order: [`UdpSendOnceError::AddressResolutionFailed`],
/// [`UdpSendOnceError::SocketCreationFailed`],
/// [`UdpSendOnceError::SendFailed`].
///
/// # Arguments
///
/// * `host` - IP or name of the host to send to
/// * `port` - Numeric port or service name at the target
/// * `bytes` - Datagram payload
///
/// # Returns
///
/// * `Ok(usize)` - Bytes accepted by the kernel (may be less than `bytes.len()`)
/// * `Err(UdpSendOnceError)` - Resolution, creation, or send failure
pub fn send_once(host: &str, port: &str, bytes: &[u8]) -> Result<usize, UdpSendOnceError> {
    let peer = resolve(Some(host), port, Transport::Udp, false)
        .map_err(|_| UdpSendOnceError::AddressResolutionFailed)?;

    let socket = Socket::new(peer.family(), peer.socket_type(), peer.protocol())
        .map_err(|_| UdpSendOnceError::SocketCreationFailed)?;

    socket
        .send_to(bytes, peer.sockaddr())
        .map_err(|_| UdpSendOnceError::SendFailed)
}

/// A bound UDP host socket for receiving datagrams
pub struct UdpHost {
    socket: Socket,
}

impl UdpHost {
    /// Create a UDP host bound to a port on all local interfaces
    ///
    /// Same sequence, failure kinds and reuse-before-bind ordering as the
    /// TCP host: resolve the wildcard, create the socket, enable address
    /// reuse, bind.
    ///
    /// # Arguments
    ///
    /// * `port` - Numeric port or service name to bind
    pub fn create(port: &str) -> Result<UdpHost, HostError> {
        let local = resolve(None, port, Transport::Udp, true)
            .map_err(|_| HostError::AddressResolutionFailed)?;

        let socket = Socket::new(local.family(), local.socket_type(), local.protocol())
            .map_err(|_| HostError::SocketCreationFailed)?;

        socket
            .set_reuse_address(true)
            .map_err(|_| HostError::ReuseOptionFailed)?;

        socket
            .bind(local.sockaddr())
            .map_err(|_| HostError::BindFailed)?;

        Ok(UdpHost { socket })
    }

    /// Receive one datagram
    ///
    /// Blocks for a single datagram and reports the sender. A failed read
    /// maps to [`RecvError::NoDataOrDisconnected`] like the stream receive;
    /// note that an empty datagram legitimately yields a zero count here.
    ///
    /// # Returns
    ///
    /// * `Ok((usize, SocketAddr))` - Bytes received and the sender address
    /// * `Err(RecvError)` - Receive failure
    pub fn recv_from(&mut self, buf: &mut [u8]) -> Result<(usize, SocketAddr), RecvError> {
        self.socket
            .recv_from(buf)
            .map_err(|_| RecvError::NoDataOrDisconnected)
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
