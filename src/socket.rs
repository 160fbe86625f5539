//! Socket Module
//!
//! Provides the raw socket primitives for TCP/IP networking. This module wraps
//! the `socket2` crate and exposes the blocking operations the higher-level
//! TCP and UDP modules are built from.

use std::io;
use std::mem::MaybeUninit;
use std::net::{Shutdown, SocketAddr};
use socket2::{Socket as Socket2, Domain, Type, Protocol as Socket2Protocol, SockAddr};
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};

/// Socket error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketError {
    /// Invalid address
    InvalidAddress,
    /// Address already in use
    AddressInUse,
    /// Connection refused
    ConnectionRefused,
    /// Connection reset
    ConnectionReset,
    /// Connection aborted
    ConnectionAborted,
    /// Socket not connected
    NotConnected,
    /// Operation not supported for this socket type
    NotSupported,
    /// I/O error
    IoError(String),
}

impl From<io::Error> for SocketError {
    fn from(err: io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::AddrInUse => SocketError::AddressInUse,
            ErrorKind::ConnectionRefused => SocketError::ConnectionRefused,
            ErrorKind::ConnectionReset => SocketError::ConnectionReset,
            ErrorKind::ConnectionAborted => SocketError::ConnectionAborted,
            ErrorKind::NotConnected => SocketError::NotConnected,
            _ => SocketError::IoError(err.to_string()),
        }
    }
}

/// Address family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// IPv4
    Ipv4,
    /// IPv6
    Ipv6,
}

impl From<AddressFamily> for Domain {
    fn from(family: AddressFamily) -> Self {
        match family {
            AddressFamily::Ipv4 => Domain::IPV4,
            AddressFamily::Ipv6 => Domain::IPV6,
        }
    }
}

/// Socket type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Stream socket (TCP)
    Stream,
    /// Datagram socket (UDP)
    Datagram,
}

impl From<SocketType> for Type {
    fn from(ty: SocketType) -> Self {
        match ty {
            SocketType::Stream => Type::STREAM,
            SocketType::Datagram => Type::DGRAM,
        }
    }
}

/// Protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// TCP
    Tcp,
    /// UDP
    Udp,
}

impl From<Protocol> for Socket2Protocol {
    fn from(proto: Protocol) -> Self {
        match proto {
            Protocol::Tcp => Socket2Protocol::TCP,
            Protocol::Udp => Socket2Protocol::UDP,
        }
    }
}

/// Owned socket wrapper
///
/// Wraps the underlying descriptor and provides the blocking primitive
/// operations. The descriptor is owned exclusively: dropping the wrapper
/// closes it, on success and failure paths alike.
pub struct Socket {
    inner: Socket2,
    family: AddressFamily,
    socket_type: SocketType,
    protocol: Protocol,
}

impl Socket {
    /// Create a new blocking socket
    ///
    /// # Arguments
    ///
    /// * `family` - Address family (IPv4 or IPv6)
    /// * `socket_type` - Socket type (Stream or Datagram)
    /// * `protocol` - Protocol (TCP or UDP)
    ///
    /// # Returns
    ///
    /// * `Ok(Socket)` - Created socket
    /// * `Err(SocketError)` - Error creating socket
    pub fn new(family: AddressFamily, socket_type: SocketType, protocol: Protocol) -> Result<Self, SocketError> {
        let domain: Domain = family.into();
        let ty: Type = socket_type.into();
        let proto: Socket2Protocol = protocol.into();

        let socket = Socket2::new(domain, ty, Some(proto))
            .map_err(SocketError::from)?;

        Ok(Self {
            inner: socket,
            family,
            socket_type,
            protocol,
        })
    }

    /// Bind socket to an address
    pub fn bind(&self, addr: &SockAddr) -> Result<(), SocketError> {
        self.inner.bind(addr)
            .map_err(SocketError::from)
    }

    /// Listen for incoming connections (TCP only)
    ///
    /// # Arguments
    ///
    /// * `backlog` - Maximum number of pending connections
    pub fn listen(&self, backlog: i32) -> Result<(), SocketError> {
        if self.socket_type != SocketType::Stream {
            return Err(SocketError::NotSupported);
        }

        self.inner.listen(backlog)
            .map_err(SocketError::from)
    }

    /// Accept an incoming connection (TCP only)
    ///
    /// Blocks until a peer connects.
    ///
    /// # Returns
    ///
    /// * `Ok((Socket, SocketAddr))` - Accepted connection and peer address
    /// * `Err(SocketError)` - Error accepting connection
    pub fn accept(&self) -> Result<(Socket, SocketAddr), SocketError> {
        if self.socket_type != SocketType::Stream {
            return Err(SocketError::NotSupported);
        }

        let (socket, addr) = self.inner.accept()
            .map_err(SocketError::from)?;

        let peer = addr.as_socket()
            .ok_or(SocketError::InvalidAddress)?;

        let accepted = Socket {
            inner: socket,
            family: self.family,
            socket_type: self.socket_type,
            protocol: self.protocol,
        };

        Ok((accepted, peer))
    }

    /// Connect to a remote address
    ///
    /// Blocks until the connection is established or fails.
    pub fn connect(&self, addr: &SockAddr) -> Result<(), SocketError> {
        self.inner.connect(addr)
            .map_err(SocketError::from)
    }

    /// Submit bytes on a connected socket
    ///
    /// Returns the number of bytes the kernel accepted, which may be fewer
    /// than `buf.len()`.
    pub fn send(&self, buf: &[u8]) -> Result<usize, SocketError> {
        self.inner.send(buf)
            .map_err(SocketError::from)
    }

    /// Receive bytes on a connected socket
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of bytes received (0 means the peer closed)
    /// * `Err(SocketError)` - Error receiving
    pub fn recv(&self, buf: &mut [u8]) -> Result<usize, SocketError> {
        // Convert &mut [u8] to &mut [MaybeUninit<u8>]
        let uninit_buf: &mut [MaybeUninit<u8>] = unsafe {
            std::slice::from_raw_parts_mut(
                buf.as_mut_ptr() as *mut MaybeUninit<u8>,
                buf.len(),
            )
        };

        let n = self.inner.recv(uninit_buf)
            .map_err(SocketError::from)?;

        // Safety: recv initializes the first n bytes of the buffer

        Ok(n)
    }

    /// Send one datagram to an address (UDP)
    pub fn send_to(&self, buf: &[u8], addr: &SockAddr) -> Result<usize, SocketError> {
        self.inner.send_to(buf, addr)
            .map_err(SocketError::from)
    }

    /// Receive one datagram and the sender address (UDP)
    ///
    /// # Returns
    ///
    /// * `Ok((usize, SocketAddr))` - Number of bytes received and sender address
    /// * `Err(SocketError)` - Error receiving
    pub fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), SocketError> {
        // Convert &mut [u8] to &mut [MaybeUninit<u8>]
        let uninit_buf: &mut [MaybeUninit<u8>] = unsafe {
            std::slice::from_raw_parts_mut(
                buf.as_mut_ptr() as *mut MaybeUninit<u8>,
                buf.len(),
            )
        };

        let (n, sock_addr) = self.inner.recv_from(uninit_buf)
            .map_err(SocketError::from)?;

        // Safety: recv_from initializes the first n bytes of the buffer

        let addr = sock_addr.as_socket()
            .ok_or(SocketError::InvalidAddress)?;

        Ok((n, addr))
    }

    /// Shut down reading, writing, or both directions of the connection
    pub fn shutdown(&self, how: Shutdown) -> Result<(), SocketError> {
        self.inner.shutdown(how)
            .map_err(SocketError::from)
    }

    /// Set socket option for address reuse
    ///
    /// Permits immediate rebinding of a recently used local port.
    pub fn set_reuse_address(&self, reuse: bool) -> Result<(), SocketError> {
        self.inner.set_reuse_address(reuse)
            .map_err(SocketError::from)
    }

    /// Get the local address
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        self.inner.local_addr()
            .map_err(SocketError::from)?
            .as_socket()
            .ok_or(SocketError::InvalidAddress)
    }

    /// Get the peer address
    pub fn peer_addr(&self) -> Result<SocketAddr, SocketError> {
        self.inner.peer_addr()
            .map_err(SocketError::from)?
            .as_socket()
            .ok_or(SocketError::InvalidAddress)
    }

    /// Get the raw file descriptor
    #[cfg(unix)]
    pub fn as_raw_fd(&self) -> RawFd {
        self.inner.as_raw_fd()
    }

    /// Get the underlying socket2 socket
    pub fn inner(&self) -> &Socket2 {
        &self.inner
    }

    /// Get the address family
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Get the socket type
    pub fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    /// Get the protocol
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn loopback_any_port() -> SockAddr {
        SockAddr::from(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0))
    }

    #[test]
    fn test_socket_creation() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        );
        assert!(socket.is_ok());
    }

    #[test]
    fn test_socket_ipv6() {
        let socket = Socket::new(
            AddressFamily::Ipv6,
            SocketType::Stream,
            Protocol::Tcp,
        );
        assert!(socket.is_ok());
    }

    #[test]
    fn test_socket_udp() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Datagram,
            Protocol::Udp,
        );
        assert!(socket.is_ok());
    }

    #[test]
    fn test_socket_bind() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        assert!(socket.bind(&loopback_any_port()).is_ok());

        let local_addr = socket.local_addr().unwrap();
        assert_eq!(local_addr.ip(), Ipv4Addr::LOCALHOST);
        assert!(local_addr.port() > 0);
    }

    #[test]
    fn test_socket_listen() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        socket.bind(&loopback_any_port()).unwrap();
        assert!(socket.listen(128).is_ok());
    }

    #[test]
    fn test_socket_listen_on_datagram() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Datagram,
            Protocol::Udp,
        ).unwrap();

        socket.bind(&loopback_any_port()).unwrap();

        let result = socket.listen(128);
        assert_eq!(result.unwrap_err(), SocketError::NotSupported);
    }

    #[test]
    fn test_socket_accept_on_datagram() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Datagram,
            Protocol::Udp,
        ).unwrap();

        let result = socket.accept();
        assert!(matches!(result, Err(SocketError::NotSupported)));
    }

    #[test]
    fn test_socket_connect_refused() {
        // Bind a listener to grab a free port, then release it so nothing
        // is listening there when we connect.
        let probe = Socket::new(AddressFamily::Ipv4, SocketType::Stream, Protocol::Tcp).unwrap();
        probe.bind(&loopback_any_port()).unwrap();
        let dead_addr = SockAddr::from(probe.local_addr().unwrap());
        drop(probe);

        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        let result = socket.connect(&dead_addr);
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_connect_and_accept() {
        use std::thread;

        let listener = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        listener.bind(&loopback_any_port()).unwrap();
        listener.listen(128).unwrap();

        let connect_addr = SockAddr::from(listener.local_addr().unwrap());
        let sender = thread::spawn(move || {
            let client = Socket::new(
                AddressFamily::Ipv4,
                SocketType::Stream,
                Protocol::Tcp,
            ).unwrap();
            client.connect(&connect_addr).unwrap();
            let peer = client.peer_addr().unwrap();
            assert_eq!(peer.ip(), Ipv4Addr::LOCALHOST);
        });

        let (accepted, peer_addr) = listener.accept().unwrap();
        assert_eq!(peer_addr.ip(), Ipv4Addr::LOCALHOST);
        assert_eq!(accepted.family(), AddressFamily::Ipv4);
        assert_eq!(accepted.socket_type(), SocketType::Stream);
        assert_eq!(accepted.protocol(), Protocol::Tcp);

        sender.join().unwrap();
    }

    #[test]
    fn test_socket_send_recv() {
        use std::thread;

        let listener = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        listener.bind(&loopback_any_port()).unwrap();
        listener.listen(128).unwrap();

        let connect_addr = SockAddr::from(listener.local_addr().unwrap());
        let sender = thread::spawn(move || {
            let client = Socket::new(
                AddressFamily::Ipv4,
                SocketType::Stream,
                Protocol::Tcp,
            ).unwrap();
            client.connect(&connect_addr).unwrap();

            let data = b"Hello, Socket!";
            let mut written = 0;
            while written < data.len() {
                written += client.send(&data[written..]).unwrap();
            }
        });

        let (accepted, _) = listener.accept().unwrap();

        let mut buf = vec![0u8; 100];
        let mut read_total = 0;
        while read_total < 14 {
            let n = accepted.recv(&mut buf[read_total..]).unwrap();
            if n == 0 {
                break;
            }
            read_total += n;
        }

        assert_eq!(&buf[..read_total], b"Hello, Socket!");
        sender.join().unwrap();
    }

    #[test]
    fn test_socket_udp_send_to_recv_from() {
        let receiver = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Datagram,
            Protocol::Udp,
        ).unwrap();
        receiver.bind(&loopback_any_port()).unwrap();
        let target = SockAddr::from(receiver.local_addr().unwrap());

        let sender = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Datagram,
            Protocol::Udp,
        ).unwrap();

        let sent = sender.send_to(b"datagram", &target).unwrap();
        assert_eq!(sent, 8);

        let mut buf = vec![0u8; 64];
        let (n, from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"datagram");
        assert_eq!(from.ip(), Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn test_socket_set_reuse_address() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        assert!(socket.set_reuse_address(true).is_ok());
        assert!(socket.set_reuse_address(false).is_ok());
    }

    #[test]
    fn test_socket_peer_addr_not_connected() {
        let socket = Socket::new(
            AddressFamily::Ipv4,
            SocketType::Stream,
            Protocol::Tcp,
        ).unwrap();

        assert!(socket.peer_addr().is_err());
    }

    #[test]
    fn test_socket_accessors() {
        let socket = Socket::new(
            AddressFamily::Ipv6,
            SocketType::Datagram,
            Protocol::Udp,
        ).unwrap();

        assert_eq!(socket.family(), AddressFamily::Ipv6);
        assert_eq!(socket.socket_type(), SocketType::Datagram);
        assert_eq!(socket.protocol(), Protocol::Udp);
        assert!(socket.as_raw_fd() > 0);
        let _ = socket.inner();
    }

    #[test]
    fn test_address_family_conversion() {
        assert_eq!(Domain::from(AddressFamily::Ipv4), Domain::IPV4);
        assert_eq!(Domain::from(AddressFamily::Ipv6), Domain::IPV6);
    }

    #[test]
    fn test_socket_type_conversion() {
        assert_eq!(Type::from(SocketType::Stream), Type::STREAM);
        assert_eq!(Type::from(SocketType::Datagram), Type::DGRAM);
    }

    #[test]
    fn test_protocol_conversion() {
        assert_eq!(Socket2Protocol::from(Protocol::Tcp), Socket2Protocol::TCP);
        assert_eq!(Socket2Protocol::from(Protocol::Udp), Socket2Protocol::UDP);
    }

    #[test]
    fn test_socket_error_from_io_error() {
        use std::io::ErrorKind;

        let addr_in_use = io::Error::from(ErrorKind::AddrInUse);
        assert_eq!(SocketError::from(addr_in_use), SocketError::AddressInUse);

        let conn_refused = io::Error::from(ErrorKind::ConnectionRefused);
        assert_eq!(SocketError::from(conn_refused), SocketError::ConnectionRefused);

        let conn_reset = io::Error::from(ErrorKind::ConnectionReset);
        assert_eq!(SocketError::from(conn_reset), SocketError::ConnectionReset);

        let not_connected = io::Error::from(ErrorKind::NotConnected);
        assert_eq!(SocketError::from(not_connected), SocketError::NotConnected);

        let other = io::Error::from(ErrorKind::Other);
        assert!(matches!(SocketError::from(other), SocketError::IoError(_)));
    }
}
