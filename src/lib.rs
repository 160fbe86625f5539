//! socklib: Blocking TCP/UDP Socket Convenience Layer
//!
//! A convenience layer over operating-system stream (TCP) and datagram (UDP)
//! sockets: address resolution, connection establishment, listening and
//! accepting, reliable whole-buffer send, receive with disconnect detection,
//! and host/port binding.
//!
//! ## Overview
//!
//! - **[`resolve::resolve`]**: translates a host/port pair (or the wildcard for
//!   server binds) into a connectable or bindable address; ports may be
//!   numeric or named services.
//! - **[`tcp`]**: outbound connections ([`tcp::connect`]), listening hosts
//!   ([`tcp::create_host`], [`TcpHost::accept_once`]), and the reliable
//!   stream operations ([`TcpConnection::send_all`],
//!   [`TcpConnection::recv_once`], [`TcpConnection::send_recv`]).
//! - **[`udp`]**: datagram sessions ([`UdpSession`]), the stateless
//!   one-shot [`udp::send_once`], and bound receivers ([`UdpHost`]).
//! - **[`error`]**: one closed set of failure kinds per operation, each
//!   with a stable negative code and a message.
//! - **[`socket`]**: the owned raw-socket primitives everything above is
//!   built from.
//!
//! ## Contract
//!
//! Every operation is synchronous and may block the calling thread. Nothing
//! is logged internally and nothing aborts the process: every failure is
//! returned to the immediate caller as a typed value. Payloads are opaque
//! byte sequences; this crate imposes no framing, encoding, or encryption.
//! Handles own their descriptor and close it on drop, on success and
//! failure paths alike. Handles are not internally synchronized: concurrent
//! use of one handle from multiple threads requires external locking, and
//! closing a handle another thread is blocked on has operating-system
//! defined behavior.

pub mod error;
pub mod resolve;
pub mod socket;
pub mod tcp;
pub mod udp;

pub use error::{
    AcceptError, ConnectError, HostError, RecvError, ResolveError, SendError, SendRecvError,
    UdpOpenError, UdpSendError, UdpSendOnceError,
};
pub use resolve::{resolve, ResolvedAddress, Transport};
pub use socket::{AddressFamily, Protocol, Socket, SocketError, SocketType};
pub use tcp::{connect, create_host, TcpConnection, TcpHost};
pub use udp::{send_once, UdpHost, UdpSession};
