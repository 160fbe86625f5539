//! Error Taxonomy Module
//!
//! Every public operation has its own closed set of failure kinds. Each kind
//! carries a stable negative code and a human-readable message, replacing the
//! negative-integer-plus-string-table convention of classic C socket
//! wrappers. Codes are unique within one operation and are not comparable
//! across operations.
//!
//! All enums here implement [`std::error::Error`], and `Display` renders the
//! message for the kind.

use std::error::Error;
use std::fmt;

/// Failure resolving a host/port pair into a usable address.
///
/// The single kind retains the resolver's detail string (the `getaddrinfo`
/// diagnostic) for callers that want more than the uniform message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Name/service lookup failed (unknown host, unknown service, no usable family)
    AddressResolutionFailed(String),
}

impl ResolveError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            ResolveError::AddressResolutionFailed(_) => -1,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ResolveError::AddressResolutionFailed(_) => "Unable to resolve address",
        }
    }

    /// Resolver diagnostic detail
    pub fn detail(&self) -> &str {
        match self {
            ResolveError::AddressResolutionFailed(detail) => detail,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail();
        if detail.is_empty() {
            write!(f, "{}", self.message())
        } else {
            write!(f, "{}: {}", self.message(), detail)
        }
    }
}

impl Error for ResolveError {}

/// Failure establishing an outbound TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    /// Address resolution failed
    AddressResolutionFailed,
    /// Socket creation failed
    SocketCreationFailed,
    /// The connect call itself failed
    ConnectFailed,
}

impl ConnectError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            ConnectError::AddressResolutionFailed => -1,
            ConnectError::SocketCreationFailed => -2,
            ConnectError::ConnectFailed => -3,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ConnectError::AddressResolutionFailed => "Unable to resolve address",
            ConnectError::SocketCreationFailed => "Unable to set up socket",
            ConnectError::ConnectFailed => "Unable to connect to server",
        }
    }
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ConnectError {}

/// Failure creating a bound TCP or UDP host socket.
///
/// Address reuse is enabled before bind, so `ReuseOptionFailed` is reported
/// even though bind was never attempted. The code numbering keeps bind at -3
/// and reuse at -4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// Address resolution failed
    AddressResolutionFailed,
    /// Socket creation failed
    SocketCreationFailed,
    /// Binding to the port failed
    BindFailed,
    /// Enabling address reuse failed
    ReuseOptionFailed,
}

impl HostError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            HostError::AddressResolutionFailed => -1,
            HostError::SocketCreationFailed => -2,
            HostError::BindFailed => -3,
            HostError::ReuseOptionFailed => -4,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            HostError::AddressResolutionFailed => "Unable to resolve address",
            HostError::SocketCreationFailed => "Unable to set up socket",
            HostError::BindFailed => "Unable to bind to port",
            HostError::ReuseOptionFailed => "Unable to enable port reuse",
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for HostError {}

/// Failure accepting one inbound TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptError {
    /// Marking the socket as listening failed
    ListenFailed,
    /// The accept call itself failed
    AcceptFailed,
}

impl AcceptError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            AcceptError::ListenFailed => -1,
            AcceptError::AcceptFailed => -2,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            AcceptError::ListenFailed => "Unable to listen for incoming connection",
            AcceptError::AcceptFailed => "Unable to accept incoming connection",
        }
    }
}

impl fmt::Display for AcceptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for AcceptError {}

/// Failure during a full-buffer stream send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// A kernel submission failed before the buffer was fully accepted
    SendFailed,
}

impl SendError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            SendError::SendFailed => -1,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            SendError::SendFailed => "Unable to send data",
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for SendError {}

/// Failure during a single stream receive.
///
/// A zero-byte read and a failed read are reported uniformly: this layer
/// does not distinguish a graceful close from a genuine I/O error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    /// No data was received, or the peer disconnected
    NoDataOrDisconnected,
}

impl RecvError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            RecvError::NoDataOrDisconnected => -1,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            RecvError::NoDataOrDisconnected => "Received no data or peer disconnected",
        }
    }
}

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for RecvError {}

/// Failure during the composed send-then-receive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRecvError {
    /// The full-buffer send failed
    SendFailed,
    /// No data was received, or the peer disconnected
    NoDataOrDisconnected,
}

impl SendRecvError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            SendRecvError::SendFailed => -1,
            SendRecvError::NoDataOrDisconnected => -2,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            SendRecvError::SendFailed => "Unable to send data",
            SendRecvError::NoDataOrDisconnected => "Received no data or peer disconnected",
        }
    }
}

impl fmt::Display for SendRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for SendRecvError {}

/// Failure opening a UDP sending session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpOpenError {
    /// Address resolution failed
    AddressResolutionFailed,
    /// Socket creation failed
    SocketCreationFailed,
}

impl UdpOpenError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            UdpOpenError::AddressResolutionFailed => -1,
            UdpOpenError::SocketCreationFailed => -2,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            UdpOpenError::AddressResolutionFailed => "Unable to resolve address",
            UdpOpenError::SocketCreationFailed => "Unable to set up socket",
        }
    }
}

impl fmt::Display for UdpOpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for UdpOpenError {}

/// Failure sending one datagram on an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpSendError {
    /// The sendto call failed
    SendFailed,
}

impl UdpSendError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            UdpSendError::SendFailed => -1,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            UdpSendError::SendFailed => "Unable to send data",
        }
    }
}

impl fmt::Display for UdpSendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for UdpSendError {}

/// Failure of the stateless one-shot datagram send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpSendOnceError {
    /// Address resolution failed
    AddressResolutionFailed,
    /// Socket creation failed
    SocketCreationFailed,
    /// The sendto call failed
    SendFailed,
}

impl UdpSendOnceError {
    /// Stable negative code for this kind
    pub fn code(&self) -> i32 {
        match self {
            UdpSendOnceError::AddressResolutionFailed => -1,
            UdpSendOnceError::SocketCreationFailed => -2,
            UdpSendOnceError::SendFailed => -3,
        }
    }

    /// Human-readable message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            UdpSendOnceError::AddressResolutionFailed => "Unable to resolve address",
            UdpSendOnceError::SocketCreationFailed => "Unable to set up socket",
            UdpSendOnceError::SendFailed => "Unable to send data",
        }
    }
}

impl fmt::Display for UdpSendOnceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for UdpSendOnceError {}
