//! Address Resolution Module
//!
//! Translates a host/port pair into a concrete, connectable or bindable
//! address. Resolution goes through the platform resolver (`getaddrinfo`),
//! so hosts may be numeric or textual and ports may be numeric or named
//! services ("80", "http").

use std::ffi::{CStr, CString};
use std::mem;
use std::net::SocketAddr;
use std::ptr;
use socket2::SockAddr;

use crate::error::ResolveError;
use crate::socket::{AddressFamily, Protocol, SocketType};

/// Transport selector for resolution and socket creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Stream semantics (TCP)
    Tcp,
    /// Datagram semantics (UDP)
    Udp,
}

impl Transport {
    fn socket_type(self) -> SocketType {
        match self {
            Transport::Tcp => SocketType::Stream,
            Transport::Udp => SocketType::Datagram,
        }
    }

    fn protocol(self) -> Protocol {
        match self {
            Transport::Tcp => Protocol::Tcp,
            Transport::Udp => Protocol::Udp,
        }
    }
}

/// One resolution candidate
///
/// Carries the address family, socket type and protocol to create a matching
/// socket with, and the opaque transport address to connect, bind or send to.
#[derive(Debug, Clone)]
pub struct ResolvedAddress {
    family: AddressFamily,
    socket_type: SocketType,
    protocol: Protocol,
    addr: SockAddr,
}

impl ResolvedAddress {
    /// Address family of the candidate
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    /// Socket type of the candidate
    pub fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    /// Protocol of the candidate
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Opaque transport address
    pub fn sockaddr(&self) -> &SockAddr {
        &self.addr
    }

    /// The candidate as a standard socket address, when it is one
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.addr.as_socket()
    }
}

/// Resolve a host/port pair into one candidate address
///
/// `passive = true` is the server-bind form: it permits `host = None`,
/// which resolves to the wildcard address for binding on all local
/// interfaces. With `passive = false` a `host` must name the peer.
///
/// Resolution may block on name lookup. Any lookup failure (unknown host,
/// unknown service, no usable family) is terminal and reported as
/// [`ResolveError::AddressResolutionFailed`] with the resolver's diagnostic
/// retained in the detail string. There are no retries.
///
/// Only the first usable candidate is returned even when the lookup yields
/// several; callers that need candidate iteration must go to the resolver
/// themselves.
///
/// # Arguments
///
/// * `host` - Peer host, or `None` for the wildcard (passive only)
/// * `port` - Numeric port or service name
/// * `transport` - Stream or datagram semantics
/// * `passive` - Resolve for binding rather than connecting
pub fn resolve(
    host: Option<&str>,
    port: &str,
    transport: Transport,
    passive: bool,
) -> Result<ResolvedAddress, ResolveError> {
    let host_cstr = match host {
        Some(h) => Some(
            CString::new(h).map_err(|_| {
                ResolveError::AddressResolutionFailed("host contains NUL byte".to_string())
            })?,
        ),
        None => None,
    };
    let service_cstr = CString::new(port).map_err(|_| {
        ResolveError::AddressResolutionFailed("service contains NUL byte".to_string())
    })?;

    let mut hints: libc::addrinfo = unsafe { mem::zeroed() };
    hints.ai_family = libc::AF_UNSPEC;
    hints.ai_socktype = match transport {
        Transport::Tcp => libc::SOCK_STREAM,
        Transport::Udp => libc::SOCK_DGRAM,
    };
    if passive {
        hints.ai_flags = libc::AI_PASSIVE;
    }

    let mut res: *mut libc::addrinfo = ptr::null_mut();
    let err = unsafe {
        libc::getaddrinfo(
            host_cstr
                .as_ref()
                .map(|s| s.as_ptr())
                .unwrap_or(ptr::null()),
            service_cstr.as_ptr(),
            &hints as *const libc::addrinfo,
            &mut res as *mut *mut libc::addrinfo,
        )
    };
    if err != 0 {
        let detail = unsafe { CStr::from_ptr(libc::gai_strerror(err)) }
            .to_string_lossy()
            .into_owned();
        return Err(ResolveError::AddressResolutionFailed(detail));
    }

    let candidate = unsafe { first_candidate(res, transport) };
    unsafe { libc::freeaddrinfo(res) };

    candidate.ok_or_else(|| {
        ResolveError::AddressResolutionFailed("no usable address family".to_string())
    })
}

/// Walk the resolver result list and copy out the first INET/INET6 entry.
///
/// # Safety
///
/// `res` must be a list returned by `getaddrinfo` that has not been freed.
unsafe fn first_candidate(
    res: *mut libc::addrinfo,
    transport: Transport,
) -> Option<ResolvedAddress> {
    let mut cur = res;
    while !cur.is_null() {
        let ai = &*cur;
        let family = match ai.ai_family {
            libc::AF_INET => AddressFamily::Ipv4,
            libc::AF_INET6 => AddressFamily::Ipv6,
            _ => {
                cur = ai.ai_next;
                continue;
            }
        };

        let mut storage: libc::sockaddr_storage = mem::zeroed();
        ptr::copy_nonoverlapping(
            ai.ai_addr as *const u8,
            &mut storage as *mut libc::sockaddr_storage as *mut u8,
            ai.ai_addrlen as usize,
        );
        let addr = SockAddr::new(storage, ai.ai_addrlen);

        return Some(ResolvedAddress {
            family,
            socket_type: transport.socket_type(),
            protocol: transport.protocol(),
            addr,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_resolve_numeric_tcp() {
        let resolved = resolve(Some("127.0.0.1"), "8080", Transport::Tcp, false).unwrap();
        assert_eq!(resolved.family(), AddressFamily::Ipv4);
        assert_eq!(resolved.socket_type(), SocketType::Stream);
        assert_eq!(resolved.protocol(), Protocol::Tcp);

        let addr = resolved.socket_addr().unwrap();
        assert_eq!(addr.ip(), IpAddr::from([127, 0, 0, 1]));
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_resolve_numeric_udp() {
        let resolved = resolve(Some("127.0.0.1"), "5353", Transport::Udp, false).unwrap();
        assert_eq!(resolved.socket_type(), SocketType::Datagram);
        assert_eq!(resolved.protocol(), Protocol::Udp);
        assert_eq!(resolved.socket_addr().unwrap().port(), 5353);
    }

    #[test]
    fn test_resolve_ipv6_literal() {
        let resolved = resolve(Some("::1"), "80", Transport::Tcp, false).unwrap();
        assert_eq!(resolved.family(), AddressFamily::Ipv6);
        let addr = resolved.socket_addr().unwrap();
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_resolve_passive_wildcard() {
        let resolved = resolve(None, "0", Transport::Tcp, true).unwrap();
        let addr = resolved.socket_addr().unwrap();
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 0);
    }

    #[test]
    fn test_resolve_unknown_service() {
        let result = resolve(Some("127.0.0.1"), "no-such-service-name", Transport::Tcp, false);
        let err = result.unwrap_err();
        assert_eq!(err.code(), -1);
        assert_eq!(err.message(), "Unable to resolve address");
        assert!(!err.detail().is_empty());
    }

    #[test]
    fn test_resolve_host_with_nul_byte() {
        let result = resolve(Some("bad\0host"), "80", Transport::Tcp, false);
        assert!(matches!(result, Err(ResolveError::AddressResolutionFailed(_))));
    }

    #[test]
    fn test_resolve_service_with_nul_byte() {
        let result = resolve(Some("127.0.0.1"), "8\00", Transport::Tcp, false);
        assert!(matches!(result, Err(ResolveError::AddressResolutionFailed(_))));
    }
}
