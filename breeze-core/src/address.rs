//! Endpoint address types.
//!
//! Channels are pointed at an [`EndpointAddress`]: either a real socket
//! address or an [`InProcessAddress`], the in-process analog of a socket
//! address. In-process endpoints live in the same process as the client
//! and are identified purely by name.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter so generated in-process names never collide.
static NAME_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Address of an in-process endpoint.
///
/// Plain value type: two addresses are equal when their names are equal.
/// The name carries no hierarchy and no scheme; it only has to match the
/// name a server registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InProcessAddress {
    name: Arc<str>,
}

impl InProcessAddress {
    /// Create an address for the given target name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    /// Create an address with a process-unique generated name.
    ///
    /// Useful for tests that spin up a private endpoint and do not care
    /// what it is called.
    #[must_use]
    pub fn unique() -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        let seq = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(format!("anonymous-{:x}-{seq}", now.as_nanos() as u64))
    }

    /// Get the target name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InProcessAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inproc://{}", self.name)
    }
}

/// Address of a channel endpoint, across transport kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointAddress {
    /// A network socket address (TCP and friends).
    Socket(SocketAddr),
    /// An in-process endpoint, identified by name.
    InProcess(InProcessAddress),
}

impl EndpointAddress {
    /// Check whether this address uses the in-process scheme.
    #[must_use]
    pub fn is_in_process(&self) -> bool {
        matches!(self, Self::InProcess(_))
    }
}

impl From<SocketAddr> for EndpointAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::Socket(addr)
    }
}

impl From<InProcessAddress> for EndpointAddress {
    fn from(addr: InProcessAddress) -> Self {
        Self::InProcess(addr)
    }
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket(addr) => write!(f, "{addr}"),
            Self::InProcess(addr) => write!(f, "{addr}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_equality() {
        let a = InProcessAddress::new("orders");
        let b = InProcessAddress::new("orders");
        let c = InProcessAddress::new("billing");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unique_names_differ() {
        let a = InProcessAddress::unique();
        let b = InProcessAddress::unique();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let addr = InProcessAddress::new("orders");
        assert_eq!(addr.to_string(), "inproc://orders");

        let endpoint = EndpointAddress::from(addr);
        assert!(endpoint.is_in_process());
        assert_eq!(endpoint.to_string(), "inproc://orders");
    }

    #[test]
    fn test_socket_is_not_in_process() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        assert!(!EndpointAddress::from(addr).is_in_process());
    }
}
