//! Shared channel builder contract.
//!
//! Every transport kind ships its own builder type, but generic channel
//! construction code needs one surface to program against. The
//! [`ChannelBuilder`] trait is that surface: entry points plus the
//! tuning knobs channels expose regardless of transport.
//!
//! Not every knob is meaningful for every transport. Builders for which
//! an entry point cannot work reject it with
//! [`ChannelError::UnsupportedOperation`]; builders for which a tuning
//! knob has no effect implement it as a documented no-op so shared setup
//! code keeps working unchanged.

use std::time::Duration;

use crate::error::ChannelError;

/// Builder contract shared by all transport kinds.
pub trait ChannelBuilder: Sized {
    /// Create a builder for a target string (scheme-qualified name or
    /// host:port, depending on the transport).
    fn for_target(target: &str) -> Result<Self, ChannelError>;

    /// Create a builder for a host and port.
    fn for_address(host: &str, port: u16) -> Result<Self, ChannelError>;

    /// Use transport-level security.
    #[must_use]
    fn use_transport_security(self) -> Self;

    /// Use plaintext (no transport security).
    #[must_use]
    fn use_plaintext(self) -> Self;

    /// Set the interval between keep-alive probes.
    #[must_use]
    fn keep_alive_time(self, interval: Duration) -> Self;

    /// Set how long to wait for a keep-alive probe before giving up.
    #[must_use]
    fn keep_alive_timeout(self, timeout: Duration) -> Self;

    /// Send keep-alive probes even when no calls are in flight.
    #[must_use]
    fn keep_alive_without_calls(self, enabled: bool) -> Self;

    /// Cap the size of a single inbound message.
    ///
    /// Advisory on transports that do not enforce it; infallible for
    /// that reason.
    #[must_use]
    fn max_inbound_message_size(self, bytes: usize) -> Self;

    /// Cap the total size of inbound metadata (headers and trailers) per
    /// call. Rejects a cap of zero.
    fn max_inbound_metadata_size(self, bytes: usize) -> Result<Self, ChannelError>;
}
