//! Transport factory contract.

use std::sync::Arc;

use crate::address::EndpointAddress;
use crate::error::ChannelError;
use crate::options::TransportOptions;
use crate::scheduler::ScheduledExecutor;

/// Creates transports for a channel and owns the resources they share.
///
/// A factory is built once from a channel builder's snapshot of its
/// configuration, hands out transports for the channel's connection
/// attempts, and is closed exactly once when the channel shuts down.
///
/// Lifecycle rules implementations must keep:
/// - [`new_transport`](Self::new_transport) never returns a transport
///   once a [`close`](Self::close) has completed; it fails with
///   [`ChannelError::FactoryClosed`] instead. Callers obtain a new
///   factory rather than retrying.
/// - `close` is idempotent and releases whatever shared resources the
///   factory acquired, exactly once.
/// - [`scheduled_executor`](Self::scheduled_executor) stays valid for
///   the factory's lifetime.
pub trait TransportFactory: Send + Sync {
    /// Transport type this factory produces.
    type Transport;

    /// Create a transport for one connection attempt to `addr`.
    fn new_transport(
        &self,
        addr: &EndpointAddress,
        options: &TransportOptions,
    ) -> Result<Self::Transport, ChannelError>;

    /// The scheduled-execution resource transports should use for timer
    /// work.
    fn scheduled_executor(&self) -> Arc<dyn ScheduledExecutor>;

    /// Close the factory and release its shared resources.
    fn close(&self);
}
