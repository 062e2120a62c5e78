//! In-process channel builder.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use breeze_core::{ChannelBuilder, ChannelError, ScheduledExecutor};
use breeze_timer::TIMER_SERVICE;

use crate::factory::{InProcessTransportFactory, TimerBinding};

/// Default advisory cap on a single inbound message, in bytes.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Channel builder for endpoints living in the same process.
///
/// The only valid entry point is [`for_name`](Self::for_name); the
/// host-based entry points of the shared [`ChannelBuilder`] contract
/// cannot describe an in-process endpoint and always fail. Security and
/// keep-alive setters exist so shared channel-setup code runs unchanged,
/// but are no-ops: an in-process connection is as secure and as alive as
/// the process itself.
///
/// ## Example
///
/// ```rust
/// use breeze_core::ChannelBuilder;
/// use breeze_inprocess::InProcessChannelBuilder;
///
/// let factory = InProcessChannelBuilder::for_name("orders")?
///     .use_plaintext()
///     .max_inbound_metadata_size(16 * 1024)?
///     .build_transport_factory();
///
/// assert_eq!(factory.target_name(), "orders");
/// factory.close();
/// # Ok::<(), breeze_core::ChannelError>(())
/// ```
pub struct InProcessChannelBuilder {
    name: Arc<str>,
    scheduled_executor: Option<Arc<dyn ScheduledExecutor>>,
    max_inbound_metadata_size: usize,
    max_inbound_message_size: usize,
}

impl InProcessChannelBuilder {
    /// Create a builder for the in-process endpoint registered under
    /// `name`. The name must not be empty; it is fixed for the life of
    /// the builder.
    pub fn for_name(name: impl Into<String>) -> Result<Self, ChannelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ChannelError::invalid_argument(
                "target name must not be empty",
            ));
        }
        Ok(Self {
            name: Arc::from(name),
            scheduled_executor: None,
            max_inbound_metadata_size: usize::MAX,
            max_inbound_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        })
    }

    /// Use `executor` for timer work instead of the shared pooled timer.
    ///
    /// Factories built afterwards never touch the pool; the executor's
    /// lifecycle stays with the caller, and closing those factories will
    /// not shut it down.
    #[must_use]
    pub fn scheduled_executor(mut self, executor: Arc<dyn ScheduledExecutor>) -> Self {
        self.scheduled_executor = Some(executor);
        self
    }

    /// Snapshot the configuration into a transport factory.
    ///
    /// Each call produces an independent factory with its own timer
    /// reference; the builder stays usable. Without a caller-supplied
    /// executor this acquires the shared pooled timer, which the factory
    /// gives back when it is closed.
    #[must_use]
    pub fn build_transport_factory(&self) -> InProcessTransportFactory {
        let timer = match &self.scheduled_executor {
            Some(executor) => TimerBinding::Supplied(executor.clone()),
            None => TimerBinding::Pooled {
                kind: &TIMER_SERVICE,
                timer: TIMER_SERVICE.acquire(),
            },
        };

        tracing::debug!(
            endpoint = %self.name,
            pooled_timer = self.scheduled_executor.is_none(),
            "building in-process transport factory"
        );
        InProcessTransportFactory::new(self.name.clone(), self.max_inbound_metadata_size, timer)
    }

    /// Name of the in-process endpoint this builder connects to.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.name
    }

    /// Current cap on total inbound metadata per call.
    #[must_use]
    pub fn metadata_size_limit(&self) -> usize {
        self.max_inbound_metadata_size
    }

    /// Current advisory cap on a single inbound message.
    ///
    /// Accepted for compatibility with the shared contract; the
    /// in-process transport does not enforce it.
    #[must_use]
    pub fn message_size_limit(&self) -> usize {
        self.max_inbound_message_size
    }
}

impl ChannelBuilder for InProcessChannelBuilder {
    /// Always fails: in-process endpoints are identified by name, not by
    /// target string. Call [`InProcessChannelBuilder::for_name`].
    fn for_target(_target: &str) -> Result<Self, ChannelError> {
        Err(ChannelError::unsupported(
            "in-process channels are built by name; call for_name",
        ))
    }

    /// Always fails: in-process endpoints have no host or port. Call
    /// [`InProcessChannelBuilder::for_name`].
    fn for_address(_host: &str, _port: u16) -> Result<Self, ChannelError> {
        Err(ChannelError::unsupported(
            "in-process channels are built by name; call for_name",
        ))
    }

    /// No-op: in-process connections never leave the process.
    fn use_transport_security(self) -> Self {
        self
    }

    /// No-op: in-process connections never leave the process.
    fn use_plaintext(self) -> Self {
        self
    }

    /// No-op: there is no connection to keep alive.
    fn keep_alive_time(self, _interval: Duration) -> Self {
        self
    }

    /// No-op: there is no connection to keep alive.
    fn keep_alive_timeout(self, _timeout: Duration) -> Self {
        self
    }

    /// No-op: there is no connection to keep alive.
    fn keep_alive_without_calls(self, _enabled: bool) -> Self {
        self
    }

    fn max_inbound_message_size(mut self, bytes: usize) -> Self {
        self.max_inbound_message_size = bytes;
        self
    }

    fn max_inbound_metadata_size(mut self, bytes: usize) -> Result<Self, ChannelError> {
        if bytes == 0 {
            return Err(ChannelError::invalid_argument(
                "max inbound metadata size must be greater than zero",
            ));
        }
        self.max_inbound_metadata_size = bytes;
        Ok(self)
    }
}

impl fmt::Debug for InProcessChannelBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InProcessChannelBuilder")
            .field("name", &self.name)
            .field(
                "scheduled_executor",
                &self.scheduled_executor.as_ref().map(|_| "supplied"),
            )
            .field("max_inbound_metadata_size", &self.max_inbound_metadata_size)
            .field("max_inbound_message_size", &self.max_inbound_message_size)
            .finish()
    }
}
