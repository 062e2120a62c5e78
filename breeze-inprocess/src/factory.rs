//! In-process transport factory.

use std::sync::Arc;

use parking_lot::RwLock;

use breeze_core::{
    ChannelError, EndpointAddress, ScheduledExecutor, SharedResource, TransportFactory,
    TransportOptions,
};
use breeze_timer::Timer;

use crate::transport::InProcessTransport;

/// Where the factory's scheduled-execution resource came from.
///
/// The pooled arm remembers its kind so close can give the reference
/// back to the right slot; a supplied executor belongs to the caller and
/// is never released here.
pub(crate) enum TimerBinding {
    Pooled {
        kind: &'static SharedResource<Timer>,
        timer: Arc<Timer>,
    },
    Supplied(Arc<dyn ScheduledExecutor>),
}

impl TimerBinding {
    fn executor(&self) -> Arc<dyn ScheduledExecutor> {
        match self {
            Self::Pooled { timer, .. } => timer.clone(),
            Self::Supplied(executor) => executor.clone(),
        }
    }
}

/// Creates transports for one in-process channel.
///
/// Built by [`InProcessChannelBuilder::build_transport_factory`] with a
/// snapshot of the builder's configuration. The factory is the owner of
/// the channel's timer reference: closing it releases a pooled timer
/// back to [`TIMER_SERVICE`](breeze_timer::TIMER_SERVICE) exactly once,
/// no matter how many times or from how many threads close is called.
///
/// [`InProcessChannelBuilder::build_transport_factory`]:
/// crate::InProcessChannelBuilder::build_transport_factory
pub struct InProcessTransportFactory {
    name: Arc<str>,
    max_inbound_metadata_size: usize,
    timer: TimerBinding,
    closed: RwLock<bool>,
}

impl InProcessTransportFactory {
    pub(crate) fn new(
        name: Arc<str>,
        max_inbound_metadata_size: usize,
        timer: TimerBinding,
    ) -> Self {
        Self {
            name,
            max_inbound_metadata_size,
            timer,
            closed: RwLock::new(false),
        }
    }

    /// Create a transport for one connection attempt.
    ///
    /// The address only has to be of the in-process kind; the factory
    /// connects to the name it was built with, not to the address. Fails
    /// with [`ChannelError::FactoryClosed`] once the factory is closed;
    /// callers obtain a new factory instead of retrying.
    pub fn new_transport(
        &self,
        addr: &EndpointAddress,
        options: &TransportOptions,
    ) -> Result<InProcessTransport, ChannelError> {
        // Hold the read guard until the transport is built: a close that
        // wins the write lock can then never interleave with a handout.
        let closed = self.closed.read();
        if *closed {
            return Err(ChannelError::FactoryClosed);
        }

        if !addr.is_in_process() {
            return Err(ChannelError::invalid_argument(format!(
                "in-process transport requires an in-process address, got {addr}"
            )));
        }

        Ok(InProcessTransport::new(
            self.name.clone(),
            options.authority.clone(),
            options.user_agent.clone(),
            self.max_inbound_metadata_size,
            options.attributes.clone(),
        ))
    }

    /// The scheduled-execution resource transports should use.
    ///
    /// Stays answerable after close; a pooled timer may already be shut
    /// down by then.
    #[must_use]
    pub fn scheduled_executor(&self) -> Arc<dyn ScheduledExecutor> {
        self.timer.executor()
    }

    /// Close the factory.
    ///
    /// One-way and idempotent. The first close releases a pooled timer
    /// reference; later calls and concurrent racers return without
    /// doing anything.
    pub fn close(&self) {
        {
            let mut closed = self.closed.write();
            if *closed {
                return;
            }
            *closed = true;
        }

        tracing::debug!(endpoint = %self.name, "in-process transport factory closed");
        if let TimerBinding::Pooled { kind, timer } = &self.timer {
            kind.release(timer.clone());
        }
    }

    /// Name of the in-process endpoint this factory connects to.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.name
    }

    /// Cap on total inbound metadata per call.
    #[must_use]
    pub fn max_inbound_metadata_size(&self) -> usize {
        self.max_inbound_metadata_size
    }

    /// Whether the factory holds a reference to the shared pooled timer.
    #[must_use]
    pub fn uses_shared_timer(&self) -> bool {
        matches!(self.timer, TimerBinding::Pooled { .. })
    }

    /// Check whether the factory has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }
}

impl TransportFactory for InProcessTransportFactory {
    type Transport = InProcessTransport;

    fn new_transport(
        &self,
        addr: &EndpointAddress,
        options: &TransportOptions,
    ) -> Result<InProcessTransport, ChannelError> {
        InProcessTransportFactory::new_transport(self, addr, options)
    }

    fn scheduled_executor(&self) -> Arc<dyn ScheduledExecutor> {
        InProcessTransportFactory::scheduled_executor(self)
    }

    fn close(&self) {
        InProcessTransportFactory::close(self);
    }
}

impl Drop for InProcessTransportFactory {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breeze_core::{Attributes, InProcessAddress};
    use std::net::SocketAddr;

    fn pooled_factory(kind: &'static SharedResource<Timer>) -> InProcessTransportFactory {
        InProcessTransportFactory::new(
            Arc::from("test-target"),
            64 * 1024,
            TimerBinding::Pooled {
                kind,
                timer: kind.acquire(),
            },
        )
    }

    fn in_process_addr() -> EndpointAddress {
        EndpointAddress::from(InProcessAddress::new("test-target"))
    }

    #[test]
    fn test_transport_carries_config() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-carries-config", Timer::new, |timer| timer.shutdown());

        let factory = pooled_factory(&KIND);
        let options = TransportOptions::new()
            .user_agent("breeze-test/0.1")
            .attributes(Attributes::new().with("lb-weight", "3"));

        let transport = factory.new_transport(&in_process_addr(), &options).unwrap();
        assert_eq!(transport.target(), "test-target");
        assert_eq!(transport.authority(), "localhost");
        assert_eq!(transport.user_agent(), Some("breeze-test/0.1"));
        assert_eq!(transport.max_inbound_metadata_size(), 64 * 1024);
        assert_eq!(transport.attributes().get("lb-weight"), Some("3"));
    }

    #[test]
    fn test_rejects_socket_address() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-socket-addr", Timer::new, |timer| timer.shutdown());

        let factory = pooled_factory(&KIND);
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();

        let err = factory
            .new_transport(&EndpointAddress::from(addr), &TransportOptions::new())
            .unwrap_err();
        assert!(matches!(err, ChannelError::InvalidArgument(_)));
    }

    #[test]
    fn test_address_name_is_ignored_for_routing() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-addr-ignored", Timer::new, |timer| timer.shutdown());

        let factory = pooled_factory(&KIND);
        let other = EndpointAddress::from(InProcessAddress::new("some-other-name"));

        let transport = factory
            .new_transport(&other, &TransportOptions::new())
            .unwrap();
        assert_eq!(transport.target(), "test-target");
    }

    #[test]
    fn test_closed_factory_rejects() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-closed-rejects", Timer::new, |timer| timer.shutdown());

        let factory = pooled_factory(&KIND);
        assert!(!factory.is_closed());

        factory.close();
        assert!(factory.is_closed());

        let err = factory
            .new_transport(&in_process_addr(), &TransportOptions::new())
            .unwrap_err();
        assert_eq!(err, ChannelError::FactoryClosed);
        assert_eq!(err.to_string(), "the transport factory is closed");
    }

    #[test]
    fn test_close_releases_pooled_timer_once() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-release-once", Timer::new, |timer| timer.shutdown());

        // Pin one reference so a buggy double release would be visible
        // as a count below 1.
        let pin = KIND.acquire();
        let factory = pooled_factory(&KIND);
        assert_eq!(KIND.ref_count(), 2);

        factory.close();
        factory.close();
        assert_eq!(KIND.ref_count(), 1);
        assert!(!pin.is_shutdown());

        KIND.release(pin);
        assert_eq!(KIND.ref_count(), 0);
    }

    #[test]
    fn test_drop_closes_factory() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-drop-closes", Timer::new, |timer| timer.shutdown());

        let factory = pooled_factory(&KIND);
        assert_eq!(KIND.ref_count(), 1);
        drop(factory);
        assert_eq!(KIND.ref_count(), 0);
    }

    #[test]
    fn test_two_factories_count_down_to_fresh_instance() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-count-down", Timer::new, |timer| timer.shutdown());

        let first = pooled_factory(&KIND);
        let second = pooled_factory(&KIND);
        assert_eq!(KIND.ref_count(), 2);

        // Both factories hold the same pooled instance.
        let timer_first = first.scheduled_executor();
        let timer_second = second.scheduled_executor();
        assert!(Arc::ptr_eq(&timer_first, &timer_second));

        first.close();
        assert_eq!(KIND.ref_count(), 1);
        assert!(!second.scheduled_executor().is_shutdown());

        second.close();
        assert_eq!(KIND.ref_count(), 0);
        assert!(timer_first.is_shutdown());

        // The next factory gets a fresh timer; the released one stays
        // shut down.
        let third = pooled_factory(&KIND);
        assert!(!Arc::ptr_eq(&third.scheduled_executor(), &timer_first));
        assert!(!third.scheduled_executor().is_shutdown());
        third.close();
    }

    #[test]
    fn test_concurrent_close_releases_once() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-concurrent-close", Timer::new, |timer| timer.shutdown());

        let pin = KIND.acquire();
        let factory = pooled_factory(&KIND);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| factory.close());
            }
        });

        assert!(factory.is_closed());
        assert_eq!(KIND.ref_count(), 1);
        assert!(!pin.is_shutdown());
        KIND.release(pin);
    }

    #[test]
    fn test_no_transport_after_close_completes() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-close-race", Timer::new, |timer| timer.shutdown());

        let factory = pooled_factory(&KIND);
        let addr = in_process_addr();
        let options = TransportOptions::new();

        std::thread::scope(|scope| {
            let attempts = scope.spawn(|| {
                let mut results = Vec::new();
                for _ in 0..10_000 {
                    results.push(factory.new_transport(&addr, &options).is_ok());
                }
                results
            });

            scope.spawn(|| factory.close());

            // Once an attempt has failed, every later attempt must fail
            // too: the factory never reopens.
            let results = attempts.join().unwrap();
            if let Some(first_err) = results.iter().position(|ok| !ok) {
                assert!(results[first_err..].iter().all(|ok| !ok));
            }
        });
    }

    #[test]
    fn test_supplied_executor_is_left_alone() {
        let executor = Arc::new(Timer::new());
        let supplied: Arc<dyn ScheduledExecutor> = executor.clone();
        let factory = InProcessTransportFactory::new(
            Arc::from("test-target"),
            usize::MAX,
            TimerBinding::Supplied(supplied.clone()),
        );

        assert!(!factory.uses_shared_timer());
        assert!(Arc::ptr_eq(&factory.scheduled_executor(), &supplied));
        factory.close();
        factory.close();

        // Closing the factory must not shut down an executor the caller
        // owns, and the accessor keeps answering with that executor.
        assert!(!executor.is_shutdown());
        assert!(Arc::ptr_eq(&factory.scheduled_executor(), &supplied));
        executor.shutdown();
    }

    #[test]
    fn test_usable_through_factory_trait() {
        static KIND: SharedResource<Timer> =
            SharedResource::new("test-via-trait", Timer::new, |timer| timer.shutdown());

        fn shut_down<F: TransportFactory>(factory: &F) {
            factory.close();
        }

        let factory = pooled_factory(&KIND);
        let transport = TransportFactory::new_transport(
            &factory,
            &in_process_addr(),
            &TransportOptions::new(),
        )
        .unwrap();
        assert_eq!(transport.target(), "test-target");

        shut_down(&factory);
        assert!(factory.is_closed());
        assert_eq!(KIND.ref_count(), 0);
    }
}
