//! # Breeze
//!
//! In-process RPC channel plumbing: channel builders, transport
//! factories, and shared timers.
//!
//! Breeze provides:
//! - **Named in-process endpoints**: channels connect by name, with no
//!   sockets, security, or keep-alive involved
//! - **The shared builder contract** (`ChannelBuilder`) so generic
//!   channel-setup code works unchanged against the in-process transport
//! - **A closable transport factory** with strict lifecycle rules:
//!   close is idempotent, one-way, and releases shared resources exactly
//!   once
//! - **A pooled timer**: one process-wide timer thread, reference
//!   counted across channels, shut down when the last holder lets go
//!
//! ## Quick Start
//!
//! ```rust
//! use breeze::{
//!     ChannelBuilder, EndpointAddress, InProcessAddress, InProcessChannelBuilder,
//!     TransportOptions,
//! };
//!
//! // Point a builder at a named in-process endpoint
//! let builder = InProcessChannelBuilder::for_name("greeter").unwrap();
//!
//! // Shared-contract setters are accepted; security and keep-alive
//! // are no-ops for in-process channels
//! let builder = builder
//!     .use_plaintext()
//!     .keep_alive_time(std::time::Duration::from_secs(30));
//!
//! // Snapshot into a factory and create a transport
//! let factory = builder.build_transport_factory();
//! let addr = EndpointAddress::from(InProcessAddress::new("greeter"));
//! let transport = factory
//!     .new_transport(&addr, &TransportOptions::new())
//!     .unwrap();
//! assert_eq!(transport.authority(), "localhost");
//!
//! // Closing releases the shared timer reference
//! factory.close();
//! ```
//!
//! ## Architecture
//!
//! Breeze is composed of several crates:
//!
//! - [`breeze-core`](breeze_core) - Core types, traits, and error
//!   definitions
//! - [`breeze-timer`](breeze_timer) - Background timer thread and the
//!   shared pooled timer resource
//! - [`breeze-inprocess`](breeze_inprocess) - In-process channel builder
//!   and transport factory

// Re-export core types
pub use breeze_core::{
    Attributes, ChannelBuilder, ChannelError, EndpointAddress, InProcessAddress,
    ScheduledExecutor, SharedResource, TaskHandle, TransportFactory, TransportOptions,
};

// Re-export the timer
pub use breeze_timer::{TIMER_SERVICE, Timer};

// Re-export the in-process channel
pub use breeze_inprocess::{
    DEFAULT_MAX_MESSAGE_SIZE, InProcessChannelBuilder, InProcessTransport,
    InProcessTransportFactory,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use breeze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ChannelBuilder, ChannelError, InProcessChannelBuilder, TransportFactory, TransportOptions,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
