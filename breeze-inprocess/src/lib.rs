//! # breeze-inprocess
//!
//! In-process channel builder and transport factory for the breeze
//! channel stack.
//!
//! In-process endpoints live in the same process as the client and are
//! identified by name. Channels to them skip sockets, security, and
//! keep-alive entirely, which makes them the transport of choice for
//! tests and for composing services inside one binary.
//!
//! This crate provides:
//! - `InProcessChannelBuilder`, the configuration surface
//! - `InProcessTransportFactory`, the closable factory behind a channel
//! - `InProcessTransport`, the per-attempt transport handle

mod builder;
mod factory;
mod transport;

pub use builder::{DEFAULT_MAX_MESSAGE_SIZE, InProcessChannelBuilder};
pub use factory::InProcessTransportFactory;
pub use transport::InProcessTransport;
