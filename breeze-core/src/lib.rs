//! # breeze-core
//!
//! Core types, traits, and error definitions for the breeze channel
//! stack.
//!
//! This crate provides:
//! - Error types (`ChannelError`)
//! - Endpoint addresses (`EndpointAddress`, `InProcessAddress`)
//! - Per-attempt transport options (`TransportOptions`, `Attributes`)
//! - The shared builder and factory contracts (`ChannelBuilder`,
//!   `TransportFactory`)
//! - Scheduled execution (`ScheduledExecutor`, `TaskHandle`)
//! - Reference-counted process-wide resources (`SharedResource`)

mod address;
mod builder;
mod error;
mod factory;
mod options;
mod scheduler;
mod shared;

pub use address::{EndpointAddress, InProcessAddress};
pub use builder::ChannelBuilder;
pub use error::ChannelError;
pub use factory::TransportFactory;
pub use options::{Attributes, TransportOptions};
pub use scheduler::{ScheduledExecutor, TaskHandle};
pub use shared::SharedResource;
